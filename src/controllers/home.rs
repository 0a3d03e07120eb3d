use crate::config::AppConfig;
use crate::controller::{Controller, PageController};
use crate::error::FrameworkError;
use crate::model::Model;
use crate::view::View;
use serde_json::Value;

/// Default landing page.
///
/// The index method receives the page name as its parameter (the dispatcher
/// passes the controller's own name for bare index requests) and assembles
/// the page from the `template`, `navigation`, `branding`, and `home`
/// records.
pub struct HomeController {
    base: PageController,
    cache_busting: bool,
}

impl HomeController {
    pub fn new(model: Model, view: View, config: &AppConfig) -> Self {
        Self {
            base: PageController::new(model, view),
            cache_busting: config.cache_busting,
        }
    }

    fn index(&mut self, parameters: &[String]) -> Result<String, FrameworkError> {
        let page_name = parameters
            .first()
            .map(String::as_str)
            .unwrap_or("home")
            .to_string();

        let cache_buster = self.base.cache_buster(self.cache_busting, None);

        if let Some(template) = self.base.model().record("template").cloned() {
            self.base.page_builder(&template, &cache_buster);
            if let Some(titles) = template.get("title_pages").cloned() {
                self.base.set_head_title_page(&titles, &page_name);
            }
        }
        if let Some(nav) = self.base.model().record("navigation").cloned() {
            if let Some(header) = nav.get("header_nav") {
                self.base.set_header_nav(header, Some("|"));
            }
            if let Some(footer) = nav.get("footer_nav") {
                self.base.set_footer_nav(footer, Some("|"));
            }
        }
        if let Some(branding) = self.base.model().record("branding").cloned() {
            self.base.set_logo_anchor("", &branding);
        }
        if let Some(page) = self.base.model().record(&page_name).cloned() {
            if let Some(body) = page.get("body").and_then(Value::as_str) {
                self.base.set_view_property("content", body);
            }
        }

        Ok(self.base.render(&page_name))
    }
}

impl Controller for HomeController {
    fn name(&self) -> &str {
        "home"
    }

    fn methods(&self) -> &[&str] {
        &["index"]
    }

    fn invoke(&mut self, method: &str, parameters: &[String]) -> Result<String, FrameworkError> {
        match method {
            "index" => self.index(parameters),
            other => Err(FrameworkError::MethodNotFound {
                controller: self.name().to_string(),
                method: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Logger;
    use crate::storage::JsonStorage;
    use crate::view::AssetPaths;

    #[test]
    fn index_renders_page_content_and_nav() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("home.json"),
            r#"{"body": "<p>welcome home</p>"}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("navigation.json"),
            r#"{"header_nav": {"Home": {"is_anchor": false}, "About": {"is_anchor": false}}}"#,
        )
        .unwrap();

        let model = Model::new(
            Box::new(JsonStorage::new()),
            Logger::new(false, dir.path()),
            None,
            dir.path(),
        )
        .unwrap();
        let mut ctl = HomeController::new(
            model,
            View::new(AssetPaths::default()),
            &AppConfig::default(),
        );

        let body = ctl.invoke("index", &["home".to_string()]).unwrap();
        assert!(body.contains("<p>welcome home</p>"));
        assert!(body.contains("<li class=\"first\">Home"));
        assert!(body.contains("<main id=\"page-home\">"));
    }

    #[test]
    fn unknown_method_reports_method_not_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stub.json"), "{}").unwrap();
        let model = Model::new(
            Box::new(JsonStorage::new()),
            Logger::new(false, dir.path()),
            None,
            dir.path(),
        )
        .unwrap();
        let mut ctl = HomeController::new(
            model,
            View::new(AssetPaths::default()),
            &AppConfig::default(),
        );
        let err = ctl.invoke("publish", &[]).unwrap_err();
        assert!(matches!(err, FrameworkError::MethodNotFound { .. }));
    }
}
