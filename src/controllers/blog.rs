use crate::config::AppConfig;
use crate::controller::{Controller, PageController};
use crate::error::FrameworkError;
use crate::model::Model;
use crate::view::View;
use serde_json::Value;

/// Blog pages: an index listing and a `view` method addressed as
/// `/blog/view/<post-id>[/<section>]`.
pub struct BlogController {
    base: PageController,
    cache_busting: bool,
}

impl BlogController {
    pub fn new(model: Model, view: View, config: &AppConfig) -> Self {
        Self {
            base: PageController::new(model, view),
            cache_busting: config.cache_busting,
        }
    }

    fn build_chrome(&mut self) {
        let cache_buster = self.base.cache_buster(self.cache_busting, None);
        if let Some(template) = self.base.model().record("template").cloned() {
            self.base.page_builder(&template, &cache_buster);
        }
        if let Some(nav) = self.base.model().record("navigation").cloned() {
            if let Some(header) = nav.get("header_nav") {
                self.base.set_header_nav(header, Some("|"));
            }
        }
    }

    fn index(&mut self, parameters: &[String]) -> Result<String, FrameworkError> {
        let page_name = parameters
            .first()
            .map(String::as_str)
            .unwrap_or("blog")
            .to_string();

        self.build_chrome();

        if let Some(blog) = self.base.model().record("blog").cloned() {
            let mut listing = String::from("<ul class=\"posts\">");
            if let Some(posts) = blog.get("posts").and_then(Value::as_object) {
                for (id, post) in posts {
                    let title = post
                        .get("title")
                        .and_then(Value::as_str)
                        .unwrap_or("Untitled");
                    listing.push_str(&format!("<li data-post=\"{id}\">{title}</li>"));
                }
            }
            listing.push_str("</ul>");
            self.base.set_view_property("content", &listing);
        }

        Ok(self.base.render(&page_name))
    }

    fn view(&mut self, parameters: &[String]) -> Result<String, FrameworkError> {
        self.build_chrome();

        let post_id = parameters.first().map(String::as_str).unwrap_or_default();
        let section = parameters.get(1).map(String::as_str);

        let mut content = String::new();
        let post = self
            .base
            .model()
            .record("blog")
            .and_then(|blog| blog.get("posts"))
            .and_then(|posts| posts.get(post_id))
            .cloned();

        match post {
            Some(post) => {
                let title = post
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or("Untitled");
                let body = post.get("body").and_then(Value::as_str).unwrap_or("");
                content.push_str(&format!("<article><h1>{title}</h1>{body}</article>"));

                if section == Some("comments") {
                    content.push_str("<section class=\"comments\">");
                    if let Some(comments) = post.get("comments").and_then(Value::as_array) {
                        for comment in comments {
                            if let Some(text) = comment.as_str() {
                                content.push_str(&format!("<p>{text}</p>"));
                            }
                        }
                    }
                    content.push_str("</section>");
                }
            }
            None => {
                content.push_str(&format!("<p>No such post: {post_id}</p>"));
            }
        }

        self.base.set_view_property("content", &content);
        Ok(self.base.render("blog"))
    }
}

impl Controller for BlogController {
    fn name(&self) -> &str {
        "blog"
    }

    fn methods(&self) -> &[&str] {
        &["index", "view"]
    }

    fn invoke(&mut self, method: &str, parameters: &[String]) -> Result<String, FrameworkError> {
        match method {
            "index" => self.index(parameters),
            "view" => self.view(parameters),
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

    fn controller(dir: &std::path::Path) -> BlogController {
        std::fs::write(
            dir.join("blog.json"),
            r#"{"posts": {"7": {"title": "Seventh", "body": "<p>post body</p>",
                "comments": ["first!", "second"]}}}"#,
        )
        .unwrap();
        let model = Model::new(
            Box::new(JsonStorage::new()),
            Logger::new(false, dir),
            None,
            dir,
        )
        .unwrap();
        BlogController::new(model, View::new(AssetPaths::default()), &AppConfig::default())
    }

    #[test]
    fn view_renders_post_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        let body = ctl.invoke("view", &["7".to_string()]).unwrap();
        assert!(body.contains("<h1>Seventh</h1>"));
        assert!(!body.contains("comments"));
    }

    #[test]
    fn comments_section_renders_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        let body = ctl
            .invoke("view", &["7".to_string(), "comments".to_string()])
            .unwrap();
        assert!(body.contains("class=\"comments\""));
        assert!(body.contains("first!"));
    }

    #[test]
    fn index_lists_posts() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctl = controller(dir.path());
        let body = ctl.invoke("index", &["blog".to_string()]).unwrap();
        assert!(body.contains("data-post=\"7\""));
    }
}
