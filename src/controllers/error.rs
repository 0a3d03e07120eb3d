use crate::config::AppConfig;
use crate::controller::{Controller, PageController};
use crate::error::{FrameworkError, NOT_FOUND_LABEL, UNKNOWN_ERROR_LABEL};
use crate::model::Model;
use crate::view::View;

/// The fallback page for failed dispatches.
///
/// Receives the error-kind label (`"404"` or `"Unknown Error"`) as its
/// single parameter. Must render something sensible even when no data files
/// are present, so every record lookup here is optional.
pub struct ErrorController {
    base: PageController,
    cache_busting: bool,
}

impl ErrorController {
    pub fn new(model: Model, view: View, config: &AppConfig) -> Self {
        Self {
            base: PageController::new(model, view),
            cache_busting: config.cache_busting,
        }
    }

    fn index(&mut self, parameters: &[String]) -> Result<String, FrameworkError> {
        let label = parameters
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_ERROR_LABEL);

        if let Some(template) = self.base.model().record("template").cloned() {
            let cache_buster = self.base.cache_buster(self.cache_busting, None);
            self.base.page_builder(&template, &cache_buster);
        }

        let (title, message) = if label == NOT_FOUND_LABEL {
            (
                "404 - Page Not Found".to_string(),
                "The page you requested does not exist.".to_string(),
            )
        } else {
            (
                label.to_string(),
                "An unexpected error occurred while serving your request.".to_string(),
            )
        };

        self.base.set_view_property("title", &title);
        self.base.set_view_property(
            "content",
            &format!("<h1>{title}</h1>\n<p>{message}</p>"),
        );

        Ok(self.base.render("error"))
    }
}

impl Controller for ErrorController {
    fn name(&self) -> &str {
        "error"
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
