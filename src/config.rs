//! Application configuration.
//!
//! [`AppConfig`] collects every deployment-specific value the framework
//! consumes: data and log directories, the optional controller root used by
//! startup discovery, asset path prefixes the view builders prepend to
//! internal links, and the mode flags. Construct it directly, start from
//! [`AppConfig::default`], or overlay environment variables with
//! [`AppConfig::from_env`].
//!
//! ## Environment variables
//!
//! | variable                   | field                     |
//! |----------------------------|---------------------------|
//! | `LANTERN_JSON_PATH`        | `json_path`               |
//! | `LANTERN_XML_PATH`         | `xml_path`                |
//! | `LANTERN_LOG_DIR`          | `log_dir`                 |
//! | `LANTERN_CONTROLLER_ROOT`  | `controller_root`         |
//! | `LANTERN_EXCLUDED_DIR`     | `excluded_controller_dir` |
//! | `LANTERN_DEFAULT_CONTROLLER` | `default_controller`    |
//! | `LANTERN_HTTP_ROOT`        | `http_root`               |
//! | `LANTERN_EMAIL_ADDRESS`    | `email_address`           |
//! | `LANTERN_DOMAIN`           | `domain_name`             |
//! | `LANTERN_LOGGING`          | `logging_enabled` (`0`/`false` disable) |
//! | `LANTERN_PRODUCTION`       | `production`              |
//! | `LANTERN_CACHE_BUSTING`    | `cache_busting`           |

use crate::dispatcher::EXCLUDED_CONTROLLER_DIR;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `.json` data files, loaded eagerly at model build.
    pub json_path: PathBuf,
    /// Directory holding `.xml` data files.
    pub xml_path: PathBuf,
    /// Directory the [`Logger`](crate::logger::Logger) appends log files to.
    pub log_dir: PathBuf,
    /// Root of the controller asset tree. When set, startup discovery scans
    /// it and only names found on disk stay routable.
    pub controller_root: Option<PathBuf>,
    /// Subdirectory name skipped by controller discovery.
    pub excluded_controller_dir: String,
    /// Controller resolved when the URL carries no first segment.
    pub default_controller: String,
    /// Absolute URL prefix for internal anchors.
    pub http_root: String,
    /// Path prefix for stylesheet links.
    pub css_path: String,
    /// Path prefix for script tags.
    pub js_path: String,
    /// Path prefix for image sources (logo, favicon).
    pub images_path: String,
    /// Notification address used by the error handler and email passthroughs.
    pub email_address: String,
    /// Site domain, used in notification subjects.
    pub domain_name: String,
    /// Master switch for file logging.
    pub logging_enabled: bool,
    /// Production mode gates real email delivery.
    pub production: bool,
    /// Whether cache-busting query strings are appended to includes.
    pub cache_busting: bool,
    /// Location of the static friendly error page referenced after a fatal
    /// failure.
    pub error_page_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            json_path: PathBuf::from("data/json"),
            xml_path: PathBuf::from("data/xml"),
            log_dir: PathBuf::from("logs"),
            controller_root: None,
            excluded_controller_dir: EXCLUDED_CONTROLLER_DIR.to_string(),
            default_controller: "home".to_string(),
            http_root: "/".to_string(),
            css_path: "/assets/css".to_string(),
            js_path: "/assets/js".to_string(),
            images_path: "/assets/images".to_string(),
            email_address: "webmaster@localhost".to_string(),
            domain_name: "localhost".to_string(),
            logging_enabled: true,
            production: false,
            cache_busting: false,
            error_page_path: "/error.html".to_string(),
        }
    }
}

impl AppConfig {
    /// Default configuration with `LANTERN_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("LANTERN_JSON_PATH") {
            cfg.json_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("LANTERN_XML_PATH") {
            cfg.xml_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("LANTERN_LOG_DIR") {
            cfg.log_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("LANTERN_CONTROLLER_ROOT") {
            cfg.controller_root = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("LANTERN_EXCLUDED_DIR") {
            cfg.excluded_controller_dir = v;
        }
        if let Ok(v) = std::env::var("LANTERN_DEFAULT_CONTROLLER") {
            cfg.default_controller = v;
        }
        if let Ok(v) = std::env::var("LANTERN_HTTP_ROOT") {
            cfg.http_root = v;
        }
        if let Ok(v) = std::env::var("LANTERN_EMAIL_ADDRESS") {
            cfg.email_address = v;
        }
        if let Ok(v) = std::env::var("LANTERN_DOMAIN") {
            cfg.domain_name = v;
        }
        if let Ok(v) = std::env::var("LANTERN_LOGGING") {
            cfg.logging_enabled = parse_flag(&v);
        }
        if let Ok(v) = std::env::var("LANTERN_PRODUCTION") {
            cfg.production = parse_flag(&v);
        }
        if let Ok(v) = std::env::var("LANTERN_CACHE_BUSTING") {
            cfg.cache_busting = parse_flag(&v);
        }

        cfg
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim(), "" | "0" | "false" | "off" | "no")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_excluded_dir_matches_constant() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.excluded_controller_dir, EXCLUDED_CONTROLLER_DIR);
        assert_eq!(cfg.default_controller, "home");
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }
}
