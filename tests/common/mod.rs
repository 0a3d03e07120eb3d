//! Shared fixtures: a temp data directory seeded with JSON records, a
//! registry carrying the built-in controllers, and a factory over both.

use std::collections::HashMap;
use std::sync::Arc;

use lantern::controllers::{BlogController, ErrorController, HomeController};
use lantern::{AppConfig, AppFactory, ControllerEntry, ControllerRegistry};
use tempfile::TempDir;

pub struct Fixture {
    pub dir: TempDir,
    pub config: Arc<AppConfig>,
    pub factory: AppFactory,
}

/// Registry with the three built-in controllers.
pub fn builtin_registry() -> ControllerRegistry {
    let mut registry = ControllerRegistry::new();
    registry.register(
        "home",
        ControllerEntry::standard(|model, view, config| {
            Box::new(HomeController::new(model, view, config))
        }),
    );
    registry.register(
        "blog",
        ControllerEntry::standard(|model, view, config| {
            Box::new(BlogController::new(model, view, config))
        }),
    );
    registry.register(
        "error",
        ControllerEntry::standard(|model, view, config| {
            Box::new(ErrorController::new(model, view, config))
        }),
    );
    registry
}

/// Temp tree with a seeded JSON data directory and a factory over the
/// built-in registry. Logging is enabled so log-line assertions can read
/// the page-not-found file.
pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("json");
    std::fs::create_dir(&data).unwrap();

    std::fs::write(
        data.join("home.json"),
        r#"{"body": "<p>welcome home</p>"}"#,
    )
    .unwrap();
    std::fs::write(
        data.join("blog.json"),
        r#"{"posts": {"7": {"title": "Seventh", "body": "<p>post body</p>",
            "comments": ["first!"]}}}"#,
    )
    .unwrap();
    std::fs::write(
        data.join("navigation.json"),
        r#"{"header_nav": {"Home": {"is_anchor": false}, "Blog": {"is_anchor": false}}}"#,
    )
    .unwrap();
    std::fs::write(
        data.join("template.json"),
        r#"{"head": {"head_doc": {"title": "Fixture Site"}},
            "title_pages": {"home": "Fixture Site - Home"}}"#,
    )
    .unwrap();

    let config = Arc::new(AppConfig {
        json_path: data,
        log_dir: dir.path().join("logs"),
        logging_enabled: true,
        ..AppConfig::default()
    });

    let factory = AppFactory::new(
        "json",
        false,
        Arc::clone(&config),
        Arc::new(builtin_registry()),
    )
    .unwrap();

    Fixture {
        dir,
        config,
        factory,
    }
}

/// Query data carrying one `url` value.
pub fn query(url: &str) -> HashMap<String, String> {
    HashMap::from([("url".to_string(), url.to_string())])
}

/// Lines currently in the page-not-found log, empty when never written.
pub fn not_found_log_lines(fx: &Fixture) -> Vec<String> {
    let path = fx.config.log_dir.join("pageNotFoundLog.txt");
    match std::fs::read_to_string(path) {
        Ok(contents) => contents.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
