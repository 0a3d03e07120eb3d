use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lantern::controllers::{BlogController, ErrorController, HomeController};
use lantern::{AppConfig, AppFactory, Application, ControllerEntry, ControllerRegistry};

/// Dispatch one request and print the rendered page.
#[derive(Parser, Debug)]
#[command(name = "lantern", version, about)]
struct Cli {
    /// Request path, as the `url` query value (e.g. `blog/view/7`).
    #[arg(long, default_value = "")]
    url: String,

    /// Storage backend: `json` or `xml`.
    #[arg(long, default_value = "json")]
    storage: String,

    /// Directory of JSON data files.
    #[arg(long)]
    json_path: Option<PathBuf>,

    /// Directory of XML data files.
    #[arg(long)]
    xml_path: Option<PathBuf>,

    /// Directory log files are appended to.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Controller asset root; when given, startup discovery gates routing.
    #[arg(long)]
    controller_root: Option<PathBuf>,

    /// Attach the database collaborator to models.
    #[arg(long)]
    database: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(path) = cli.json_path {
        config.json_path = path;
    }
    if let Some(path) = cli.xml_path {
        config.xml_path = path;
    }
    if let Some(path) = cli.log_dir {
        config.log_dir = path;
    }
    if let Some(path) = cli.controller_root {
        config.controller_root = Some(path);
    }
    let config = Arc::new(config);

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
    let registry = Arc::new(registry);

    let factory = AppFactory::new(&cli.storage, cli.database, Arc::clone(&config), registry)?;

    let query: HashMap<String, String> = HashMap::from([("url".to_string(), cli.url)]);

    match Application::new(&factory, &query, &config.default_controller) {
        Ok(app) => println!("{}", app.body()),
        Err(err) => {
            let page = factory.make_error_handler().handle(&err);
            println!("{page}");
        }
    }

    Ok(())
}
