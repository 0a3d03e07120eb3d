//! Application factory.
//!
//! [`AppFactory`] wires a request's object graph: given a controller name it
//! builds the storage adapter, logger, optional database handle, and model,
//! builds the view, and hands all of it to the registry's controller
//! constructor. It also mints the shared-utility collaborators (logger,
//! mailer, error handler) so nothing else knows construction details.

use crate::config::AppConfig;
use crate::controller::Controller;
use crate::discovery::scan_controllers;
use crate::email::Mailer;
use crate::error::FrameworkError;
use crate::error_handler::ErrorHandler;
use crate::logger::Logger;
use crate::model::Database;
use crate::registry::{ControllerRegistry, ModelSeed};
use crate::storage::StorageType;
use crate::view::View;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub struct AppFactory {
    storage_type: StorageType,
    has_database: bool,
    config: Arc<AppConfig>,
    registry: Arc<ControllerRegistry>,
    /// Names found by the startup discovery scan; `None` when no controller
    /// root is configured and the registry alone decides routability.
    discovered: Option<BTreeSet<String>>,
}

impl std::fmt::Debug for AppFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppFactory")
            .field("storage_type", &self.storage_type)
            .field("has_database", &self.has_database)
            .field("config", &self.config)
            .field("discovered", &self.discovered)
            .finish_non_exhaustive()
    }
}

impl AppFactory {
    /// Build a factory for the given storage-type selector (`"json"` or
    /// `"xml"`, case-insensitive) and database flag.
    ///
    /// When the configuration names a controller root, the discovery scan
    /// runs here, once; an unreadable root fails construction.
    pub fn new(
        storage_type: &str,
        has_database: bool,
        config: Arc<AppConfig>,
        registry: Arc<ControllerRegistry>,
    ) -> Result<Self, FrameworkError> {
        let storage_type: StorageType = storage_type.parse()?;

        let discovered = match config.controller_root.as_deref() {
            Some(root) => {
                let names = scan_controllers(root, &config.excluded_controller_dir)?;
                info!(
                    root = %root.display(),
                    discovered = names.len(),
                    "controller discovery complete"
                );
                Some(names)
            }
            None => None,
        };

        Ok(Self {
            storage_type,
            has_database,
            config,
            registry,
            discovered,
        })
    }

    pub fn storage_type(&self) -> StorageType {
        self.storage_type
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether a URL segment may resolve to this name: it must be registered
    /// and, when discovery ran, also present on disk.
    pub fn is_routable(&self, name: &str) -> bool {
        let registered = self.registry.contains(name);
        match &self.discovered {
            Some(names) => registered && names.contains(name),
            None => registered,
        }
    }

    /// Build the controller with its full dependency graph: storage adapter,
    /// logger, optional database, eagerly loaded model, and view.
    pub fn make_controller(&self, name: &str) -> Result<Box<dyn Controller>, FrameworkError> {
        let entry = self.registry.entry(name)?;

        let model = (entry.make_model)(ModelSeed {
            storage: self.storage_type.make_storage(),
            logger: self.make_logger(),
            db: self.make_database(),
            data_dir: self.data_dir(),
        })?;
        let view: View = (entry.make_view)(&self.config);

        Ok((entry.make_controller)(model, view, &self.config))
    }

    pub fn make_logger(&self) -> Logger {
        Logger::new(self.config.logging_enabled, &self.config.log_dir)
    }

    pub fn make_mailer(&self) -> Mailer {
        Mailer::new(
            self.config.log_dir.join("outbox"),
            self.config.production,
        )
    }

    /// The top-level handler for propagated errors. Carries its own fresh
    /// logger so handled errors self-log.
    pub fn make_error_handler(&self) -> ErrorHandler {
        ErrorHandler::new(self.make_logger(), self.make_mailer(), Arc::clone(&self.config))
    }

    fn make_database(&self) -> Option<Database> {
        if self.has_database {
            Some(Database::new(format!("file://{}", self.config.domain_name)))
        } else {
            None
        }
    }

    fn data_dir(&self) -> PathBuf {
        match self.storage_type {
            StorageType::Json => self.config.json_path.clone(),
            StorageType::Xml => self.config.xml_path.clone(),
        }
    }
}
