//! Controller registry.
//!
//! The lookup table behind controller resolution: each routable name maps to
//! a [`ControllerEntry`], a triple of constructors for the controller and its
//! model/view counterparts. The table is populated once at startup; request
//! handling only ever performs map lookups, never directory walks or
//! name-to-type reflection. An absent name is a
//! [`FrameworkError::ControllerNotFound`].

use crate::config::AppConfig;
use crate::controller::Controller;
use crate::error::FrameworkError;
use crate::logger::Logger;
use crate::model::{Database, Model};
use crate::storage::Storage;
use crate::view::{AssetPaths, View};
use std::collections::HashMap;
use std::path::PathBuf;

/// Everything a model constructor needs: the dependencies the factory built
/// for this request plus the directory to eagerly load.
pub struct ModelSeed {
    pub storage: Box<dyn Storage>,
    pub logger: Logger,
    pub db: Option<Database>,
    pub data_dir: PathBuf,
}

pub type ModelCtor = Box<dyn Fn(ModelSeed) -> Result<Model, FrameworkError> + Send + Sync>;
pub type ViewCtor = Box<dyn Fn(&AppConfig) -> View + Send + Sync>;
pub type ControllerCtor =
    Box<dyn Fn(Model, View, &AppConfig) -> Box<dyn Controller> + Send + Sync>;

/// Constructor triple for one routable controller name.
pub struct ControllerEntry {
    pub make_model: ModelCtor,
    pub make_view: ViewCtor,
    pub make_controller: ControllerCtor,
}

impl std::fmt::Debug for ControllerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerEntry").finish_non_exhaustive()
    }
}

impl ControllerEntry {
    /// Entry with the standard model and view constructors; most controllers
    /// only customize the controller constructor.
    pub fn standard<F>(make_controller: F) -> Self
    where
        F: Fn(Model, View, &AppConfig) -> Box<dyn Controller> + Send + Sync + 'static,
    {
        Self {
            make_model: Box::new(|seed: ModelSeed| {
                Model::new(seed.storage, seed.logger, seed.db, &seed.data_dir)
            }),
            make_view: Box::new(|config| View::new(AssetPaths::from_config(config))),
            make_controller: Box::new(make_controller),
        }
    }

    pub fn with_model(mut self, make_model: ModelCtor) -> Self {
        self.make_model = make_model;
        self
    }

    pub fn with_view(mut self, make_view: ViewCtor) -> Self {
        self.make_view = make_view;
        self
    }
}

/// Name-to-constructor lookup table, populated at startup.
#[derive(Default)]
pub struct ControllerRegistry {
    entries: HashMap<String, ControllerEntry>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller under its routed name. Re-registering a name
    /// replaces the previous entry.
    pub fn register(&mut self, name: &str, entry: ControllerEntry) {
        self.entries.insert(name.to_string(), entry);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entry(&self, name: &str) -> Result<&ControllerEntry, FrameworkError> {
        self.entries
            .get(name)
            .ok_or_else(|| FrameworkError::ControllerNotFound {
                name: name.to_string(),
            })
    }

    /// Registered names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
