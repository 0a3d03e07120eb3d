//! # Lantern
//!
//! A small MVC web application framework with flat-file storage.
//!
//! One request is one [`dispatcher::Application`] value: the front controller
//! normalizes the `url` query value into segments, resolves a controller
//! through the [`registry::ControllerRegistry`] (optionally gated by the
//! startup [`discovery`] scan), resolves a method and its parameters, and
//! invokes the controller, which pulls records from an eagerly loaded
//! [`model::Model`] and assembles HTML through a [`view::View`].
//!
//! ## Architecture
//!
//! - [`dispatcher`]: front controller with segment normalization, the
//!   resolution pipeline, and the error-controller fallback.
//! - [`factory`]: builds the per-request object graph (storage, logger,
//!   model, view, controller) from an [`config::AppConfig`] and a registry.
//! - [`registry`]: controller constructors, registered at startup.
//! - [`discovery`]: recursive controller scan that gates routability.
//! - [`storage`]: the [`storage::Storage`] trait with JSON and XML
//!   adapters over flat data files.
//! - [`model`] / [`view`] / [`controller`]: the MVC triple; built-in
//!   controllers live in [`controllers`].
//! - [`error_handler`]: top-level handling for errors the dispatch
//!   fallback does not absorb.
//!
//! Recoverable dispatch errors (unknown controller or method) rewrite the
//! in-flight dispatch to the error controller; storage and configuration
//! errors propagate as [`error::FrameworkError`] to the error handler.

pub mod config;
pub mod controller;
pub mod controllers;
pub mod discovery;
pub mod dispatcher;
pub mod email;
pub mod error;
pub mod error_handler;
pub mod factory;
pub mod keygen;
pub mod logger;
pub mod model;
pub mod registry;
pub mod storage;
pub mod view;

pub use config::AppConfig;
pub use dispatcher::Application;
pub use error::FrameworkError;
pub use factory::AppFactory;
pub use registry::{ControllerEntry, ControllerRegistry};
