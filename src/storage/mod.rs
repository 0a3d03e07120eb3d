//! # Storage Module
//!
//! Flat-file storage adapters behind the [`Storage`] trait.
//!
//! ## Overview
//!
//! The framework keeps no database; each logical data key is one file in a
//! data directory (`navigation.json`, `template.json`, …). An adapter decodes
//! every loaded file into an in-memory map of [`serde_json::Value`] records
//! keyed by file base name. The [`Model`](crate::model::Model) loads a whole
//! directory at construction and reads records from the adapter afterwards.
//!
//! ## Adapters
//!
//! - [`JsonStorage`]: `serde_json` decode/encode
//! - [`XmlStorage`]: `quick-xml` event decode; encoding is unsupported
//!
//! Both share the contract:
//!
//! - loading a missing file fails with [`FrameworkError::StorageFileMissing`],
//!   never silently yielding empty data
//! - malformed contents fail with [`FrameworkError::StorageDecode`]
//! - `"true"`/`"false"` convert to booleans, anything else fails with
//!   [`FrameworkError::BooleanConversion`]
//!
//! [`FrameworkError::StorageFileMissing`]: crate::error::FrameworkError::StorageFileMissing
//! [`FrameworkError::StorageDecode`]: crate::error::FrameworkError::StorageDecode
//! [`FrameworkError::BooleanConversion`]: crate::error::FrameworkError::BooleanConversion

mod core;
mod json;
mod xml;

pub use core::{string_as_bool, Storage, StorageType};
pub use json::JsonStorage;
pub use xml::XmlStorage;
