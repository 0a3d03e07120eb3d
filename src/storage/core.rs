use crate::error::FrameworkError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Keyed flat-file store.
///
/// Implementations decode files of one format into [`serde_json::Value`]
/// records held in memory. Keys are file base names; insertion order is
/// irrelevant and keys are unique (a reload overwrites).
pub trait Storage {
    /// Decode `path` and store its contents under `key`.
    fn load_file(&mut self, path: &Path, key: &str) -> Result<(), FrameworkError>;

    /// One decoded record by key.
    fn record(&self, key: &str) -> Option<&Value>;

    /// Every decoded record.
    fn all_records(&self) -> &BTreeMap<String, Value>;

    /// Encode a value into this adapter's storage format.
    fn encode(&self, value: &Value) -> Result<String, FrameworkError>;

    /// File extension (without the leading dot) this adapter loads.
    fn extension(&self) -> &'static str;
}

/// Convert a pseudo-boolean string to a real boolean.
///
/// Only the exact strings `"true"` and `"false"` convert; anything else is a
/// [`FrameworkError::BooleanConversion`].
pub fn string_as_bool(value: &str) -> Result<bool, FrameworkError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(FrameworkError::BooleanConversion {
            value: other.to_string(),
        }),
    }
}

/// Storage format selector, parsed case-insensitively from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    Json,
    Xml,
}

impl StorageType {
    pub fn extension(self) -> &'static str {
        match self {
            StorageType::Json => "json",
            StorageType::Xml => "xml",
        }
    }

    /// Build a fresh adapter of this type.
    pub fn make_storage(self) -> Box<dyn Storage> {
        match self {
            StorageType::Json => Box::new(super::JsonStorage::new()),
            StorageType::Xml => Box::new(super::XmlStorage::new()),
        }
    }
}

impl FromStr for StorageType {
    type Err = FrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(StorageType::Json),
            "xml" => Ok(StorageType::Xml),
            other => Err(FrameworkError::UnknownDispatch(format!(
                "unknown storage type `{other}`"
            ))),
        }
    }
}
