use super::core::Storage;
use crate::error::FrameworkError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// JSON storage adapter.
///
/// Decodes `.json` files with `serde_json` and keeps them keyed by file base
/// name. Encoding round-trips: any value this adapter decodes encodes back to
/// an equal value.
#[derive(Debug, Default)]
pub struct JsonStorage {
    records: BTreeMap<String, Value>,
}

impl JsonStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for JsonStorage {
    fn load_file(&mut self, path: &Path, key: &str) -> Result<(), FrameworkError> {
        if !path.exists() {
            return Err(FrameworkError::StorageFileMissing {
                path: path.to_path_buf(),
            });
        }

        let contents =
            std::fs::read_to_string(path).map_err(|err| FrameworkError::StorageDecode {
                format: "json",
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let value: Value =
            serde_json::from_str(&contents).map_err(|err| FrameworkError::StorageDecode {
                format: "json",
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        debug!(key = %key, path = %path.display(), "json file loaded");
        self.records.insert(key.to_string(), value);
        Ok(())
    }

    fn record(&self, key: &str) -> Option<&Value> {
        self.records.get(key)
    }

    fn all_records(&self) -> &BTreeMap<String, Value> {
        &self.records
    }

    fn encode(&self, value: &Value) -> Result<String, FrameworkError> {
        serde_json::to_string(value).map_err(|err| FrameworkError::StorageDecode {
            format: "json",
            path: Default::default(),
            reason: err.to_string(),
        })
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn loads_and_reads_back_a_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navigation.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(f, r#"{{"nav": {{"Home": {{"path": "home"}}}}}}"#).unwrap();

        let mut storage = JsonStorage::new();
        storage.load_file(&path, "navigation").unwrap();
        let record = storage.record("navigation").unwrap();
        assert_eq!(record["nav"]["Home"]["path"], "home");
    }

    #[test]
    fn missing_file_is_an_error_not_empty_data() {
        let mut storage = JsonStorage::new();
        let err = storage
            .load_file(Path::new("/no/such/file.json"), "nope")
            .unwrap_err();
        assert!(matches!(err, FrameworkError::StorageFileMissing { .. }));
        assert!(storage.record("nope").is_none());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut storage = JsonStorage::new();
        let err = storage.load_file(&path, "broken").unwrap_err();
        assert!(matches!(err, FrameworkError::StorageDecode { .. }));
    }

    #[test]
    fn encode_decode_round_trip() {
        let storage = JsonStorage::new();
        let original = json!({"a": ["1", "2"], "b": {"c": "true"}});
        let encoded = storage.encode(&original).unwrap();
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, original);
    }
}
