use super::core::Storage;
use crate::error::FrameworkError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// XML storage adapter.
///
/// Decodes `.xml` files into the same record shape as the JSON adapter:
/// elements with child elements become objects, repeated sibling names
/// become arrays, and text-only elements become strings. The document root
/// tag is dropped so a record is the map of the root's children.
///
/// Encoding is not implemented for XML; use the JSON adapter where encoding
/// is required.
#[derive(Debug, Default)]
pub struct XmlStorage {
    records: BTreeMap<String, Value>,
}

impl XmlStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for XmlStorage {
    fn load_file(&mut self, path: &Path, key: &str) -> Result<(), FrameworkError> {
        if !path.exists() {
            return Err(FrameworkError::StorageFileMissing {
                path: path.to_path_buf(),
            });
        }

        let contents =
            std::fs::read_to_string(path).map_err(|err| FrameworkError::StorageDecode {
                format: "xml",
                path: path.to_path_buf(),
                reason: err.to_string(),
            })?;

        let value = decode_document(&contents).map_err(|reason| FrameworkError::StorageDecode {
            format: "xml",
            path: path.to_path_buf(),
            reason,
        })?;

        debug!(key = %key, path = %path.display(), "xml file loaded");
        self.records.insert(key.to_string(), value);
        Ok(())
    }

    fn record(&self, key: &str) -> Option<&Value> {
        self.records.get(key)
    }

    fn all_records(&self) -> &BTreeMap<String, Value> {
        &self.records
    }

    fn encode(&self, _value: &Value) -> Result<String, FrameworkError> {
        Err(FrameworkError::EncodingUnsupported { format: "xml" })
    }

    fn extension(&self) -> &'static str {
        "xml"
    }
}

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

/// Decode a whole XML document into a record value, dropping the root tag.
fn decode_document(contents: &str) -> Result<Value, String> {
    let mut reader = Reader::from_str(contents);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                stack.push(Frame {
                    name,
                    children: Map::new(),
                    text: String::new(),
                });
            }
            Event::Empty(empty) => {
                let name = String::from_utf8_lossy(empty.name().as_ref()).into_owned();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, &name, Value::String(String::new())),
                    None => root = Some(Value::String(String::new())),
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame
                        .text
                        .push_str(text.unescape().map_err(|e| e.to_string())?.as_ref());
                }
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| "unbalanced end tag".to_string())?;
                let value = if frame.children.is_empty() {
                    Value::String(frame.text)
                } else {
                    Value::Object(frame.children)
                };

                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, &frame.name, value),
                    None => root = Some(value),
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions carry no data.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err("unexpected end of document".to_string());
    }
    root.ok_or_else(|| "document has no root element".to_string())
}

/// Repeated sibling names collapse into an array, preserving order.
fn insert_child(children: &mut Map<String, Value>, name: &str, value: Value) {
    match children.get_mut(name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(xml: &str) -> Value {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xml");
        std::fs::write(&path, xml).unwrap();
        let mut storage = XmlStorage::new();
        storage.load_file(&path, "data").unwrap();
        storage.record("data").cloned().unwrap()
    }

    #[test]
    fn nested_elements_become_objects() {
        let value = load("<site><nav><home>Home</home><about>About</about></nav></site>");
        assert_eq!(value["nav"]["home"], "Home");
        assert_eq!(value["nav"]["about"], "About");
    }

    #[test]
    fn repeated_siblings_become_arrays() {
        let value = load("<list><item>a</item><item>b</item><item>c</item></list>");
        assert_eq!(value["item"], serde_json::json!(["a", "b", "c"]));
    }

    #[test]
    fn malformed_xml_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, "<open><unclosed></open>").unwrap();

        let mut storage = XmlStorage::new();
        let err = storage.load_file(&path, "broken").unwrap_err();
        assert!(matches!(err, FrameworkError::StorageDecode { .. }));
    }

    #[test]
    fn encoding_is_unsupported() {
        let storage = XmlStorage::new();
        let err = storage.encode(&Value::Null).unwrap_err();
        assert!(matches!(err, FrameworkError::EncodingUnsupported { .. }));
        assert_eq!(err.code(), 1002);
    }
}
