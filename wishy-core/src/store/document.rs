//! Document payloads and snapshots.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{StoreError, StoreResult};
use super::path::DocPath;

/// A document body: a JSON object.
pub type Document = Map<String, Value>;

/// How `set` treats an existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetMode {
    /// Replace the whole document.
    #[default]
    Overwrite,
    /// Deep-merge nested maps into the existing document.
    Merge,
}

/// A document read back from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub path: DocPath,
    pub data: Document,
}

impl Snapshot {
    pub fn new(path: DocPath, data: Document) -> Self {
        Snapshot { path, data }
    }

    /// The document id.
    pub fn id(&self) -> &str {
        self.path.id()
    }

    /// Decodes the document into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> StoreResult<T> {
        decode(&self.data)
    }
}

/// Decodes a document into a typed model.
pub fn decode<T: DeserializeOwned>(doc: &Document) -> StoreResult<T> {
    serde_json::from_value(Value::Object(doc.clone())).map_err(StoreError::from)
}

/// Encodes a typed model as a document. Fails unless it serializes to an object.
pub fn encode<T: Serialize>(value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Serialization(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

/// Merges `source` into `target`. Nested objects merge recursively; arrays
/// and scalars are replaced.
pub fn merge_into(target: &mut Document, source: Document) {
    for (key, value) in source {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                merge_into(existing, incoming);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// Looks up a possibly dotted field path (`sender.uid`).
pub fn field<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let first = parts.next()?;
    let mut current = doc.get(first)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}
