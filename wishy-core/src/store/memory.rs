//! In-memory document store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::clock::{Clock, SystemClock};
use super::document::{merge_into, Document, SetMode, Snapshot};
use super::error::StoreResult;
use super::path::{CollectionPath, DocPath};
use super::query::{matches_all, Filter};
use super::DocumentStore;

/// Document store held in an ordered map, keyed by full path.
pub struct MemoryStore {
    docs: RwLock<BTreeMap<DocPath, Document>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    /// Creates an empty store using wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store stamping documents with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        MemoryStore {
            docs: RwLock::new(BTreeMap::new()),
            clock,
        }
    }

    /// Returns the total number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocPath) -> StoreResult<Option<Document>> {
        Ok(self.docs.read().get(path).cloned())
    }

    async fn set(&self, path: &DocPath, data: Document, mode: SetMode) -> StoreResult<()> {
        let mut docs = self.docs.write();
        match (mode, docs.get_mut(path)) {
            (SetMode::Merge, Some(existing)) => merge_into(existing, data),
            _ => {
                docs.insert(path.clone(), data);
            }
        }
        Ok(())
    }

    async fn delete(&self, path: &DocPath) -> StoreResult<()> {
        self.docs.write().remove(path);
        Ok(())
    }

    async fn query(
        &self,
        collection: &CollectionPath,
        filters: &[Filter],
    ) -> StoreResult<Vec<Snapshot>> {
        let docs = self.docs.read();
        Ok(docs
            .iter()
            .filter(|(path, doc)| collection.contains(path) && matches_all(filters, doc))
            .map(|(path, doc)| Snapshot::new(path.clone(), doc.clone()))
            .collect())
    }

    fn server_time(&self) -> u64 {
        self.clock.now()
    }
}
