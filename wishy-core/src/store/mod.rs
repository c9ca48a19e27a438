// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Document Store Module
//!
//! Abstraction over a hierarchical document database: documents addressed by
//! `collection/id/collection/id...` paths, with get/set/update/delete and
//! equality / array-contains queries over a single collection.
//!
//! Two backends ship with the crate: [`MemoryStore`] and [`SqliteStore`].

mod clock;
mod document;
mod error;
mod memory;
pub mod migration;
mod path;
mod query;
mod sqlite;

pub use clock::{Clock, ManualClock, SystemClock};
pub use document::{decode, encode, field, merge_into, Document, SetMode, Snapshot};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use path::{check_id, paths, CollectionPath, DocPath};
pub use query::{matches_all, Filter};
pub use sqlite::SqliteStore;

use async_trait::async_trait;

/// Async interface to the document store.
///
/// Every call is a suspension point; implementations must be safe to share
/// between concurrently running handlers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document.
    async fn get(&self, path: &DocPath) -> StoreResult<Option<Document>>;

    /// Writes a document, replacing or merging per `mode`.
    async fn set(&self, path: &DocPath, data: Document, mode: SetMode) -> StoreResult<()>;

    /// Deletes a document. Deleting a missing document succeeds.
    /// Subcollections are left untouched.
    async fn delete(&self, path: &DocPath) -> StoreResult<()>;

    /// Returns the direct children of `collection` matching all `filters`,
    /// ordered by path.
    async fn query(
        &self,
        collection: &CollectionPath,
        filters: &[Filter],
    ) -> StoreResult<Vec<Snapshot>>;

    /// Current server time in Unix seconds.
    fn server_time(&self) -> u64;

    /// Merges into an existing document; fails if it does not exist.
    async fn update(&self, path: &DocPath, data: Document) -> StoreResult<()> {
        if self.get(path).await?.is_none() {
            return Err(StoreError::NotFound(path.to_string()));
        }
        self.set(path, data, SetMode::Merge).await
    }

    /// Creates a document with a generated id.
    async fn add(&self, collection: &CollectionPath, data: Document) -> StoreResult<DocPath> {
        let path = collection.doc(&uuid::Uuid::new_v4().to_string());
        self.set(&path, data, SetMode::Overwrite).await?;
        Ok(path)
    }

    /// Lists every document in a collection.
    async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Snapshot>> {
        self.query(collection, &[]).await
    }
}
