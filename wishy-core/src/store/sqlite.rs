// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! SQLite-backed document store.
//!
//! Every document is one row keyed by its full path; the parent collection
//! is indexed so collection queries only scan direct children. Filters are
//! applied to the decoded JSON after the collection scan.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use super::clock::{Clock, SystemClock};
use super::document::{merge_into, Document, SetMode, Snapshot};
use super::error::{StoreError, StoreResult};
use super::migration;
use super::path::{CollectionPath, DocPath};
use super::query::{matches_all, Filter};
use super::DocumentStore;

/// Document store persisted in a local SQLite database.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    clock: Arc<dyn Clock>,
}

impl SqliteStore {
    /// Opens or creates a store database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?, Arc::new(SystemClock))
    }

    /// Creates an in-memory store (for testing).
    pub fn in_memory(clock: Arc<dyn Clock>) -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?, clock)
    }

    fn from_connection(conn: Connection, clock: Arc<dyn Clock>) -> StoreResult<Self> {
        migration::MigrationRunner::run(&conn, &migration::all_migrations())?;
        Ok(SqliteStore {
            conn: Mutex::new(conn),
            clock,
        })
    }

    /// Returns the current schema version.
    pub fn schema_version(&self) -> StoreResult<u32> {
        migration::MigrationRunner::current_version(&self.conn.lock())
    }

    fn load(conn: &Connection, path: &DocPath) -> StoreResult<Option<Document>> {
        let json: Option<String> = conn
            .query_row(
                "SELECT data_json FROM documents WHERE path = ?1",
                params![path.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        json.map(|j| serde_json::from_str(&j).map_err(StoreError::from))
            .transpose()
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, path: &DocPath) -> StoreResult<Option<Document>> {
        Self::load(&self.conn.lock(), path)
    }

    async fn set(&self, path: &DocPath, data: Document, mode: SetMode) -> StoreResult<()> {
        let conn = self.conn.lock();
        let data = match mode {
            SetMode::Overwrite => data,
            SetMode::Merge => match Self::load(&conn, path)? {
                Some(mut existing) => {
                    merge_into(&mut existing, data);
                    existing
                }
                None => data,
            },
        };
        let json = serde_json::to_string(&data)?;

        conn.execute(
            "INSERT OR REPLACE INTO documents (path, collection, data_json, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                path.as_str(),
                path.parent().as_str(),
                json,
                self.clock.now() as i64
            ],
        )?;
        Ok(())
    }

    async fn delete(&self, path: &DocPath) -> StoreResult<()> {
        self.conn
            .lock()
            .execute("DELETE FROM documents WHERE path = ?1", params![path.as_str()])?;
        Ok(())
    }

    async fn query(
        &self,
        collection: &CollectionPath,
        filters: &[Filter],
    ) -> StoreResult<Vec<Snapshot>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT path, data_json FROM documents WHERE collection = ?1 ORDER BY path",
        )?;
        let rows = stmt.query_map(params![collection.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut snapshots = Vec::new();
        for row in rows {
            let (path, json) = row?;
            let data: Document = serde_json::from_str(&json)?;
            if matches_all(filters, &data) {
                snapshots.push(Snapshot::new(DocPath::parse(&path)?, data));
            }
        }
        Ok(snapshots)
    }

    fn server_time(&self) -> u64 {
        self.clock.now()
    }
}
