// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schema migrations for the SQLite document store.
//!
//! Applied versions are recorded in `store_schema`. Everything pending is
//! applied in one transaction, so a failing step leaves the schema as it was.

use rusqlite::{params, Connection, OptionalExtension};

use super::StoreError;

/// One schema step.
pub struct Migration {
    /// Version reached after this step. Versions start at 1.
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

/// Applies [`Migration`]s to a connection.
pub struct MigrationRunner;

impl MigrationRunner {
    /// Brings the schema up to the last version in `migrations`.
    pub fn run(conn: &Connection, migrations: &[Migration]) -> Result<(), StoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS store_schema (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );",
        )?;

        let applied = Self::current_version(conn)?;
        let mut last = applied;
        let mut pending = Vec::new();
        for migration in migrations.iter().filter(|m| m.version > applied) {
            if migration.version <= last {
                return Err(StoreError::Migration(format!(
                    "v{} '{}' is out of order",
                    migration.version, migration.name
                )));
            }
            last = migration.version;
            pending.push(migration);
        }
        if pending.is_empty() {
            return Ok(());
        }

        let tx = conn.unchecked_transaction()?;
        for migration in pending {
            tx.execute_batch(migration.sql).map_err(|e| {
                StoreError::Migration(format!(
                    "v{} '{}' failed: {}",
                    migration.version, migration.name, e
                ))
            })?;
            tx.execute(
                "INSERT INTO store_schema (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// The highest applied version, 0 on a fresh database.
    pub fn current_version(conn: &Connection) -> Result<u32, StoreError> {
        let has_table = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'store_schema'",
                [],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !has_table {
            return Ok(0);
        }

        let version: Option<u32> =
            conn.query_row("SELECT MAX(version) FROM store_schema", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }
}

/// Documents keyed by full path, with the parent collection indexed for
/// direct-children queries.
const V1_DOCUMENTS: &str = "
CREATE TABLE IF NOT EXISTS documents (
    path TEXT PRIMARY KEY,
    collection TEXT NOT NULL,
    data_json TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
";

/// The document store schema, oldest first.
pub fn all_migrations() -> Vec<Migration> {
    vec![Migration {
        version: 1,
        name: "documents",
        sql: V1_DOCUMENTS,
    }]
}
