// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and embedded
//! migrations.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use hush_core::HushError;
use tokio_rusqlite::Connection;
use tracing::{debug, info};

mod embedded {
    refinery::embed_migrations!("migrations");
}

/// An open, migrated SQLite database.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run any
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, HushError> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HushError::Storage {
                    source: Box::new(e),
                })?;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| HushError::Storage {
                source: Box::new(e),
            })?;
        Self::init(conn, path).await
    }

    /// Open a throwaway in-memory database. Used by tests.
    pub async fn open_in_memory() -> Result<Self, HushError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| HushError::Storage {
                source: Box::new(e),
            })?;
        Self::init(conn, ":memory:").await
    }

    async fn init(conn: Connection, path: &str) -> Result<Self, HushError> {
        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.pragma_update(None, "journal_mode", "WAL")?;
            conn.pragma_update(None, "synchronous", "NORMAL")?;
            conn.pragma_update(None, "foreign_keys", "ON")?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        let report = conn
            .call(|conn| -> Result<refinery::Report, refinery::Error> {
                embedded::migrations::runner().run(conn)
            })
            .await
            .map_err(|e| HushError::Storage {
                source: Box::new(e),
            })?;

        let applied = report.applied_migrations().len();
        if applied > 0 {
            info!(path, applied, "database migrations applied");
        } else {
            debug!(path, "database schema up to date");
        }

        Ok(Self { conn })
    }

    /// Returns the shared connection handle.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Convert tokio-rusqlite errors to HushError::Storage.
fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HushError {
    HushError::Storage {
        source: Box::new(e),
    }
}
