// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite queries for stored credentials.
//!
//! Records are immutable once written: there is no update path, and deletion
//! is an administrative operation outside the bot's command surface.

use hush_core::HushError;
use hush_core::types::{ChatId, Scope, UserId};
use rusqlite::params;
use tokio_rusqlite::Connection;
use tracing::debug;

/// A persisted credential. The password is stored only as the opaque
/// encrypted blob; the title and username are stored in clear by design.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub id: i64,
    pub scope: Scope,
    pub title: String,
    pub username: String,
    pub encrypted_password: String,
    pub created_at: String,
}

/// Query handle for the `credentials` table.
pub struct CredentialStore {
    conn: Connection,
}

impl CredentialStore {
    /// Wraps an existing migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Insert a new credential and return its id.
    pub async fn insert(
        &self,
        scope: Scope,
        title: &str,
        username: &str,
        encrypted_password: &str,
    ) -> Result<i64, HushError> {
        let title = title.to_string();
        let username = username.to_string();
        let encrypted_password = encrypted_password.to_string();

        let id = self
            .conn
            .call(move |conn| -> Result<i64, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO credentials (chat_id, user_id, title, username, encrypted_password)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        scope.chat_id.0,
                        scope.user_id.0,
                        title,
                        username,
                        encrypted_password
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(map_tr_err)?;

        debug!(%scope, id, "credential stored");
        Ok(id)
    }

    /// Fetch one credential by id, scoped to its owner.
    pub async fn get(&self, scope: Scope, id: i64) -> Result<Option<CredentialRecord>, HushError> {
        self.conn
            .call(move |conn| -> Result<Option<CredentialRecord>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, chat_id, user_id, title, username, encrypted_password, created_at
                     FROM credentials
                     WHERE chat_id = ?1 AND user_id = ?2 AND id = ?3",
                )?;
                let result = stmt.query_row(
                    params![scope.chat_id.0, scope.user_id.0, id],
                    row_to_credential,
                );
                match result {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
            .map_err(map_tr_err)
    }

    /// List all credentials in a scope, oldest first.
    pub async fn list(&self, scope: Scope) -> Result<Vec<CredentialRecord>, HushError> {
        self.conn
            .call(move |conn| -> Result<Vec<CredentialRecord>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, chat_id, user_id, title, username, encrypted_password, created_at
                     FROM credentials
                     WHERE chat_id = ?1 AND user_id = ?2
                     ORDER BY id",
                )?;
                let rows = stmt.query_map(
                    params![scope.chat_id.0, scope.user_id.0],
                    row_to_credential,
                )?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)
    }
}

fn row_to_credential(row: &rusqlite::Row) -> Result<CredentialRecord, rusqlite::Error> {
    Ok(CredentialRecord {
        id: row.get(0)?,
        scope: Scope {
            chat_id: ChatId(row.get(1)?),
            user_id: UserId(row.get(2)?),
        },
        title: row.get(3)?,
        username: row.get(4)?,
        encrypted_password: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Convert tokio-rusqlite errors to HushError::Storage.
fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HushError {
    HushError::Storage {
        source: Box::new(e),
    }
}
