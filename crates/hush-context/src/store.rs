// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite queries for context entries with BLOB-encoded embedding vectors.

use hush_core::HushError;
use hush_core::types::{ChatId, Scope, UserId};
use rusqlite::params;
use tokio_rusqlite::Connection;
use tracing::debug;

use crate::types::{blob_to_vec, vec_to_blob, ContextEntry};

/// Query handle for the `contexts` table.
pub struct ContextStore {
    conn: Connection,
}

impl ContextStore {
    /// Wraps an existing migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Insert a new context entry and return its id.
    pub async fn insert(
        &self,
        scope: Scope,
        title: Option<&str>,
        content: &str,
        embedding: &[f32],
    ) -> Result<i64, HushError> {
        let title = title.map(str::to_string);
        let content = content.to_string();
        let embedding_blob = vec_to_blob(embedding);

        let id = self
            .conn
            .call(move |conn| -> Result<i64, rusqlite::Error> {
                conn.execute(
                    "INSERT INTO contexts (chat_id, user_id, title, content, embedding)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        scope.chat_id.0,
                        scope.user_id.0,
                        title,
                        content,
                        embedding_blob
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(map_tr_err)?;

        debug!(%scope, id, "context entry stored");
        Ok(id)
    }

    /// All entries in a scope, most recent first.
    pub async fn list(&self, scope: Scope) -> Result<Vec<ContextEntry>, HushError> {
        self.conn
            .call(move |conn| -> Result<Vec<ContextEntry>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, chat_id, user_id, title, content, embedding, created_at
                     FROM contexts
                     WHERE chat_id = ?1 AND user_id = ?2
                     ORDER BY id DESC",
                )?;
                let rows = stmt.query_map(
                    params![scope.chat_id.0, scope.user_id.0],
                    row_to_entry,
                )?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)
    }

    /// Lightweight (id, embedding) pairs for a scope, most recent first.
    ///
    /// The similarity ranking only needs vectors; full entries are fetched
    /// afterwards for the survivors.
    pub async fn embeddings(&self, scope: Scope) -> Result<Vec<(i64, Vec<f32>)>, HushError> {
        self.conn
            .call(move |conn| -> Result<Vec<(i64, Vec<f32>)>, rusqlite::Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, embedding FROM contexts
                     WHERE chat_id = ?1 AND user_id = ?2
                     ORDER BY id DESC",
                )?;
                let rows = stmt.query_map(params![scope.chat_id.0, scope.user_id.0], |row| {
                    let id: i64 = row.get(0)?;
                    let blob: Vec<u8> = row.get(1)?;
                    Ok((id, blob_to_vec(&blob)))
                })?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)
    }

    /// Batch fetch by id, scoped to the owner.
    pub async fn get_many(
        &self,
        scope: Scope,
        ids: &[i64],
    ) -> Result<Vec<ContextEntry>, HushError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let ids = ids.to_vec();
        self.conn
            .call(move |conn| -> Result<Vec<ContextEntry>, rusqlite::Error> {
                let placeholders: Vec<String> =
                    (3..ids.len() + 3).map(|i| format!("?{i}")).collect();
                let sql = format!(
                    "SELECT id, chat_id, user_id, title, content, embedding, created_at
                     FROM contexts
                     WHERE chat_id = ?1 AND user_id = ?2 AND id IN ({})",
                    placeholders.join(", ")
                );
                let mut stmt = conn.prepare(&sql)?;

                let mut bound: Vec<&dyn rusqlite::types::ToSql> =
                    vec![&scope.chat_id.0, &scope.user_id.0];
                bound.extend(ids.iter().map(|id| id as &dyn rusqlite::types::ToSql));

                let rows = stmt.query_map(bound.as_slice(), row_to_entry)?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)
    }
}

fn row_to_entry(row: &rusqlite::Row) -> Result<ContextEntry, rusqlite::Error> {
    let embedding_blob: Vec<u8> = row.get(5)?;
    Ok(ContextEntry {
        id: row.get(0)?,
        scope: Scope {
            chat_id: ChatId(row.get(1)?),
            user_id: UserId(row.get(2)?),
        },
        title: row.get(3)?,
        content: row.get(4)?,
        embedding: blob_to_vec(&embedding_blob),
        created_at: row.get(6)?,
    })
}

/// Convert tokio-rusqlite errors to HushError::Storage.
fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> HushError {
    HushError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hush_storage::Database;

    fn scope(chat: i64, user: i64) -> Scope {
        Scope::new(ChatId(chat), UserId(user))
    }

    async fn test_store() -> ContextStore {
        let db = Database::open_in_memory().await.unwrap();
        ContextStore::new(db.connection().clone())
    }

    #[tokio::test]
    async fn insert_and_list_most_recent_first() {
        let store = test_store().await;
        store
            .insert(scope(1, 2), Some("recipe"), "bake at 350", &[0.1, 0.2])
            .await
            .unwrap();
        store
            .insert(scope(1, 2), Some("wifi"), "password on the router", &[0.3, 0.4])
            .await
            .unwrap();

        let entries = store.list(scope(1, 2)).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("wifi"));
        assert_eq!(entries[1].title.as_deref(), Some("recipe"));
        assert_eq!(entries[1].embedding, vec![0.1, 0.2]);
    }

    #[tokio::test]
    async fn title_is_optional() {
        let store = test_store().await;
        store
            .insert(scope(1, 2), None, "untitled note", &[1.0])
            .await
            .unwrap();

        let entries = store.list(scope(1, 2)).await.unwrap();
        assert_eq!(entries[0].title, None);
        assert_eq!(entries[0].content, "untitled note");
    }

    #[tokio::test]
    async fn embeddings_are_scoped_and_recent_first() {
        let store = test_store().await;
        let a = store
            .insert(scope(1, 2), Some("a"), "aa", &[1.0, 0.0])
            .await
            .unwrap();
        let b = store
            .insert(scope(1, 2), Some("b"), "bb", &[0.0, 1.0])
            .await
            .unwrap();
        store
            .insert(scope(9, 9), Some("other"), "cc", &[0.5, 0.5])
            .await
            .unwrap();

        let embeddings = store.embeddings(scope(1, 2)).await.unwrap();
        assert_eq!(embeddings.len(), 2);
        assert_eq!(embeddings[0].0, b);
        assert_eq!(embeddings[1].0, a);
        assert_eq!(embeddings[0].1, vec![0.0, 1.0]);
    }

    #[tokio::test]
    async fn get_many_respects_scope() {
        let store = test_store().await;
        let a = store
            .insert(scope(1, 2), Some("a"), "aa", &[1.0])
            .await
            .unwrap();
        let foreign = store
            .insert(scope(9, 9), Some("x"), "xx", &[1.0])
            .await
            .unwrap();

        let entries = store.get_many(scope(1, 2), &[a, foreign]).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, a);
    }

    #[tokio::test]
    async fn get_many_empty_ids() {
        let store = test_store().await;
        assert!(store.get_many(scope(1, 2), &[]).await.unwrap().is_empty());
    }
}
