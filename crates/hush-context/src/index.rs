// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Similarity-ranked retrieval over stored context entries.
//!
//! Ranking runs in process: fetch the scope's embeddings, score each against
//! the query with cosine similarity, keep everything above the threshold,
//! then fetch full entries for the top k.

use std::collections::HashMap;
use std::sync::Arc;

use hush_core::HushError;
use hush_core::types::Scope;
use tracing::debug;

use crate::store::ContextStore;
use crate::types::{cosine_similarity, ContextEntry, ScoredContext};

/// Logical store of (text, embedding) pairs per scope with a
/// similarity-ranked query operation.
pub struct ContextIndex {
    store: Arc<ContextStore>,
}

impl ContextIndex {
    /// Creates an index over an existing context store.
    pub fn new(store: Arc<ContextStore>) -> Self {
        Self { store }
    }

    /// Append a new entry. No dedup, no re-embedding.
    pub async fn insert(
        &self,
        scope: Scope,
        title: Option<&str>,
        content: &str,
        embedding: &[f32],
    ) -> Result<i64, HushError> {
        self.store.insert(scope, title, content, embedding).await
    }

    /// Entries for the scope, most recent first, optionally filtered by a
    /// case-insensitive substring match on the title.
    ///
    /// An empty result is a valid outcome, not an error.
    pub async fn list_by_title(
        &self,
        scope: Scope,
        filter: Option<&str>,
    ) -> Result<Vec<ContextEntry>, HushError> {
        let entries = self.store.list(scope).await?;
        match filter {
            None => Ok(entries),
            Some(needle) => {
                let needle = needle.to_lowercase();
                Ok(entries
                    .into_iter()
                    .filter(|entry| {
                        entry
                            .title
                            .as_deref()
                            .is_some_and(|t| t.to_lowercase().contains(&needle))
                    })
                    .collect())
            }
        }
    }

    /// Rank the scope's entries by cosine similarity to `query_embedding`.
    ///
    /// Entries with similarity at or below `threshold` are discarded; the
    /// survivors are sorted by descending similarity (ties most-recent-first)
    /// and capped at `top_k`. An empty result means "no relevant context"
    /// and is a valid outcome.
    ///
    /// Entries whose stored vector length differs from the query are skipped:
    /// the comparison would be meaningless.
    pub async fn query_similar(
        &self,
        scope: Scope,
        query_embedding: &[f32],
        threshold: f32,
        top_k: usize,
    ) -> Result<Vec<ScoredContext>, HushError> {
        // Most-recent-first ordering from the store makes the stable sort
        // below break score ties in favor of newer entries.
        let embeddings = self.store.embeddings(scope).await?;

        let mut ranked: Vec<(i64, f32)> = embeddings
            .into_iter()
            .filter_map(|(id, embedding)| {
                if embedding.len() != query_embedding.len() {
                    debug!(
                        id,
                        stored = embedding.len(),
                        query = query_embedding.len(),
                        "skipping entry with mismatched embedding dimension"
                    );
                    return None;
                }
                let similarity = cosine_similarity(query_embedding, &embedding);
                (similarity > threshold).then_some((id, similarity))
            })
            .collect();

        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(top_k);

        if ranked.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i64> = ranked.iter().map(|(id, _)| *id).collect();
        let entries = self.store.get_many(scope, &ids).await?;
        let mut by_id: HashMap<i64, ContextEntry> =
            entries.into_iter().map(|e| (e.id, e)).collect();

        Ok(ranked
            .into_iter()
            .filter_map(|(id, score)| {
                by_id.remove(&id).map(|entry| ScoredContext { entry, score })
            })
            .collect())
    }
}
