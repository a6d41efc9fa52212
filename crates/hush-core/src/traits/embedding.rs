// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding provider trait.

use async_trait::async_trait;

use crate::error::HushError;

/// Converts text into a fixed-length vector for semantic search.
///
/// The dimensionality is constant for a given deployment; stored vectors and
/// query vectors must come from the same model to be comparable.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds a single text into a vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, HushError>;
}
