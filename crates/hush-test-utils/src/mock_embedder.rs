// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock embedding provider with programmable, deterministic vectors.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use hush_core::HushError;
use hush_core::traits::Embedder;

/// Returns a fixed vector per exact input text, with a fallback default.
///
/// Tests program the table so that a "query" text and a "stored" text get
/// nearly parallel vectors (high cosine similarity) while unrelated texts get
/// orthogonal ones.
pub struct MockEmbedder {
    vectors: Mutex<HashMap<String, Vec<f32>>>,
    default: Vec<f32>,
    fail: std::sync::atomic::AtomicBool,
}

impl MockEmbedder {
    /// Creates a mock whose unknown inputs embed to `default`.
    pub fn new(default: Vec<f32>) -> Self {
        Self {
            vectors: Mutex::new(HashMap::new()),
            default,
            fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// Program the vector returned for an exact input text.
    pub fn set_embedding(&self, text: &str, vector: Vec<f32>) {
        self.vectors
            .lock()
            .expect("mock embedder table poisoned")
            .insert(text.to_string(), vector);
    }

    /// Make every subsequent `embed` fail with a provider error.
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, HushError> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(HushError::Provider {
                message: "mock embedding failure".to_string(),
                source: None,
            });
        }
        let table = self.vectors.lock().expect("mock embedder table poisoned");
        Ok(table.get(text).cloned().unwrap_or_else(|| self.default.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn programmed_text_gets_its_vector() {
        let embedder = MockEmbedder::new(vec![0.0, 0.0]);
        embedder.set_embedding("bake at 350", vec![1.0, 0.0]);

        assert_eq!(embedder.embed("bake at 350").await.unwrap(), vec![1.0, 0.0]);
        assert_eq!(embedder.embed("anything else").await.unwrap(), vec![0.0, 0.0]);
    }

    #[tokio::test]
    async fn fail_produces_provider_error() {
        let embedder = MockEmbedder::new(vec![0.0]);
        embedder.fail(true);
        assert!(matches!(
            embedder.embed("text").await,
            Err(HushError::Provider { .. })
        ));
    }
}
