// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-generation provider trait.

use async_trait::async_trait;

use crate::error::HushError;

/// Produces a text completion for a prompt.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generates a response for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, HushError>;
}
