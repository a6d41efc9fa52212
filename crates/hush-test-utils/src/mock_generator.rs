// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock text-generation provider with canned responses and prompt capture.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hush_core::HushError;
use hush_core::traits::Generator;

/// Returns a fixed response and records every prompt it receives.
pub struct MockGenerator {
    response: String,
    prompts: Arc<Mutex<Vec<String>>>,
    fail: std::sync::atomic::AtomicBool,
}

impl MockGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
            fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    /// All prompts passed to `generate`, in order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    /// Make every subsequent `generate` fail with a provider error.
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, HushError> {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(HushError::Provider {
                message: "mock generation failure".to_string(),
                source: None,
            });
        }
        self.prompts.lock().await.push(prompt.to_string());
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn generate_returns_canned_response_and_records_prompt() {
        let generator = MockGenerator::new("canned answer");
        let out = generator.generate("what temperature?").await.unwrap();
        assert_eq!(out, "canned answer");
        assert_eq!(generator.prompts().await, vec!["what temperature?"]);
    }

    #[tokio::test]
    async fn fail_produces_provider_error() {
        let generator = MockGenerator::new("unused");
        generator.fail(true);
        assert!(matches!(
            generator.generate("prompt").await,
            Err(HushError::Provider { .. })
        ));
        assert!(generator.prompts().await.is_empty());
    }
}
