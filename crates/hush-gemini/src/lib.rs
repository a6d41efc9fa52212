// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-generation provider over the Gemini generateContent API.

use std::time::Duration;

use async_trait::async_trait;
use hush_core::HushError;
use hush_core::traits::Generator;
use serde::Deserialize;
use tracing::debug;

/// Request timeout for generation calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP client for the Gemini generateContent endpoint.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiGenerator {
    /// Creates a new generator client.
    ///
    /// `api_base` has no trailing slash, e.g.
    /// `https://generativelanguage.googleapis.com`.
    pub fn new(api_key: &str, model: String, api_base: String) -> Result<Self, HushError> {
        if api_key.is_empty() {
            return Err(HushError::Config(
                "gemini.api_key is required for /getcontext".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HushError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model,
            api_base,
        })
    }
}

#[async_trait]
impl Generator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, HushError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );
        let body = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| HushError::Provider {
                message: format!("generation request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HushError::Provider {
                message: format!("generation API returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: GenerateResponse =
            response.json().await.map_err(|e| HushError::Provider {
                message: format!("malformed generation response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let text: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(HushError::Provider {
                message: "generation response contained no text".into(),
                source: None,
            });
        }

        debug!(model = %self.model, chars = text.len(), "generation completed");
        Ok(text)
    }
}
