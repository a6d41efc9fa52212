// SPDX-FileCopyrightText: 2026 Hush Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding provider over the Voyage AI embeddings API.
//!
//! Implements [`Embedder`] with a single-text request per call. The model's
//! output dimensionality is fixed per deployment, which keeps stored and
//! query vectors comparable.

use std::time::Duration;

use async_trait::async_trait;
use hush_core::HushError;
use hush_core::traits::Embedder;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::debug;

/// Request timeout for embedding calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Voyage embeddings endpoint.
#[derive(Debug, Clone)]
pub struct VoyageEmbedder {
    client: reqwest::Client,
    model: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl VoyageEmbedder {
    /// Creates a new embedder client.
    ///
    /// `api_base` has no trailing slash, e.g. `https://api.voyageai.com`.
    pub fn new(api_key: &str, model: String, api_base: String) -> Result<Self, HushError> {
        if api_key.is_empty() {
            return Err(HushError::Config(
                "voyage.api_key is required for context commands".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| HushError::Config(format!("invalid API key header value: {e}")))?;
        headers.insert("authorization", auth);
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HushError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            api_base,
        })
    }
}

#[async_trait]
impl Embedder for VoyageEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, HushError> {
        let url = format!("{}/v1/embeddings", self.api_base);
        let body = serde_json::json!({
            "input": text,
            "model": self.model,
            "input_type": "text",
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| HushError::Provider {
                message: format!("embedding request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HushError::Provider {
                message: format!("embedding API returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: EmbeddingResponse =
            response.json().await.map_err(|e| HushError::Provider {
                message: format!("malformed embedding response: {e}"),
                source: Some(Box::new(e)),
            })?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| HushError::Provider {
                message: "embedding response contained no vectors".into(),
                source: None,
            })?;

        debug!(model = %self.model, dimensions = embedding.len(), "embedding generated");
        Ok(embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn embedder_for(server: &MockServer) -> VoyageEmbedder {
        VoyageEmbedder::new("vk-test", "voyage-3".into(), server.uri()).unwrap()
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = VoyageEmbedder::new("", "voyage-3".into(), "http://localhost".into());
        assert!(matches!(result, Err(HushError::Config(_))));
    }

    #[tokio::test]
    async fn embed_parses_vector_from_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("authorization", "Bearer vk-test"))
            .and(body_partial_json(serde_json::json!({
                "input": "bake at 350",
                "model": "voyage-3",
                "input_type": "text",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"embedding": [0.1, 0.2, 0.3], "index": 0}],
                "model": "voyage-3",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let embedder = embedder_for(&server).await;
        let vector = embedder.embed("bake at 350").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn error_status_maps_to_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broken"))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server).await;
        let err = embedder.embed("text").await.unwrap_err();
        assert!(matches!(err, HushError::Provider { .. }));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn empty_data_array_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": [], "model": "voyage-3"})),
            )
            .mount(&server)
            .await;

        let embedder = embedder_for(&server).await;
        let err = embedder.embed("text").await.unwrap_err();
        assert!(err.to_string().contains("no vectors"));
    }
}
