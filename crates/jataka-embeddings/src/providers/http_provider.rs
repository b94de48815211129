//! HTTP embedding provider (Ollama-style JSON API).

use std::time::Duration;

use jataka_core::errors::{EmbeddingError, JatakaResult};
use jataka_core::traits::IEmbeddingProvider;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// Embedding provider backed by an HTTP endpoint.
pub struct HttpEmbeddingProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    model_name: String,
    model_version: String,
    dimensions: usize,
}

impl HttpEmbeddingProvider {
    pub fn new(
        endpoint: String,
        model_name: String,
        model_version: String,
        dimensions: usize,
    ) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint,
            model_name,
            model_version,
            dimensions,
        }
    }
}

impl IEmbeddingProvider for HttpEmbeddingProvider {
    fn embed(&self, text: &str) -> JatakaResult<Vec<f32>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "model": self.model_name,
                "prompt": text,
            }))
            .send()
            .map_err(|e| EmbeddingError::RequestFailed {
                reason: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| EmbeddingError::RequestFailed {
                reason: e.to_string(),
            })?;

        let body: EmbedResponse =
            response
                .json()
                .map_err(|e| EmbeddingError::RequestFailed {
                    reason: e.to_string(),
                })?;

        if body.embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: body.embedding.len(),
            }
            .into());
        }

        debug!(model = %self.model_name, dims = body.embedding.len(), "embedded text");
        Ok(body.embedding)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_version(&self) -> &str {
        &self.model_version
    }

    fn name(&self) -> &str {
        "http-embedding"
    }

    fn is_available(&self) -> bool {
        // Availability is discovered per call; the degradation chain
        // treats a failed call the same as an unavailable provider.
        true
    }
}
