//! HTTP completion provider (Ollama-style JSON API).

use std::time::Duration;

use jataka_core::errors::{JatakaResult, PipelineError};
use jataka_core::traits::{Completion, ICompletionProvider};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[serde(default)]
    prompt_eval_count: usize,
    #[serde(default)]
    eval_count: usize,
}

/// Completion provider backed by an HTTP endpoint.
pub struct HttpCompletionProvider {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
}

impl HttpCompletionProvider {
    pub fn new(endpoint: String, model: String) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint,
            model,
        }
    }
}

impl ICompletionProvider for HttpCompletionProvider {
    fn complete(&self, prompt: &str, max_tokens: usize) -> JatakaResult<Completion> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": { "num_predict": max_tokens },
            }))
            .send()
            .map_err(|e| PipelineError::ProviderFailure {
                reason: e.to_string(),
            })?
            .error_for_status()
            .map_err(|e| PipelineError::ProviderFailure {
                reason: e.to_string(),
            })?;

        let body: GenerateResponse =
            response.json().map_err(|e| PipelineError::ProviderFailure {
                reason: e.to_string(),
            })?;

        let tokens_used = body.prompt_eval_count + body.eval_count;
        debug!(model = %self.model, tokens_used, "completion received");

        Ok(Completion {
            text: body.response,
            tokens_used,
        })
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        // Availability is discovered per call; the chain treats a failed
        // call the same as an unavailable provider.
        true
    }
}
