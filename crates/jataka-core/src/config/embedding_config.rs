use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Provider selector: "http" or "hashed" (deterministic fallback).
    pub provider: String,
    pub dimensions: usize,
    /// Version tag stored with every embedding.
    pub model_version: String,
    /// HTTP provider endpoint.
    pub endpoint: String,
    /// Model name sent to the HTTP provider.
    pub model_name: String,
    /// L1 cache capacity (entries).
    pub cache_size: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            model_version: defaults::DEFAULT_EMBEDDING_MODEL_VERSION.to_string(),
            endpoint: defaults::DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            model_name: "nomic-embed-text".to_string(),
            cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
