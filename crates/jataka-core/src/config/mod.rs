//! Per-subsystem configuration, loadable from TOML.
//!
//! Every struct has serde defaults so a partial config file is valid.

mod cache_config;
mod defaults;
mod embedding_config;
mod pipeline_config;
mod retrieval_config;
mod storage_config;

pub use cache_config::CacheConfig;
pub use embedding_config::EmbeddingConfig;
pub use pipeline_config::PipelineConfig;
pub use retrieval_config::RetrievalConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{JatakaError, JatakaResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JatakaConfig {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub retrieval: RetrievalConfig,
    pub cache: CacheConfig,
    pub pipeline: PipelineConfig,
}

impl JatakaConfig {
    /// Parse a TOML document. Missing sections fall back to defaults.
    pub fn from_toml(text: &str) -> JatakaResult<Self> {
        toml::from_str(text).map_err(|e| JatakaError::Config {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = JatakaConfig::from_toml("").unwrap();
        assert_eq!(config.retrieval.default_limit, 10);
        assert_eq!(config.pipeline.token_budget, 8000);
    }

    #[test]
    fn partial_toml_overrides_one_section() {
        let config = JatakaConfig::from_toml(
            "[pipeline]\ntoken_budget = 2000\n",
        )
        .unwrap();
        assert_eq!(config.pipeline.token_budget, 2000);
        assert_eq!(config.retrieval.default_limit, 10);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(JatakaConfig::from_toml("pipeline = nonsense").is_err());
    }
}
