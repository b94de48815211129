use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub default_limit: usize,
    pub default_min_weight: f64,
    /// How many semantic candidates to score before merging.
    pub semantic_candidates: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_RETRIEVAL_LIMIT,
            default_min_weight: defaults::DEFAULT_MIN_WEIGHT,
            semantic_candidates: defaults::DEFAULT_SEMANTIC_CANDIDATES,
        }
    }
}
