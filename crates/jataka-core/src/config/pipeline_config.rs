use serde::{Deserialize, Serialize};

use super::defaults;

/// Orchestration pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Token budget per run.
    pub token_budget: usize,
    /// Cap for the Synthesizer's single generation call.
    pub synthesis_max_tokens: usize,
    /// Cap for each per-domain Predictor call.
    pub prediction_max_tokens: usize,
    /// Completion provider endpoint.
    pub completion_endpoint: String,
    /// Model name sent to the completion provider.
    pub completion_model: String,
    /// Target rule count for stats coverage reporting.
    pub coverage_target: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            token_budget: defaults::DEFAULT_TOKEN_BUDGET,
            synthesis_max_tokens: defaults::DEFAULT_SYNTHESIS_MAX_TOKENS,
            prediction_max_tokens: defaults::DEFAULT_PREDICTION_MAX_TOKENS,
            completion_endpoint: defaults::DEFAULT_COMPLETION_ENDPOINT.to_string(),
            completion_model: defaults::DEFAULT_COMPLETION_MODEL.to_string(),
            coverage_target: defaults::DEFAULT_COVERAGE_TARGET,
        }
    }
}
