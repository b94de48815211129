use serde::{Deserialize, Serialize};

/// A stored embedding for one rule.
///
/// One active embedding per rule per model version; regenerated when the
/// model version changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEmbedding {
    pub rule_id: String,
    pub vector: Vec<f32>,
    pub model_version: String,
}

impl RuleEmbedding {
    pub fn new(rule_id: impl Into<String>, vector: Vec<f32>, model_version: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            vector,
            model_version: model_version.into(),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}
