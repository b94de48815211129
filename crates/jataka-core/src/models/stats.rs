use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate counts over the rule store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleStats {
    pub total_rules: usize,
    pub rules_with_embeddings: usize,
    pub symbolic_key_count: usize,
    /// Active rule count per domain, sorted by domain name.
    pub by_domain: BTreeMap<String, usize>,
    /// total_rules / configured target, as a percentage capped at 100.
    pub coverage_pct: f64,
}

impl RuleStats {
    /// Compute coverage against a configured target rule count.
    pub fn with_coverage_target(mut self, target: usize) -> Self {
        self.coverage_pct = if target == 0 {
            100.0
        } else {
            ((self.total_rules as f64 / target as f64) * 100.0).min(100.0)
        };
        self
    }
}
