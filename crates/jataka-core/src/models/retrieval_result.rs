use serde::{Deserialize, Serialize};

use crate::rule::Rule;

/// How a retrieval result set was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalMethod {
    Symbolic,
    Semantic,
    Hybrid,
    DomainFallback,
}

/// One rule in a ranked result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRule {
    pub rule: Rule,
    /// Composite relevance used for the final ordering.
    pub relevance_score: f64,
    /// Whether the symbolic path found this rule.
    pub symbolic_match: bool,
    /// Cosine similarity when the semantic path found it.
    pub semantic_score: Option<f64>,
}

/// Ephemeral result of one retrieval call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    /// Ranked, deduplicated, conflict-resolved rules, capped at the
    /// caller's limit.
    pub rules: Vec<RankedRule>,
    pub method: RetrievalMethod,
    /// Candidates surviving filters and conflict resolution, before the
    /// limit cap.
    pub total_matches: usize,
    pub query_time_ms: u64,
    /// Symbolic keys that participated in the lookup.
    pub keys_used: Vec<String>,
}

impl RetrievalResult {
    /// An empty result for the given method. Not an error: "nothing
    /// matched" is a valid outcome.
    pub fn empty(method: RetrievalMethod, keys_used: Vec<String>) -> Self {
        Self {
            rules: Vec::new(),
            method,
            total_matches: 0,
            query_time_ms: 0,
            keys_used,
        }
    }

    pub fn rule_ids(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.rule.rule_id.clone()).collect()
    }
}
