use std::collections::BTreeMap;

use crate::errors::JatakaResult;
use crate::rule::{Rule, RuleEmbedding, RuleStatus, SymbolicKey};

/// Rule store: rules, symbolic keys, and embeddings, for their full
/// lifetime. Rules are immutable post-publish, so reads need no locking.
pub trait IRuleStorage: Send + Sync {
    // --- Rules ---
    fn create_rule(&self, rule: &Rule) -> JatakaResult<()>;
    fn get_rule(&self, rule_id: &str) -> JatakaResult<Option<Rule>>;
    fn get_rules_bulk(&self, rule_ids: &[String]) -> JatakaResult<Vec<Rule>>;
    /// Status/version are the only in-place transitions a rule allows.
    fn set_rule_status(&self, rule_id: &str, status: RuleStatus) -> JatakaResult<()>;
    /// Active rules for one domain with weight >= min_weight, weight desc.
    fn rules_by_domain(&self, domain: &str, min_weight: f64) -> JatakaResult<Vec<Rule>>;

    // --- Symbolic keys ---
    fn store_symbolic_keys(&self, keys: &[SymbolicKey]) -> JatakaResult<()>;
    fn keys_for_rule(&self, rule_id: &str) -> JatakaResult<Vec<SymbolicKey>>;
    /// Distinct rule ids whose key set intersects `key_values`.
    fn rule_ids_for_keys(&self, key_values: &[String]) -> JatakaResult<Vec<String>>;

    // --- Embeddings ---
    fn store_embedding(&self, embedding: &RuleEmbedding) -> JatakaResult<()>;
    /// Whether a rule already has an embedding for this model version
    /// (the ingestor's idempotence check).
    fn has_embedding(&self, rule_id: &str, model_version: &str) -> JatakaResult<bool>;
    /// All embeddings for one model version, for similarity scans.
    fn embeddings_for_model(&self, model_version: &str) -> JatakaResult<Vec<RuleEmbedding>>;

    // --- Aggregation ---
    fn count_rules(&self) -> JatakaResult<usize>;
    fn count_rules_with_embeddings(&self) -> JatakaResult<usize>;
    fn count_symbolic_keys(&self) -> JatakaResult<usize>;
    fn count_rules_by_domain(&self) -> JatakaResult<BTreeMap<String, usize>>;
}
