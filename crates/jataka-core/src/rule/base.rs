use serde::{Deserialize, Serialize};

use super::weight::Weight;

/// Lifecycle status of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Active,
    Retired,
}

/// A discrete interpretation rule.
///
/// Rules are immutable once active: new versions supersede old ones, and
/// only `status`/`version` transition in place. Everything else is fixed
/// at ingestion time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Stable external identifier, unique across the store.
    pub rule_id: String,
    /// Domain this rule speaks to (career, relationships, wealth, ...).
    pub domain: String,
    /// Free text describing the structural trigger ("Sun in 10th house").
    pub condition: String,
    /// Free text outcome ("native rises to authority in profession").
    pub effect: String,
    /// Prioritization weight.
    pub weight: Weight,
    /// Source citation (classical text, chapter, verse).
    pub anchor: String,
    /// Optional commentary from the curator.
    pub commentary: Option<String>,
    /// Modifying factors that strengthen or soften the effect.
    pub modifiers: Vec<String>,
    /// Chart scopes this rule applies to (natal, transit, ...).
    pub applicable_scopes: Vec<String>,
    /// Rule ids this rule invalidates when both match.
    pub cancelers: Vec<String>,
    pub status: RuleStatus,
    pub version: u32,
    /// blake3 hash of condition + effect, drives embedding idempotence.
    pub content_hash: String,
}

impl Rule {
    /// Compute the blake3 content hash over the interpretive text.
    pub fn compute_content_hash(condition: &str, effect: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(condition.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(effect.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    /// Whether this rule is currently active.
    pub fn is_active(&self) -> bool {
        self.status == RuleStatus::Active
    }

    /// Structural comparison: same interpretive content and weight.
    ///
    /// Distinct from `PartialEq`, which compares external ids only.
    pub fn content_eq(&self, other: &Self) -> bool {
        self.content_hash == other.content_hash
            && self.domain == other.domain
            && self.weight == other.weight
            && self.cancelers == other.cancelers
    }
}

/// Identity equality: two rules are equal if they share an external id.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.rule_id == other.rule_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_stable() {
        let a = Rule::compute_content_hash("Sun in 10th house", "authority in profession");
        let b = Rule::compute_content_hash("Sun in 10th house", "authority in profession");
        assert_eq!(a, b);
    }

    #[test]
    fn content_hash_separates_fields() {
        // "ab" + "c" must not collide with "a" + "bc".
        let a = Rule::compute_content_hash("ab", "c");
        let b = Rule::compute_content_hash("a", "bc");
        assert_ne!(a, b);
    }
}
