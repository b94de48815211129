//! Contradiction detection policy.
//!
//! The policy is pluggable; the default flags same-domain rule pairs
//! whose effects land on opposite polarity lexicons. It detects and
//! counts — nothing deeper.

use std::sync::LazyLock;

use jataka_core::rule::Rule;
use regex::Regex;

/// Pluggable contradiction detection over the rules a run used.
pub trait ContradictionPolicy: Send + Sync {
    /// Return one description per contradictory pair.
    fn detect(&self, rules: &[&Rule]) -> Vec<String>;
}

static POSITIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(gain|gains|success|rise|rises|prosper|prosperity|wealth|fortune|honor|happiness|favorable|auspicious|authority)\b",
    )
    .expect("positive lexicon regex")
});

static NEGATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(loss|losses|failure|fall|falls|decline|poverty|misfortune|dishonor|sorrow|unfavorable|inauspicious|obstacle|obstacles)\b",
    )
    .expect("negative lexicon regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
    Mixed,
    Neutral,
}

fn polarity(text: &str) -> Polarity {
    match (POSITIVE_RE.is_match(text), NEGATIVE_RE.is_match(text)) {
        (true, false) => Polarity::Positive,
        (false, true) => Polarity::Negative,
        (true, true) => Polarity::Mixed,
        (false, false) => Polarity::Neutral,
    }
}

/// Default policy: same-domain, opposite-polarity effect statements.
pub struct PolarityLexiconPolicy;

impl PolarityLexiconPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PolarityLexiconPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ContradictionPolicy for PolarityLexiconPolicy {
    fn detect(&self, rules: &[&Rule]) -> Vec<String> {
        let mut findings = Vec::new();
        for (i, a) in rules.iter().enumerate() {
            for b in rules.iter().skip(i + 1) {
                if a.domain != b.domain {
                    continue;
                }
                let pair = (polarity(&a.effect), polarity(&b.effect));
                let opposed = matches!(
                    pair,
                    (Polarity::Positive, Polarity::Negative)
                        | (Polarity::Negative, Polarity::Positive)
                );
                if opposed {
                    findings.push(format!(
                        "{}: '{}' [{}] vs '{}' [{}]",
                        a.domain, a.effect, a.rule_id, b.effect, b.rule_id
                    ));
                }
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jataka_core::rule::{RuleStatus, Weight};

    fn rule(id: &str, domain: &str, effect: &str) -> Rule {
        Rule {
            rule_id: id.to_string(),
            domain: domain.to_string(),
            condition: "c".to_string(),
            effect: effect.to_string(),
            weight: Weight::new(0.5),
            anchor: "a".to_string(),
            commentary: None,
            modifiers: vec![],
            applicable_scopes: vec![],
            cancelers: vec![],
            status: RuleStatus::Active,
            version: 1,
            content_hash: Rule::compute_content_hash("c", effect),
        }
    }

    #[test]
    fn opposite_polarity_same_domain_is_flagged() {
        let a = rule("R1", "wealth", "steady gains of wealth");
        let b = rule("R2", "wealth", "loss of accumulated property");
        let findings = PolarityLexiconPolicy::new().detect(&[&a, &b]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].contains("R1"));
        assert!(findings[0].contains("R2"));
    }

    #[test]
    fn different_domains_are_not_compared() {
        let a = rule("R1", "wealth", "steady gains");
        let b = rule("R2", "health", "decline of vitality");
        assert!(PolarityLexiconPolicy::new().detect(&[&a, &b]).is_empty());
    }

    #[test]
    fn same_polarity_is_not_a_contradiction() {
        let a = rule("R1", "career", "rises to authority");
        let b = rule("R2", "career", "success in profession");
        assert!(PolarityLexiconPolicy::new().detect(&[&a, &b]).is_empty());
    }

    #[test]
    fn mixed_polarity_is_not_flagged() {
        let a = rule("R1", "career", "gains after initial loss");
        let b = rule("R2", "career", "steady success");
        assert!(PolarityLexiconPolicy::new().detect(&[&a, &b]).is_empty());
    }
}
