//! Rule validation at the ingestion boundary.
//!
//! Rules are validated once, here — read sites trust the store.

use jataka_core::errors::IngestError;
use jataka_core::rule::Rule;

/// Validate one rule before it enters the store.
pub fn validate_rule(rule: &Rule) -> Result<(), IngestError> {
    let fail = |reason: &str| {
        Err(IngestError::ValidationFailed {
            rule_id: rule.rule_id.clone(),
            reason: reason.to_string(),
        })
    };

    if rule.rule_id.trim().is_empty() {
        return fail("rule_id is empty");
    }
    if rule.domain.trim().is_empty() {
        return fail("domain is empty");
    }
    if rule.condition.trim().is_empty() {
        return fail("condition is empty");
    }
    if rule.effect.trim().is_empty() {
        return fail("effect is empty");
    }
    if rule.anchor.trim().is_empty() {
        return fail("anchor is empty");
    }
    if rule.version == 0 {
        return fail("version must be >= 1");
    }
    // A rule canceling itself is a no-op downstream, but more than once
    // in its own list suggests a malformed payload.
    let self_refs = rule
        .cancelers
        .iter()
        .filter(|c| *c == &rule.rule_id)
        .count();
    if self_refs > 1 {
        return fail("cancelers list repeats the rule's own id");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jataka_core::rule::{RuleStatus, Weight};

    fn valid_rule() -> Rule {
        Rule {
            rule_id: "BPHS-10-1".to_string(),
            domain: "career".to_string(),
            condition: "Sun in 10th house".to_string(),
            effect: "native gains authority in profession".to_string(),
            weight: Weight::new(0.8),
            anchor: "BPHS 24.11".to_string(),
            commentary: None,
            modifiers: vec![],
            applicable_scopes: vec!["natal".to_string()],
            cancelers: vec![],
            status: RuleStatus::Active,
            version: 1,
            content_hash: Rule::compute_content_hash(
                "Sun in 10th house",
                "native gains authority in profession",
            ),
        }
    }

    #[test]
    fn accepts_valid_rule() {
        assert!(validate_rule(&valid_rule()).is_ok());
    }

    #[test]
    fn rejects_empty_fields() {
        for field in ["rule_id", "domain", "condition", "effect", "anchor"] {
            let mut rule = valid_rule();
            match field {
                "rule_id" => rule.rule_id = "  ".to_string(),
                "domain" => rule.domain = String::new(),
                "condition" => rule.condition = String::new(),
                "effect" => rule.effect = String::new(),
                _ => rule.anchor = String::new(),
            }
            assert!(validate_rule(&rule).is_err(), "expected {field} to fail");
        }
    }

    #[test]
    fn rejects_zero_version() {
        let mut rule = valid_rule();
        rule.version = 0;
        assert!(validate_rule(&rule).is_err());
    }

    #[test]
    fn single_self_cancel_is_allowed() {
        let mut rule = valid_rule();
        rule.cancelers = vec![rule.rule_id.clone()];
        assert!(validate_rule(&rule).is_ok());
    }
}
