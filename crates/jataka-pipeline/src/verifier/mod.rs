//! Verifier: post-hoc citation validation, contradiction detection, and
//! quality scoring. Findings are data in the response, never errors.

pub mod contradiction;

pub use contradiction::{ContradictionPolicy, PolarityLexiconPolicy};

use std::collections::HashMap;
use std::sync::LazyLock;

use jataka_core::models::{
    CitationMetrics, ConfidenceLevel, DomainAnalysis, Prediction, RankedRule, VerificationReport,
};
use regex::Regex;
use tracing::debug;

/// Citation marker: `[rule-id]`.
static CITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9][A-Za-z0-9_.:-]*)\]").expect("citation regex"));

/// Extract cited rule ids from generated text, in order of first mention.
pub fn extract_citations(text: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for cap in CITE_RE.captures_iter(text) {
        let id = cap[1].to_string();
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// The verification stage.
pub struct Verifier {
    policy: Box<dyn ContradictionPolicy>,
}

impl Verifier {
    pub fn new(policy: Box<dyn ContradictionPolicy>) -> Self {
        Self { policy }
    }

    /// Verify a run's output against its retrieved set.
    ///
    /// Returns the report plus `rules_used` — the valid citations the
    /// run actually emitted.
    pub fn verify(
        &self,
        interpretation: &str,
        analyses: &[DomainAnalysis],
        predictions: &[Prediction],
        retrieved: &HashMap<String, RankedRule>,
    ) -> (VerificationReport, Vec<String>) {
        // Gather every citation the run emitted, across all stages.
        let mut cited = extract_citations(interpretation);
        for analysis in analyses {
            for id in extract_citations(&analysis.analysis) {
                if !cited.contains(&id) {
                    cited.push(id);
                }
            }
        }
        for prediction in predictions {
            for id in extract_citations(&prediction.narrative) {
                if !cited.contains(&id) {
                    cited.push(id);
                }
            }
        }

        let mut issues = Vec::new();
        let mut rules_used = Vec::new();
        let mut invalid = 0usize;
        for id in &cited {
            if retrieved.contains_key(id) {
                rules_used.push(id.clone());
            } else {
                invalid += 1;
                issues.push(format!("invalid citation: [{id}] is not in the retrieved set"));
            }
        }

        if cited.is_empty() && !retrieved.is_empty() {
            issues.push("interpretation cites no rules".to_string());
        }

        // Contradiction check over the rules the run actually used.
        let used_rules: Vec<&jataka_core::rule::Rule> = rules_used
            .iter()
            .filter_map(|id| retrieved.get(id).map(|r| &r.rule))
            .collect();
        let contradictions = self.policy.detect(&used_rules);

        let citation_metrics = CitationMetrics::new(rules_used.len(), invalid);
        let quality_score = quality_score(&citation_metrics, issues.len(), contradictions.len());

        debug!(
            cited = cited.len(),
            invalid,
            contradictions = contradictions.len(),
            quality_score,
            "verification complete"
        );

        let report = VerificationReport {
            quality_score,
            overall_confidence: ConfidenceLevel::from_quality_score(quality_score),
            issues,
            contradictions,
            citation_metrics,
        };
        (report, rules_used)
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(Box::new(PolarityLexiconPolicy::new()))
    }
}

/// Weighted combination of citation accuracy and finding counts,
/// clamped to 0–10.
fn quality_score(metrics: &CitationMetrics, issue_count: usize, contradiction_count: usize) -> f64 {
    let base = metrics.accuracy * 10.0;
    let penalty = issue_count as f64 + 2.0 * contradiction_count as f64;
    (base - penalty).clamp(0.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jataka_core::rule::{Rule, RuleStatus, Weight};

    fn retrieved_with(ids: &[&str]) -> HashMap<String, RankedRule> {
        ids.iter()
            .map(|id| {
                (
                    id.to_string(),
                    RankedRule {
                        rule: Rule {
                            rule_id: id.to_string(),
                            domain: "career".to_string(),
                            condition: "c".to_string(),
                            effect: "gains authority".to_string(),
                            weight: Weight::new(0.8),
                            anchor: "a".to_string(),
                            commentary: None,
                            modifiers: vec![],
                            applicable_scopes: vec![],
                            cancelers: vec![],
                            status: RuleStatus::Active,
                            version: 1,
                            content_hash: Rule::compute_content_hash("c", "e"),
                        },
                        relevance_score: 0.8,
                        symbolic_match: true,
                        semantic_score: None,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn extracts_unique_citations_in_order() {
        let cited = extract_citations("First [R1], then [R2], then [R1] again.");
        assert_eq!(cited, vec!["R1".to_string(), "R2".to_string()]);
    }

    #[test]
    fn valid_citations_become_rules_used() {
        let verifier = Verifier::default();
        let (report, rules_used) =
            verifier.verify("Grounded in [R1] and [R2].", &[], &[], &retrieved_with(&["R1", "R2"]));
        assert_eq!(rules_used, vec!["R1".to_string(), "R2".to_string()]);
        assert_eq!(report.citation_metrics.invalid, 0);
        assert_eq!(report.quality_score, 10.0);
        assert_eq!(report.overall_confidence, ConfidenceLevel::High);
    }

    #[test]
    fn invalid_citation_is_reported_not_fatal() {
        let verifier = Verifier::default();
        let (report, rules_used) =
            verifier.verify("Cites [R1] and [GHOST].", &[], &[], &retrieved_with(&["R1"]));
        assert_eq!(rules_used, vec!["R1".to_string()]);
        assert_eq!(report.citation_metrics.invalid, 1);
        assert_eq!(report.citation_metrics.accuracy, 0.5);
        assert!(report.issues.iter().any(|i| i.contains("GHOST")));
        assert!(report.quality_score < 5.0);
    }

    #[test]
    fn citing_nothing_is_flagged() {
        let verifier = Verifier::default();
        let (report, _) = verifier.verify("Vague text.", &[], &[], &retrieved_with(&["R1"]));
        assert!(report.issues.iter().any(|i| i.contains("cites no rules")));
    }
}
