//! Predictor: optional per-domain, time-windowed forecasts.
//!
//! Confidence is deterministic — the mean weight of the domain's
//! retrieved rules mapped to 0–100 — while the narrative comes from the
//! completion provider, degrading to a rule-derived template when the
//! provider fails. Key periods split the caller's window into up to
//! three sub-windows themed by the strongest rules.

use chrono::{Duration, Utc};
use jataka_core::models::{KeyPeriod, Prediction};
use jataka_core::traits::ICompletionProvider;
use tracing::warn;

use crate::engine::DomainRules;

/// Build one domain's prediction. Returns the prediction and the tokens
/// actually consumed by the narrative call (0 when degraded).
pub fn predict_domain(
    provider: &dyn ICompletionProvider,
    group: &DomainRules,
    window_months: u32,
    max_tokens: usize,
) -> (Prediction, usize) {
    let confidence_score = confidence_from_rules(group);
    let key_periods = key_periods(group, window_months);

    let prompt = narrative_prompt(group, window_months);
    let (narrative, tokens_used) = match provider.complete(&prompt, max_tokens) {
        Ok(completion) => (completion.text, completion.tokens_used),
        Err(e) => {
            warn!(domain = %group.domain, error = %e, "prediction narrative degraded to template");
            (template_narrative(group, window_months), 0)
        }
    };

    let prediction = Prediction {
        domain: group.domain.clone(),
        narrative,
        confidence_score,
        confidence_level: Prediction::level_for_score(confidence_score),
        key_periods,
        window_months,
    };
    (prediction, tokens_used)
}

/// Mean retrieved-rule weight mapped onto 0–100.
fn confidence_from_rules(group: &DomainRules) -> u8 {
    let rules = &group.result.rules;
    if rules.is_empty() {
        return 0;
    }
    let mean: f64 =
        rules.iter().map(|r| r.rule.weight.value()).sum::<f64>() / rules.len() as f64;
    (mean * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Up to three equal sub-windows, each themed by one of the strongest
/// rules' effects.
fn key_periods(group: &DomainRules, window_months: u32) -> Vec<KeyPeriod> {
    let splits = group.result.rules.len().min(3);
    if splits == 0 || window_months == 0 {
        return Vec::new();
    }

    let now = Utc::now();
    let span_days = (window_months as i64 * 30) / splits as i64;
    (0..splits)
        .map(|i| KeyPeriod {
            from: now + Duration::days(span_days * i as i64),
            to: now + Duration::days(span_days * (i as i64 + 1)),
            theme: group.result.rules[i].rule.effect.clone(),
        })
        .collect()
}

fn narrative_prompt(group: &DomainRules, window_months: u32) -> String {
    let mut prompt = format!(
        "Forecast the next {window_months} months for the {} domain, grounded \
         only in these rules; cite rule ids in square brackets:\n",
        group.domain
    );
    for ranked in &group.result.rules {
        prompt.push_str(&format!(
            "RULE [{}] domain={} weight={:.2} :: {} => {} ({})\n",
            ranked.rule.rule_id,
            ranked.rule.domain,
            ranked.rule.weight.value(),
            ranked.rule.condition,
            ranked.rule.effect,
            ranked.rule.anchor,
        ));
    }
    prompt
}

/// Deterministic fallback narrative from the strongest rule.
fn template_narrative(group: &DomainRules, window_months: u32) -> String {
    match group.result.rules.first() {
        Some(top) => format!(
            "Over the next {window_months} months, the dominant indication for {} is [{}]: {}.",
            group.domain, top.rule.rule_id, top.rule.effect
        ),
        None => format!(
            "No strong indications were retrieved for {} in this window.",
            group.domain
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jataka_core::models::{RankedRule, RetrievalMethod, RetrievalResult};
    use jataka_core::rule::{Rule, RuleStatus, Weight};

    fn group_with_weights(weights: &[f64]) -> DomainRules {
        let rules = weights
            .iter()
            .enumerate()
            .map(|(i, w)| RankedRule {
                rule: Rule {
                    rule_id: format!("r{i}"),
                    domain: "career".to_string(),
                    condition: "c".to_string(),
                    effect: format!("effect {i}"),
                    weight: Weight::new(*w),
                    anchor: "a".to_string(),
                    commentary: None,
                    modifiers: vec![],
                    applicable_scopes: vec![],
                    cancelers: vec![],
                    status: RuleStatus::Active,
                    version: 1,
                    content_hash: Rule::compute_content_hash("c", "e"),
                },
                relevance_score: *w,
                symbolic_match: true,
                semantic_score: None,
            })
            .collect::<Vec<_>>();
        let total = rules.len();
        DomainRules {
            domain: "career".to_string(),
            result: RetrievalResult {
                rules,
                method: RetrievalMethod::Symbolic,
                total_matches: total,
                query_time_ms: 0,
                keys_used: vec![],
            },
        }
    }

    #[test]
    fn confidence_is_mean_weight_scaled() {
        assert_eq!(confidence_from_rules(&group_with_weights(&[0.8, 0.6])), 70);
        assert_eq!(confidence_from_rules(&group_with_weights(&[])), 0);
    }

    #[test]
    fn key_periods_cover_the_window() {
        let periods = key_periods(&group_with_weights(&[0.8, 0.6, 0.4, 0.2]), 12);
        assert_eq!(periods.len(), 3);
        assert!(periods.windows(2).all(|w| w[0].to == w[1].from));
    }

    #[test]
    fn no_rules_means_no_key_periods() {
        assert!(key_periods(&group_with_weights(&[]), 12).is_empty());
    }
}
