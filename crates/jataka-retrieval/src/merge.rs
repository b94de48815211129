//! Hybrid merge: union of symbolic and semantic candidates with a
//! weighted relevance score.
//!
//! relevance = 0.4 * symbolic_boost + 0.4 * semantic_score + 0.2 * weight
//! where symbolic_boost is 0.3 for symbolically-found rules, else 0.

use std::collections::HashMap;

use jataka_core::models::RankedRule;

use crate::search::Candidate;

/// Weights for the hybrid relevance formula.
#[derive(Debug, Clone)]
pub struct MergeWeights {
    pub symbolic: f64,
    pub semantic: f64,
    pub rule_weight: f64,
    /// Boost granted to a rule the symbolic path found.
    pub symbolic_boost: f64,
}

impl Default for MergeWeights {
    fn default() -> Self {
        Self {
            symbolic: 0.4,
            semantic: 0.4,
            rule_weight: 0.2,
            symbolic_boost: 0.3,
        }
    }
}

/// Merge both candidate sets keyed by rule id. A rule found by both
/// paths merges once, keeping its symbolic flag and semantic score.
pub fn merge_hybrid(
    symbolic: Vec<Candidate>,
    semantic: Vec<Candidate>,
    weights: &MergeWeights,
) -> Vec<RankedRule> {
    let mut by_id: HashMap<String, Candidate> = HashMap::new();

    for candidate in symbolic.into_iter().chain(semantic) {
        let id = candidate.rule.rule_id.clone();
        match by_id.get_mut(&id) {
            Some(existing) => {
                existing.symbolic_match |= candidate.symbolic_match;
                if existing.semantic_score.is_none() {
                    existing.semantic_score = candidate.semantic_score;
                }
            }
            None => {
                by_id.insert(id, candidate);
            }
        }
    }

    let mut ranked: Vec<RankedRule> = by_id
        .into_values()
        .map(|c| {
            let boost = if c.symbolic_match {
                weights.symbolic_boost
            } else {
                0.0
            };
            let relevance = weights.symbolic * boost
                + weights.semantic * c.semantic_score.unwrap_or(0.0)
                + weights.rule_weight * c.rule.weight.value();
            RankedRule {
                rule: c.rule,
                relevance_score: relevance,
                symbolic_match: c.symbolic_match,
                semantic_score: c.semantic_score,
            }
        })
        .collect();

    sort_by_relevance(&mut ranked);
    ranked
}

/// Rank a single-path candidate set: symbolic rules order by weight,
/// semantic rules by similarity.
pub fn rank_single_path(candidates: Vec<Candidate>) -> Vec<RankedRule> {
    let mut ranked: Vec<RankedRule> = candidates
        .into_iter()
        .map(|c| {
            let relevance = match c.semantic_score {
                Some(sim) => sim,
                None => c.rule.weight.value(),
            };
            RankedRule {
                rule: c.rule,
                relevance_score: relevance,
                symbolic_match: c.symbolic_match,
                semantic_score: c.semantic_score,
            }
        })
        .collect();

    sort_by_relevance(&mut ranked);
    ranked
}

/// Sort by relevance descending, rule id ascending for determinism.
pub fn sort_by_relevance(ranked: &mut [RankedRule]) {
    ranked.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.rule.rule_id.cmp(&b.rule.rule_id))
    });
}
