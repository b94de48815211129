//! Canceler conflict resolution.
//!
//! Runs after ranking and before truncation, so a canceled rule cannot
//! ride back in on a high score.

use std::collections::HashSet;

use jataka_core::models::RankedRule;
use tracing::debug;

/// Drop every candidate whose id appears in another candidate's
/// cancelers list. A rule listing itself is a no-op, not an error.
pub fn resolve(candidates: Vec<RankedRule>) -> Vec<RankedRule> {
    let canceled: HashSet<String> = candidates
        .iter()
        .flat_map(|c| {
            c.rule
                .cancelers
                .iter()
                .filter(|id| **id != c.rule.rule_id)
                .cloned()
        })
        .collect();

    if canceled.is_empty() {
        return candidates;
    }

    let before = candidates.len();
    let survivors: Vec<RankedRule> = candidates
        .into_iter()
        .filter(|c| !canceled.contains(&c.rule.rule_id))
        .collect();

    debug!(dropped = before - survivors.len(), "canceler conflict resolution");
    survivors
}
