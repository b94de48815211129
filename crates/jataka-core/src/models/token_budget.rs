use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::reading_session::Role;

/// Shared token budget for one pipeline run.
///
/// `used` is monotonically increasing and attributed per role. A stage
/// must reserve before calling an external model; a refused reservation
/// means the stage is skipped (if optional) — the budget is never
/// overrun at stage entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBudget {
    pub limit: usize,
    pub used: usize,
    per_role: HashMap<Role, usize>,
}

impl TokenBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            used: 0,
            per_role: HashMap::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.used)
    }

    /// Whether a call that may consume up to `needed` tokens fits.
    pub fn can_afford(&self, needed: usize) -> bool {
        needed <= self.remaining()
    }

    /// Record actual consumption after an external call, attributed to
    /// `role`. Callers must have checked `can_afford` with their cap
    /// first; actual usage is recorded even if the provider overshot its
    /// cap, so `used` stays truthful.
    pub fn consume(&mut self, role: Role, tokens: usize) {
        self.used += tokens;
        *self.per_role.entry(role).or_default() += tokens;
    }

    /// Tokens attributed to one role so far.
    pub fn used_by(&self, role: Role) -> usize {
        self.per_role.get(&role).copied().unwrap_or(0)
    }
}
