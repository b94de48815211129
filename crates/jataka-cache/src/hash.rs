//! Canonical hash over the parameters that fully determine a reading.
//!
//! Invariant: equal logical inputs produce equal digests, independent of
//! list ordering — domains are sorted before hashing.

/// The request-defining parameters.
#[derive(Debug, Clone)]
pub struct CanonicalParams {
    pub subject_id: String,
    pub domains: Vec<String>,
    pub include_predictions: bool,
    pub prediction_window_months: u32,
}

/// Compute the canonical blake3 digest for a parameter set.
pub fn canonical_hash(params: &CanonicalParams) -> String {
    let mut domains = params.domains.clone();
    domains.sort();
    domains.dedup();

    let mut hasher = blake3::Hasher::new();
    hasher.update(params.subject_id.as_bytes());
    hasher.update(b"\x1f");
    for domain in &domains {
        hasher.update(domain.as_bytes());
        hasher.update(b"\x1e");
    }
    hasher.update(b"\x1f");
    hasher.update(&[params.include_predictions as u8]);
    hasher.update(&params.prediction_window_months.to_le_bytes());
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(domains: &[&str]) -> CanonicalParams {
        CanonicalParams {
            subject_id: "subject-1".to_string(),
            domains: domains.iter().map(|s| s.to_string()).collect(),
            include_predictions: true,
            prediction_window_months: 12,
        }
    }

    #[test]
    fn ordering_does_not_change_digest() {
        let a = canonical_hash(&params(&["career", "wealth", "health"]));
        let b = canonical_hash(&params(&["health", "career", "wealth"]));
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_domains_do_not_change_digest() {
        let a = canonical_hash(&params(&["career", "career"]));
        let b = canonical_hash(&params(&["career"]));
        assert_eq!(a, b);
    }

    #[test]
    fn different_subjects_differ() {
        let a = canonical_hash(&params(&["career"]));
        let mut p = params(&["career"]);
        p.subject_id = "subject-2".to_string();
        assert_ne!(a, canonical_hash(&p));
    }

    #[test]
    fn prediction_flags_differ() {
        let a = canonical_hash(&params(&["career"]));
        let mut p = params(&["career"]);
        p.include_predictions = false;
        assert_ne!(a, canonical_hash(&p));

        let mut p = params(&["career"]);
        p.prediction_window_months = 6;
        assert_ne!(a, canonical_hash(&p));
    }
}
