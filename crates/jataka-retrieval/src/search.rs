//! Symbolic and semantic candidate gathering.

use jataka_core::errors::JatakaResult;
use jataka_core::rule::Rule;
use jataka_core::traits::{IEmbeddingProvider, IRuleStorage};
use tracing::{debug, warn};

/// A candidate rule before merging, tagged with how it was found.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub rule: Rule,
    pub symbolic_match: bool,
    pub semantic_score: Option<f64>,
}

/// Exact-match lookup: every active rule whose symbolic key set
/// intersects the context keys, filtered by domain when given.
pub fn symbolic_search(
    storage: &dyn IRuleStorage,
    keys: &[String],
    domain: Option<&str>,
) -> JatakaResult<Vec<Candidate>> {
    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let rule_ids = storage.rule_ids_for_keys(keys)?;
    let rules = storage.get_rules_bulk(&rule_ids)?;

    let candidates: Vec<Candidate> = rules
        .into_iter()
        .filter(|r| r.is_active())
        .filter(|r| domain.map(|d| r.domain == d).unwrap_or(true))
        .map(|rule| Candidate {
            rule,
            symbolic_match: true,
            semantic_score: None,
        })
        .collect();

    debug!(keys = keys.len(), candidates = candidates.len(), "symbolic search");
    Ok(candidates)
}

/// Similarity lookup: embed the query and rank every stored embedding of
/// the provider's model version by cosine similarity.
///
/// Returns `None` when the provider fails — the caller degrades to the
/// symbolic/fallback ladder instead of aborting the request.
pub fn semantic_search(
    storage: &dyn IRuleStorage,
    provider: &dyn IEmbeddingProvider,
    query: &str,
    domain: Option<&str>,
    limit: usize,
) -> JatakaResult<Option<Vec<Candidate>>> {
    let query_vec = match provider.embed(query) {
        Ok(vec) => vec,
        Err(e) => {
            warn!(error = %e, "query embedding failed, degrading to symbolic search");
            return Ok(None);
        }
    };

    let embeddings = storage.embeddings_for_model(provider.model_version())?;
    let mut scored: Vec<(String, f64)> = embeddings
        .iter()
        .filter(|e| e.dimensions() == query_vec.len())
        .map(|e| (e.rule_id.clone(), cosine_similarity(&query_vec, &e.vector)))
        .filter(|(_, sim)| *sim > 0.0)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    let ids: Vec<String> = scored.iter().map(|(id, _)| id.clone()).collect();
    let rules = storage.get_rules_bulk(&ids)?;

    let candidates: Vec<Candidate> = scored
        .into_iter()
        .filter_map(|(id, sim)| {
            rules.iter().find(|r| r.rule_id == id).map(|rule| Candidate {
                rule: rule.clone(),
                symbolic_match: false,
                semantic_score: Some(sim),
            })
        })
        .filter(|c| c.rule.is_active())
        .filter(|c| domain.map(|d| c.rule.domain == d).unwrap_or(true))
        .collect();

    debug!(candidates = candidates.len(), "semantic search");
    Ok(Some(candidates))
}

/// Cosine similarity between two vectors of equal length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += (*x as f64) * (*y as f64);
        norm_a += (*x as f64) * (*x as f64);
        norm_b += (*y as f64) * (*y as f64);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let v = vec![0.5f32, 0.3, -0.2];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let a = vec![1.0f32, 0.0];
        let b = vec![0.0f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        let a = vec![0.0f32, 0.0];
        let b = vec![1.0f32, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }
}
