//! RetrievalEngine: implements IRetriever, orchestrates the full ladder.
//!
//! symbolic ∪ semantic → merge → weight filter → conflict resolution →
//! truncate. Falls back to top-weight domain rules when the context is
//! empty, and to symbolic-only search when the embedding provider fails.

use std::time::Instant;

use jataka_core::config::RetrievalConfig;
use jataka_core::constants::GENERAL_DOMAIN;
use jataka_core::errors::JatakaResult;
use jataka_core::models::{QueryContext, RankedRule, RetrievalMethod, RetrievalResult};
use jataka_core::traits::{IEmbeddingProvider, IRetriever, IRuleStorage};
use tracing::{debug, info};

use crate::conflict;
use crate::merge::{self, MergeWeights};
use crate::search::{self, Candidate};

/// The main retrieval engine. Storage is required; the embedding
/// provider is an optional capability — without it the engine runs
/// symbolic and fallback search only.
pub struct RetrievalEngine<'a> {
    storage: &'a dyn IRuleStorage,
    embeddings: Option<&'a dyn IEmbeddingProvider>,
    config: RetrievalConfig,
    weights: MergeWeights,
}

impl<'a> RetrievalEngine<'a> {
    pub fn new(
        storage: &'a dyn IRuleStorage,
        embeddings: Option<&'a dyn IEmbeddingProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            storage,
            embeddings,
            config,
            weights: MergeWeights::default(),
        }
    }

    fn gather(
        &self,
        context: &QueryContext,
        limit: usize,
    ) -> JatakaResult<(Vec<RankedRule>, RetrievalMethod)> {
        let domain = context.domain.as_deref();

        // Step 1: Symbolic candidates from the context keys.
        let symbolic = search::symbolic_search(self.storage, &context.keys, domain)?;

        // Step 2: Semantic candidates, only with a query and a provider.
        // A provider failure yields None and the ladder degrades.
        let semantic: Option<Vec<Candidate>> = match (&context.query, self.embeddings) {
            (Some(query), Some(provider)) => search::semantic_search(
                self.storage,
                provider,
                query,
                domain,
                self.config.semantic_candidates.max(limit),
            )?,
            _ => None,
        };

        // Step 3: Merge or fall through the ladder.
        match (symbolic.is_empty(), semantic) {
            (false, Some(sem)) if !sem.is_empty() => {
                Ok((merge::merge_hybrid(symbolic, sem, &self.weights), RetrievalMethod::Hybrid))
            }
            (false, _) => Ok((merge::rank_single_path(symbolic), RetrievalMethod::Symbolic)),
            (true, Some(sem)) if !sem.is_empty() => {
                Ok((merge::rank_single_path(sem), RetrievalMethod::Semantic))
            }
            _ => {
                // Step 4: Domain fallback — top rules by weight, so the
                // pipeline never starves when a domain is known.
                let fallback_domain = domain.unwrap_or(GENERAL_DOMAIN);
                let rules = self.storage.rules_by_domain(fallback_domain, 0.0)?;
                let candidates: Vec<Candidate> = rules
                    .into_iter()
                    .map(|rule| Candidate {
                        rule,
                        symbolic_match: false,
                        semantic_score: None,
                    })
                    .collect();
                debug!(domain = fallback_domain, candidates = candidates.len(), "domain fallback");
                Ok((merge::rank_single_path(candidates), RetrievalMethod::DomainFallback))
            }
        }
    }
}

impl<'a> IRetriever for RetrievalEngine<'a> {
    fn retrieve(
        &self,
        context: &QueryContext,
        limit: usize,
        min_weight: f64,
    ) -> JatakaResult<RetrievalResult> {
        let started = Instant::now();

        let (ranked, method) = self.gather(context, limit)?;

        // Weight filter, then conflict resolution, then the limit cap —
        // in that order, so cancellation can't be bypassed by a high
        // score and a canceled rule can't occupy a result slot.
        let filtered: Vec<RankedRule> = ranked
            .into_iter()
            .filter(|r| r.rule.weight.value() >= min_weight)
            .collect();
        let mut survivors = conflict::resolve(filtered);
        let total_matches = survivors.len();
        survivors.truncate(limit);

        info!(
            ?method,
            total_matches,
            returned = survivors.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "retrieval complete"
        );

        Ok(RetrievalResult {
            rules: survivors,
            method,
            total_matches,
            query_time_ms: started.elapsed().as_millis() as u64,
            keys_used: context.keys.clone(),
        })
    }
}
