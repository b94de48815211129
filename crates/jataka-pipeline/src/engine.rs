//! PipelineEngine — the strictly ordered orchestration state machine.
//!
//! `Coordinator → Retriever (per domain) → Synthesizer → Predictor? →
//! Verifier`, single pass, no backtracking. One token budget is shared
//! across stages; optional stages are skipped rather than overrunning
//! it. A caller-supplied deadline aborts between stages, and an aborted
//! run never reaches the cache (the service layer only persists
//! successful outputs).

use std::collections::HashMap;
use std::time::Instant;

use jataka_core::config::{PipelineConfig, RetrievalConfig};
use jataka_core::errors::{JatakaResult, PipelineError};
use jataka_core::models::{
    ChartFeatures, DomainAnalysis, OrchestrationMetadata, Prediction, QueryContext, RankedRule,
    RetrievalResult, Role, TokenBudget, VerificationReport,
};
use jataka_core::traits::{ICompletionProvider, IEmbeddingProvider, IRetriever, IRuleStorage};
use jataka_retrieval::RetrievalEngine;
use tracing::{debug, info, warn};

use crate::coordinator;
use crate::predictor;
use crate::synthesizer;
use crate::verifier::Verifier;

/// Everything the pipeline needs for one run.
#[derive(Debug, Clone)]
pub struct PipelineInput {
    pub subject_id: String,
    pub chart: ChartFeatures,
    pub query: Option<String>,
    /// Explicit domains; empty leaves the choice to the Coordinator.
    pub domains: Vec<String>,
    pub include_predictions: bool,
    pub prediction_window_months: u32,
    /// Adds the transit scope key to the query context.
    pub include_transits: bool,
}

/// One domain's retrieved rules, grouping preserved for the Synthesizer.
#[derive(Debug, Clone)]
pub struct DomainRules {
    pub domain: String,
    pub result: RetrievalResult,
}

/// The verified output of one run — what the cache stores.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub interpretation: String,
    pub domain_analyses: Vec<DomainAnalysis>,
    pub predictions: Vec<Prediction>,
    pub rules_used: Vec<String>,
    pub verification: VerificationReport,
    pub metadata: OrchestrationMetadata,
}

/// The orchestration engine. All collaborators are injected.
pub struct PipelineEngine<'a> {
    storage: &'a dyn IRuleStorage,
    embeddings: Option<&'a dyn IEmbeddingProvider>,
    completions: &'a dyn ICompletionProvider,
    retrieval_config: RetrievalConfig,
    config: PipelineConfig,
    verifier: Verifier,
}

impl<'a> PipelineEngine<'a> {
    pub fn new(
        storage: &'a dyn IRuleStorage,
        embeddings: Option<&'a dyn IEmbeddingProvider>,
        completions: &'a dyn ICompletionProvider,
        retrieval_config: RetrievalConfig,
        config: PipelineConfig,
    ) -> Self {
        Self {
            storage,
            embeddings,
            completions,
            retrieval_config,
            config,
            verifier: Verifier::default(),
        }
    }

    /// Swap the contradiction policy (pluggable by design).
    pub fn with_verifier(mut self, verifier: Verifier) -> Self {
        self.verifier = verifier;
        self
    }

    /// Run the full pipeline once.
    pub fn run(&self, input: &PipelineInput, deadline: Option<Instant>) -> JatakaResult<PipelineOutput> {
        let mut budget = TokenBudget::new(self.config.token_budget);
        let mut roles: Vec<Role> = Vec::new();

        // --- Coordinator ---
        let domains = coordinator::select_domains(&input.domains, input.query.as_deref());
        roles.push(Role::Coordinator);
        info!(?domains, subject = %input.subject_id, "pipeline started");
        check_deadline(deadline, "coordinator")?;

        // --- Retriever, fanned out per domain ---
        let groups = self.retrieve_stage(input, &domains)?;
        roles.push(Role::Retriever);
        check_deadline(deadline, "retriever")?;

        // Deduplicated union across domains; the Verifier checks
        // citations against exactly this set.
        let retrieved: HashMap<String, RankedRule> = groups
            .iter()
            .flat_map(|g| g.result.rules.iter())
            .map(|r| (r.rule.rule_id.clone(), r.clone()))
            .collect();
        debug!(unique_rules = retrieved.len(), "retrieval union built");

        // --- Synthesizer (core stage, clamps to the remaining budget) ---
        let cap = self.config.synthesis_max_tokens.min(budget.remaining().max(1));
        let synthesis = synthesizer::synthesize(
            self.completions,
            &groups,
            input.query.as_deref(),
            cap,
        )?;
        budget.consume(Role::Synthesizer, synthesis.tokens_used);
        roles.push(Role::Synthesizer);
        check_deadline(deadline, "synthesizer")?;

        // --- Predictor (optional, skipped on budget exhaustion) ---
        let mut predictions = Vec::new();
        if input.include_predictions {
            let mut ran_predictor = false;
            for group in &groups {
                if !budget.can_afford(self.config.prediction_max_tokens) {
                    warn!(
                        domain = %group.domain,
                        needed = self.config.prediction_max_tokens,
                        available = budget.remaining(),
                        "budget exhausted, skipping remaining predictions"
                    );
                    break;
                }
                let (prediction, tokens) = predictor::predict_domain(
                    self.completions,
                    group,
                    input.prediction_window_months,
                    self.config.prediction_max_tokens,
                );
                budget.consume(Role::Predictor, tokens);
                predictions.push(prediction);
                ran_predictor = true;
            }
            if ran_predictor {
                roles.push(Role::Predictor);
            }
            check_deadline(deadline, "predictor")?;
        }

        // --- Verifier (core stage, pure) ---
        let (verification, rules_used) = self.verifier.verify(
            &synthesis.interpretation,
            &synthesis.analyses,
            &predictions,
            &retrieved,
        );
        roles.push(Role::Verifier);

        let metadata = OrchestrationMetadata {
            roles_executed: roles,
            domains_analyzed: domains,
            tokens_used: budget.used,
            token_budget: budget.limit,
            model: self.completions.model().to_string(),
        };

        info!(
            tokens = metadata.tokens_used,
            quality = verification.quality_score,
            rules_used = rules_used.len(),
            "pipeline complete"
        );

        Ok(PipelineOutput {
            interpretation: synthesis.interpretation,
            domain_analyses: synthesis.analyses,
            predictions,
            rules_used,
            verification,
            metadata,
        })
    }

    /// Per-domain retrieval fan-out. Domain calls are independent, so
    /// they run on scoped threads, bounded by the domain count.
    fn retrieve_stage(
        &self,
        input: &PipelineInput,
        domains: &[String],
    ) -> JatakaResult<Vec<DomainRules>> {
        let mut context = QueryContext::from_chart(&input.chart);
        if let Some(query) = &input.query {
            context = context.with_query(query.clone());
        }
        if input.include_transits {
            context.keys.push("transit".to_string());
        }

        let engine = RetrievalEngine::new(
            self.storage,
            self.embeddings,
            self.retrieval_config.clone(),
        );
        let limit = self.retrieval_config.default_limit;
        let min_weight = self.retrieval_config.default_min_weight;

        let results: Vec<JatakaResult<DomainRules>> = std::thread::scope(|scope| {
            let handles: Vec<_> = domains
                .iter()
                .map(|domain| {
                    let ctx = context.clone().with_domain(domain.clone());
                    let engine = &engine;
                    scope.spawn(move || {
                        engine.retrieve(&ctx, limit, min_weight).map(|result| DomainRules {
                            domain: ctx.domain.clone().unwrap_or_default(),
                            result,
                        })
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| {
                    h.join().unwrap_or_else(|_| {
                        Err(jataka_core::errors::RetrievalError::SearchFailed {
                            reason: "retriever thread panicked".to_string(),
                        }
                        .into())
                    })
                })
                .collect()
        });

        results.into_iter().collect()
    }
}

/// Abort between stages once the caller's deadline has passed.
fn check_deadline(deadline: Option<Instant>, stage: &str) -> JatakaResult<()> {
    if let Some(deadline) = deadline {
        if Instant::now() >= deadline {
            return Err(PipelineError::DeadlineExceeded {
                stage: stage.to_string(),
            }
            .into());
        }
    }
    Ok(())
}
