//! IngestEngine — batch ingestion with per-item isolation.

use std::collections::HashSet;
use std::time::Instant;

use jataka_core::errors::{IngestError, JatakaResult};
use jataka_core::models::{IngestItemError, IngestReport};
use jataka_core::rule::{Rule, RuleEmbedding};
use jataka_core::traits::IRuleStorage;
use jataka_embeddings::EmbeddingEngine;
use tracing::{debug, info, warn};

use crate::keys;
use crate::validate;

/// Ingestion switches, per batch.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub generate_embeddings: bool,
    pub extract_keys: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            generate_embeddings: true,
            extract_keys: true,
        }
    }
}

/// The knowledge ingestor. Providers are injected; a missing embedding
/// engine simply disables the embedding step.
pub struct IngestEngine<'a> {
    storage: &'a dyn IRuleStorage,
    embeddings: Option<&'a EmbeddingEngine>,
}

impl<'a> IngestEngine<'a> {
    pub fn new(storage: &'a dyn IRuleStorage, embeddings: Option<&'a EmbeddingEngine>) -> Self {
        Self {
            storage,
            embeddings,
        }
    }

    /// Ingest a batch of rules. Every rule is processed independently:
    /// a validation or provider failure is recorded against that rule's
    /// id and the batch continues.
    pub fn ingest_batch(&self, rules: &[Rule], opts: &IngestOptions) -> JatakaResult<IngestReport> {
        let started = Instant::now();
        let mut report = IngestReport::default();
        let mut seen_ids: HashSet<&str> = HashSet::new();

        for rule in rules {
            if !seen_ids.insert(rule.rule_id.as_str()) {
                report.errors.push(item_error(IngestError::DuplicateInBatch {
                    rule_id: rule.rule_id.clone(),
                }));
                continue;
            }

            match self.ingest_one(rule, opts) {
                Ok((embedded, key_count)) => {
                    report.ingested_ids.push(rule.rule_id.clone());
                    if embedded {
                        report.embeddings_generated += 1;
                    }
                    report.keys_generated += key_count;
                }
                Err(e) => {
                    warn!(rule_id = %rule.rule_id, error = %e, "rule ingestion failed");
                    report.errors.push(item_error(e));
                }
            }
        }

        report.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            ingested = report.ingested_count(),
            embeddings = report.embeddings_generated,
            keys = report.keys_generated,
            errors = report.errors.len(),
            "ingestion batch complete"
        );
        Ok(report)
    }

    /// Ingest one rule: validate, write, extract keys, embed.
    /// Returns (embedding_generated, key_count).
    fn ingest_one(&self, rule: &Rule, opts: &IngestOptions) -> Result<(bool, usize), IngestError> {
        validate_rule_checked(rule)?;

        // Re-ingesting an identical rule is tolerated so embedding/key
        // backfills can rerun a batch; a changed payload for an existing
        // id is rejected — published rules are immutable.
        let existing = self
            .storage
            .get_rule(&rule.rule_id)
            .map_err(|e| storage_failure(rule, e))?;
        match &existing {
            Some(current) if !current.content_eq(rule) => {
                return Err(IngestError::ValidationFailed {
                    rule_id: rule.rule_id.clone(),
                    reason: "rule exists with different content; publish a new version id"
                        .to_string(),
                });
            }
            Some(_) => {}
            None => {
                self.storage
                    .create_rule(rule)
                    .map_err(|e| storage_failure(rule, e))?;
            }
        }

        let mut key_count = 0;
        if opts.extract_keys {
            let keys = keys::extract_keys(rule);
            key_count = keys.len();
            self.storage
                .store_symbolic_keys(&keys)
                .map_err(|e| storage_failure(rule, e))?;
            debug!(rule_id = %rule.rule_id, keys = key_count, "symbolic keys stored");
        }

        let mut embedded = false;
        if opts.generate_embeddings {
            if let Some(engine) = self.embeddings {
                embedded = self.embed_rule(rule, engine)?;
            }
        }

        Ok((embedded, key_count))
    }

    /// Generate and store the rule's embedding unless one already exists
    /// for the current model version (idempotent re-ingest).
    fn embed_rule(&self, rule: &Rule, engine: &EmbeddingEngine) -> Result<bool, IngestError> {
        use jataka_core::traits::IEmbeddingProvider;

        let model_version = engine.model_version();
        let already = self
            .storage
            .has_embedding(&rule.rule_id, model_version)
            .map_err(|e| storage_failure(rule, e))?;
        if already {
            debug!(rule_id = %rule.rule_id, model_version, "embedding up to date, skipping");
            return Ok(false);
        }

        let vector = engine
            .embed_rule(rule)
            .map_err(|e| IngestError::EmbeddingFailed {
                rule_id: rule.rule_id.clone(),
                reason: e.to_string(),
            })?;

        self.storage
            .store_embedding(&RuleEmbedding::new(&rule.rule_id, vector, model_version))
            .map_err(|e| storage_failure(rule, e))?;
        Ok(true)
    }
}

fn validate_rule_checked(rule: &Rule) -> Result<(), IngestError> {
    validate::validate_rule(rule)?;
    // The stored hash must match the interpretive text it claims to cover.
    let expected = Rule::compute_content_hash(&rule.condition, &rule.effect);
    if rule.content_hash != expected {
        return Err(IngestError::ValidationFailed {
            rule_id: rule.rule_id.clone(),
            reason: "content_hash does not match condition/effect".to_string(),
        });
    }
    Ok(())
}

fn storage_failure(rule: &Rule, e: jataka_core::errors::JatakaError) -> IngestError {
    IngestError::ValidationFailed {
        rule_id: rule.rule_id.clone(),
        reason: format!("storage: {e}"),
    }
}

fn item_error(e: IngestError) -> IngestItemError {
    let rule_id = match &e {
        IngestError::ValidationFailed { rule_id, .. }
        | IngestError::EmbeddingFailed { rule_id, .. }
        | IngestError::DuplicateInBatch { rule_id } => rule_id.clone(),
    };
    IngestItemError {
        rule_id,
        reason: e.to_string(),
    }
}
