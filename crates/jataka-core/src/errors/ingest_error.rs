/// Ingestion errors. Per-item failures are recorded in the batch report,
/// not propagated — these variants describe what went wrong for one rule.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("validation failed for rule '{rule_id}': {reason}")]
    ValidationFailed { rule_id: String, reason: String },

    #[error("embedding generation failed for rule '{rule_id}': {reason}")]
    EmbeddingFailed { rule_id: String, reason: String },

    #[error("duplicate rule id '{rule_id}' in batch")]
    DuplicateInBatch { rule_id: String },
}
