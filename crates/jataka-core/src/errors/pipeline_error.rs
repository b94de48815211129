/// Orchestration pipeline errors.
///
/// Only truly unrecoverable conditions surface as errors: verification
/// findings and budget exhaustion of optional stages are reported as data
/// in the result, never thrown.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("generation provider failed with no fallback: {reason}")]
    ProviderFailure { reason: String },

    #[error("deadline exceeded after stage '{stage}'")]
    DeadlineExceeded { stage: String },

    #[error("budget exhausted: needed {needed} tokens, available {available}")]
    BudgetExhausted { needed: usize, available: usize },
}
