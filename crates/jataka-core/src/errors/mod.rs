//! Error taxonomy, one enum per subsystem, aggregated into [`JatakaError`].

mod embedding_error;
mod ingest_error;
mod pipeline_error;
mod retrieval_error;
mod storage_error;

pub use embedding_error::EmbeddingError;
pub use ingest_error::IngestError;
pub use pipeline_error::PipelineError;
pub use retrieval_error::RetrievalError;
pub use storage_error::StorageError;

/// Top-level error type. Subsystem errors convert via `#[from]`.
#[derive(Debug, thiserror::Error)]
pub enum JatakaError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("rule not found: {rule_id}")]
    RuleNotFound { rule_id: String },

    #[error("session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {reason}")]
    Config { reason: String },
}

/// Convenience result alias used across all crates.
pub type JatakaResult<T> = Result<T, JatakaError>;
