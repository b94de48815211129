/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("invalid limit {limit}: must be between 1 and {max}")]
    InvalidLimit { limit: usize, max: usize },

    #[error("invalid min_weight {value}: must be between 0.0 and 1.0")]
    InvalidMinWeight { value: f64 },

    #[error("search failed: {reason}")]
    SearchFailed { reason: String },
}
