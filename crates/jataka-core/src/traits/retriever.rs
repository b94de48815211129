use crate::errors::JatakaResult;
use crate::models::{QueryContext, RetrievalResult};

/// Hybrid rule retrieval.
pub trait IRetriever: Send + Sync {
    /// Retrieve up to `limit` rules for the context, dropping rules with
    /// weight below `min_weight`.
    fn retrieve(
        &self,
        context: &QueryContext,
        limit: usize,
        min_weight: f64,
    ) -> JatakaResult<RetrievalResult>;
}
