//! Request/response models shared across the pipeline, retriever, and cache.

mod ingest_report;
mod prediction;
mod query_context;
mod reading_session;
mod retrieval_result;
mod stats;
mod token_budget;
mod verification;

pub use ingest_report::{IngestItemError, IngestReport};
pub use prediction::{KeyPeriod, Prediction};
pub use query_context::{ChartFeatures, HouseLordPlacement, PlanetPosition, QueryContext};
pub use reading_session::{DomainAnalysis, OrchestrationMetadata, ReadingSession, Role};
pub use retrieval_result::{RankedRule, RetrievalMethod, RetrievalResult};
pub use stats::RuleStats;
pub use token_budget::TokenBudget;
pub use verification::{CitationMetrics, ConfidenceLevel, VerificationReport};
