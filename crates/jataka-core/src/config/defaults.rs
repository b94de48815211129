//! Default values referenced by the config structs.

use crate::constants;

pub const DEFAULT_READ_POOL_SIZE: usize = 4;

pub const DEFAULT_EMBEDDING_PROVIDER: &str = "http";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_MODEL_VERSION: &str = "jataka-embed-v1";
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "http://127.0.0.1:11434/api/embeddings";
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

pub const DEFAULT_RETRIEVAL_LIMIT: usize = constants::DEFAULT_RETRIEVAL_LIMIT;
pub const DEFAULT_MIN_WEIGHT: f64 = constants::DEFAULT_MIN_WEIGHT;
pub const DEFAULT_SEMANTIC_CANDIDATES: usize = 20;

pub const DEFAULT_FRESHNESS_SECS: i64 = constants::CACHE_FRESHNESS_SECS;

pub const DEFAULT_TOKEN_BUDGET: usize = constants::DEFAULT_TOKEN_BUDGET;
pub const DEFAULT_SYNTHESIS_MAX_TOKENS: usize = 2000;
pub const DEFAULT_PREDICTION_MAX_TOKENS: usize = 600;
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "http://127.0.0.1:11434/api/generate";
pub const DEFAULT_COMPLETION_MODEL: &str = "jataka-reader-v1";
pub const DEFAULT_COVERAGE_TARGET: usize = 1000;
