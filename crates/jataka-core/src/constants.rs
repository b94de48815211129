/// Jataka system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of rules returned by a retrieval call.
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 10;

/// Maximum number of rules a single retrieval call may request.
pub const MAX_RETRIEVAL_LIMIT: usize = 50;

/// Default minimum rule weight for retrieval.
pub const DEFAULT_MIN_WEIGHT: f64 = 0.3;

/// Domain used when no domain can be determined.
pub const GENERAL_DOMAIN: &str = "general";

/// Maximum number of domains one pipeline run will analyze.
pub const MAX_PIPELINE_DOMAINS: usize = 6;

/// Default token budget for one pipeline run.
pub const DEFAULT_TOKEN_BUDGET: usize = 8000;

/// Freshness window for cached reading sessions (24 hours).
pub const CACHE_FRESHNESS_SECS: i64 = 86_400;
