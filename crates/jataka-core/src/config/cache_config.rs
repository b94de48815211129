use serde::{Deserialize, Serialize};

use super::defaults;

/// Canonical cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Read-time freshness window in seconds.
    pub freshness_secs: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_secs: defaults::DEFAULT_FRESHNESS_SECS,
        }
    }
}
