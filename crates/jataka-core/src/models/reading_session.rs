use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::prediction::Prediction;
use super::verification::VerificationReport;

/// The five pipeline roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Coordinator,
    Retriever,
    Synthesizer,
    Predictor,
    Verifier,
}

/// Short per-domain analysis produced by the Synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainAnalysis {
    pub domain: String,
    pub analysis: String,
    /// Rule ids that ground this domain's analysis.
    pub rule_ids: Vec<String>,
}

/// Bookkeeping for one orchestration run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationMetadata {
    pub roles_executed: Vec<Role>,
    pub domains_analyzed: Vec<String>,
    pub tokens_used: usize,
    pub token_budget: usize,
    pub model: String,
}

/// A persisted, cached reading — one row per canonical hash.
///
/// Created by the pipeline on cache miss; readers only bump the access
/// counters and may attach feedback. Freshness is a read-time check, so
/// stale rows need no hard delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSession {
    pub id: String,
    pub canonical_hash: String,
    pub subject_id: String,
    pub interpretation: String,
    pub domain_analyses: Vec<DomainAnalysis>,
    pub predictions: Vec<Prediction>,
    /// Citations actually emitted by the run, validated by the Verifier.
    pub rules_used: Vec<String>,
    pub verification: VerificationReport,
    pub metadata: OrchestrationMetadata,
    pub created_at: DateTime<Utc>,
    pub access_count: u64,
    pub last_accessed_at: DateTime<Utc>,
    pub feedback_rating: Option<u8>,
    pub feedback_text: Option<String>,
}

impl ReadingSession {
    /// Age of the session at `now`.
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_seconds()
    }

    /// Read-time freshness check.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age_secs: i64) -> bool {
        self.age_secs(now) <= max_age_secs
    }
}
