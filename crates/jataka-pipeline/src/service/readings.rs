//! Reading service: cache-aware orchestration entry points.

use std::time::Instant;

use chrono::Utc;
use jataka_core::config::CacheConfig;
use jataka_core::errors::JatakaResult;
use jataka_core::models::{ChartFeatures, ReadingSession};
use jataka_core::traits::ISessionStore;
use jataka_cache::{canonical_hash, CacheService, CanonicalParams};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{PipelineEngine, PipelineInput};

/// Body of a reading request.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadingRequest {
    pub subject_id: String,
    #[serde(default)]
    pub chart: ChartFeatures,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub include_predictions: bool,
    #[serde(default)]
    pub include_transits: bool,
    #[serde(default = "default_window")]
    pub prediction_window_months: u32,
    #[serde(default)]
    pub force_regenerate: bool,
}

fn default_window() -> u32 {
    12
}

/// A reading plus whether it came from the cache.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingResponse {
    pub session: ReadingSession,
    pub cache_hit: bool,
}

/// Cache-aware orchestration operations.
pub struct ReadingService<'a> {
    pipeline: &'a PipelineEngine<'a>,
    sessions: &'a dyn ISessionStore,
    config: CacheConfig,
}

impl<'a> ReadingService<'a> {
    pub fn new(
        pipeline: &'a PipelineEngine<'a>,
        sessions: &'a dyn ISessionStore,
        config: CacheConfig,
    ) -> Self {
        Self {
            pipeline,
            sessions,
            config,
        }
    }

    /// `POST /readings/ai` semantics.
    pub fn generate(&self, request: &ReadingRequest) -> JatakaResult<ReadingResponse> {
        self.generate_with_deadline(request, None)
    }

    /// Same, aborting the pipeline at the next stage boundary once the
    /// deadline passes. An aborted run returns the error and never
    /// writes to the cache.
    pub fn generate_with_deadline(
        &self,
        request: &ReadingRequest,
        deadline: Option<Instant>,
    ) -> JatakaResult<ReadingResponse> {
        let digest = canonical_hash(&CanonicalParams {
            subject_id: request.subject_id.clone(),
            domains: request.domains.clone(),
            include_predictions: request.include_predictions,
            prediction_window_months: request.prediction_window_months,
        });

        let cache = CacheService::new(self.sessions);
        if !request.force_regenerate {
            if let Some(session) = cache.get_fresh(&digest, self.config.freshness_secs)? {
                info!(digest = %digest, "serving cached reading");
                return Ok(ReadingResponse {
                    session,
                    cache_hit: true,
                });
            }
        }

        let input = PipelineInput {
            subject_id: request.subject_id.clone(),
            chart: request.chart.clone(),
            query: request.query.clone(),
            domains: request.domains.clone(),
            include_predictions: request.include_predictions,
            prediction_window_months: request.prediction_window_months,
            include_transits: request.include_transits,
        };
        let output = self.pipeline.run(&input, deadline)?;

        let now = Utc::now();
        let session = ReadingSession {
            id: uuid::Uuid::new_v4().to_string(),
            canonical_hash: digest,
            subject_id: request.subject_id.clone(),
            interpretation: output.interpretation,
            domain_analyses: output.domain_analyses,
            predictions: output.predictions,
            rules_used: output.rules_used,
            verification: output.verification,
            metadata: output.metadata,
            created_at: now,
            access_count: 0,
            last_accessed_at: now,
            feedback_rating: None,
            feedback_text: None,
        };

        // Either our insert wins, or a concurrent run's row comes back —
        // both are the one canonical result for this digest.
        let (persisted, _inserted) = cache.store_or_get(&session)?;
        Ok(ReadingResponse {
            session: persisted,
            cache_hit: false,
        })
    }

    /// `POST /readings/ask` semantics: lighter single-question answers —
    /// predictions off, domains left to the Coordinator.
    pub fn ask(&self, request: &ReadingRequest) -> JatakaResult<ReadingResponse> {
        let mut request = request.clone();
        request.include_predictions = false;
        request.domains.clear();
        self.generate(&request)
    }

    /// Attach user feedback to a persisted session.
    pub fn record_feedback(
        &self,
        session_id: &str,
        rating: Option<u8>,
        text: Option<&str>,
    ) -> JatakaResult<()> {
        self.sessions.record_feedback(session_id, rating, text)
    }
}
