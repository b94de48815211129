use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::verification::ConfidenceLevel;

/// A sub-window within a prediction's time horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPeriod {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub theme: String,
}

/// A time-windowed forecast for one domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub domain: String,
    pub narrative: String,
    /// 0–100.
    pub confidence_score: u8,
    pub confidence_level: ConfidenceLevel,
    pub key_periods: Vec<KeyPeriod>,
    pub window_months: u32,
}

impl Prediction {
    /// Map a 0–100 confidence score onto the low/medium/high bands used
    /// everywhere else (≥80 high, ≥50 medium).
    pub fn level_for_score(score: u8) -> ConfidenceLevel {
        ConfidenceLevel::from_quality_score(score as f64 / 10.0)
    }
}
