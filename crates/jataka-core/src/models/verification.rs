use serde::{Deserialize, Serialize};

/// Confidence band derived from the quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Band mapping: ≥8 high, ≥5 medium, else low.
    pub fn from_quality_score(score: f64) -> Self {
        if score >= 8.0 {
            ConfidenceLevel::High
        } else if score >= 5.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Citation accounting over one orchestration run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationMetrics {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// valid / total; 1.0 when nothing was cited.
    pub accuracy: f64,
}

impl CitationMetrics {
    pub fn new(valid: usize, invalid: usize) -> Self {
        let total = valid + invalid;
        let accuracy = if total == 0 {
            1.0
        } else {
            valid as f64 / total as f64
        };
        Self {
            total,
            valid,
            invalid,
            accuracy,
        }
    }
}

/// Output of the Verifier stage. Findings are data in the response,
/// never errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// 0–10, weighted combination of citation accuracy and finding counts.
    pub quality_score: f64,
    pub overall_confidence: ConfidenceLevel,
    pub issues: Vec<String>,
    pub contradictions: Vec<String>,
    pub citation_metrics: CitationMetrics,
}

impl VerificationReport {
    /// A pristine report for runs with nothing cited and nothing flagged.
    pub fn clean() -> Self {
        Self {
            quality_score: 10.0,
            overall_confidence: ConfidenceLevel::High,
            issues: Vec::new(),
            contradictions: Vec::new(),
            citation_metrics: CitationMetrics::new(0, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_bands() {
        assert_eq!(
            ConfidenceLevel::from_quality_score(9.2),
            ConfidenceLevel::High
        );
        assert_eq!(
            ConfidenceLevel::from_quality_score(8.0),
            ConfidenceLevel::High
        );
        assert_eq!(
            ConfidenceLevel::from_quality_score(6.5),
            ConfidenceLevel::Medium
        );
        assert_eq!(
            ConfidenceLevel::from_quality_score(4.9),
            ConfidenceLevel::Low
        );
    }

    #[test]
    fn empty_citations_count_as_accurate() {
        let metrics = CitationMetrics::new(0, 0);
        assert_eq!(metrics.accuracy, 1.0);
    }
}
