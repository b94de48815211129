use serde::{Deserialize, Serialize};

/// One failed item in an ingestion batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestItemError {
    pub rule_id: String,
    pub reason: String,
}

/// Outcome of one ingestion batch. Failures are per-item: a bad rule
/// never aborts the rest of the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestReport {
    pub ingested_ids: Vec<String>,
    pub embeddings_generated: usize,
    pub keys_generated: usize,
    pub errors: Vec<IngestItemError>,
    pub duration_ms: u64,
}

impl IngestReport {
    pub fn ingested_count(&self) -> usize {
        self.ingested_ids.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
