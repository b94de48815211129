//! # jataka-ingest
//!
//! Batch-safe rule ingestion: validation at the boundary, pattern-based
//! symbolic key extraction, embedding generation with idempotence.
//! Each rule is ingested independently — one bad rule never aborts the
//! rest of the batch.

pub mod engine;
pub mod keys;
pub mod validate;

pub use engine::{IngestEngine, IngestOptions};
