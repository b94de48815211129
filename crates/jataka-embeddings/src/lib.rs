//! # jataka-embeddings
//!
//! Embedding generation: HTTP provider with a deterministic hashed
//! fallback, ordered degradation chain, and a content-hash keyed L1 cache.

pub mod cache;
pub mod chain;
pub mod engine;
pub mod providers;

pub use engine::EmbeddingEngine;
