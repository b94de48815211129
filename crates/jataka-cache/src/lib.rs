//! # jataka-cache
//!
//! Canonical hashing of request-defining parameters and the cache
//! service that makes repeated identical requests cheap and idempotent
//! under concurrent access.

pub mod hash;
pub mod service;

pub use hash::{canonical_hash, CanonicalParams};
pub use service::CacheService;
