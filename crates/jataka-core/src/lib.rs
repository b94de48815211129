//! # jataka-core
//!
//! Foundation crate for the Jataka reading engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod rule;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::JatakaConfig;
pub use errors::{JatakaError, JatakaResult};
pub use rule::{KeyType, Rule, RuleEmbedding, RuleStatus, SymbolicKey, Weight};
