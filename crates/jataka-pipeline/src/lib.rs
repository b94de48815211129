//! # jataka-pipeline
//!
//! The orchestration pipeline: a strictly ordered single pass
//! `Coordinator → Retriever (per domain) → Synthesizer → Predictor? →
//! Verifier`, sharing one token budget, plus the services that back the
//! external API surface.

pub mod coordinator;
pub mod engine;
pub mod predictor;
pub mod providers;
pub mod service;
pub mod synthesizer;
pub mod verifier;

pub use engine::{DomainRules, PipelineEngine, PipelineInput, PipelineOutput};
pub use service::{ReadingService, RuleService};
