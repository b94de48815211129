//! Coordinator: decides the working domain set.
//!
//! Explicit domains are used verbatim. Otherwise the query is classified
//! by keyword families; with no query either, the run defaults to the
//! general domain. This is the only stage allowed to branch the width of
//! the rest of the pipeline.

use jataka_core::constants::{GENERAL_DOMAIN, MAX_PIPELINE_DOMAINS};
use tracing::debug;

/// Keyword families per domain. A query matching several families fans
/// the pipeline out across all of them.
const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "career",
        &["career", "job", "profession", "work", "promotion", "business", "employment"],
    ),
    (
        "relationships",
        &["marriage", "relationship", "partner", "spouse", "love", "romance", "divorce"],
    ),
    (
        "wealth",
        &["wealth", "money", "finance", "income", "property", "investment", "debt"],
    ),
    (
        "health",
        &["health", "illness", "disease", "vitality", "recovery", "surgery"],
    ),
    (
        "education",
        &["education", "study", "studies", "learning", "exam", "degree"],
    ),
    (
        "spirituality",
        &["spiritual", "spirituality", "moksha", "meditation", "dharma", "pilgrimage"],
    ),
];

/// Select the working domain set for a run.
pub fn select_domains(explicit: &[String], query: Option<&str>) -> Vec<String> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }

    let classified = query.map(classify_query).unwrap_or_default();
    if classified.is_empty() {
        return vec![GENERAL_DOMAIN.to_string()];
    }
    classified
}

/// Classify a free-text query into 1–N domains by keyword match.
pub fn classify_query(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut domains: Vec<String> = DOMAIN_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(domain, _)| domain.to_string())
        .collect();

    domains.truncate(MAX_PIPELINE_DOMAINS);
    debug!(query, ?domains, "classified query");
    domains
}
