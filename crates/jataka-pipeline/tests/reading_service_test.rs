//! Reading service tests: canonical caching, ask mode, and the
//! never-cache-a-failed-run guarantee.

use std::time::Instant;

use jataka_core::config::{CacheConfig, EmbeddingConfig, PipelineConfig, RetrievalConfig};
use jataka_core::models::{ChartFeatures, PlanetPosition};
use jataka_core::rule::{Rule, RuleStatus, Weight};
use jataka_embeddings::EmbeddingEngine;
use jataka_ingest::{IngestEngine, IngestOptions};
use jataka_pipeline::providers::CompletionChain;
use jataka_pipeline::service::{ReadingRequest, ReadingService};
use jataka_pipeline::PipelineEngine;
use jataka_storage::StorageEngine;

fn make_rule(id: &str, domain: &str, weight: f64, condition: &str, effect: &str) -> Rule {
    Rule {
        rule_id: id.to_string(),
        domain: domain.to_string(),
        condition: condition.to_string(),
        effect: effect.to_string(),
        weight: Weight::new(weight),
        anchor: "Saravali 30.2".to_string(),
        commentary: None,
        modifiers: vec![],
        applicable_scopes: vec!["natal".to_string()],
        cancelers: vec![],
        status: RuleStatus::Active,
        version: 1,
        content_hash: Rule::compute_content_hash(condition, effect),
    }
}

fn seeded_storage() -> StorageEngine {
    let storage = StorageEngine::open_in_memory().unwrap();
    let embeddings = EmbeddingEngine::new(EmbeddingConfig {
        provider: "hashed".to_string(),
        dimensions: 64,
        model_version: "test-v1".to_string(),
        ..Default::default()
    });
    let ingest = IngestEngine::new(&storage, Some(&embeddings));
    let rules = vec![
        make_rule(
            "CAREER-1",
            "career",
            0.8,
            "Sun in 10th house",
            "gains authority and success in profession",
        ),
        make_rule(
            "GENERAL-1",
            "general",
            0.5,
            "benefic ascendant",
            "balanced temperament",
        ),
    ];
    ingest.ingest_batch(&rules, &IngestOptions::default()).unwrap();
    storage
}

fn chart() -> ChartFeatures {
    ChartFeatures {
        positions: vec![PlanetPosition {
            planet: "Sun".to_string(),
            house: 10,
            sign: "Leo".to_string(),
        }],
        house_lords: vec![],
        yogas: vec![],
    }
}

fn request(subject: &str) -> ReadingRequest {
    ReadingRequest {
        subject_id: subject.to_string(),
        chart: chart(),
        query: Some("career prospects".to_string()),
        domains: vec!["career".to_string()],
        include_predictions: true,
        include_transits: false,
        prediction_window_months: 12,
        force_regenerate: false,
    }
}

#[test]
fn identical_request_within_window_is_a_cache_hit() {
    let storage = seeded_storage();
    let completions = CompletionChain::template_only();
    let pipeline = PipelineEngine::new(
        &storage,
        None,
        &completions,
        RetrievalConfig::default(),
        PipelineConfig::default(),
    );
    let service = ReadingService::new(&pipeline, &storage, CacheConfig::default());

    let first = service.generate(&request("subject-1")).unwrap();
    assert!(!first.cache_hit);

    let second = service.generate(&request("subject-1")).unwrap();
    assert!(second.cache_hit);
    assert_eq!(second.session.id, first.session.id);
    assert_eq!(second.session.rules_used, first.session.rules_used);
}

#[test]
fn domain_order_does_not_defeat_the_cache() {
    let storage = seeded_storage();
    let completions = CompletionChain::template_only();
    let pipeline = PipelineEngine::new(
        &storage,
        None,
        &completions,
        RetrievalConfig::default(),
        PipelineConfig::default(),
    );
    let service = ReadingService::new(&pipeline, &storage, CacheConfig::default());

    let mut req_a = request("subject-1");
    req_a.domains = vec!["career".to_string(), "wealth".to_string()];
    let mut req_b = request("subject-1");
    req_b.domains = vec!["wealth".to_string(), "career".to_string()];

    let first = service.generate(&req_a).unwrap();
    let second = service.generate(&req_b).unwrap();
    assert!(second.cache_hit);
    assert_eq!(second.session.id, first.session.id);
}

#[test]
fn force_regenerate_bypasses_the_freshness_read() {
    let storage = seeded_storage();
    let completions = CompletionChain::template_only();
    let pipeline = PipelineEngine::new(
        &storage,
        None,
        &completions,
        RetrievalConfig::default(),
        PipelineConfig::default(),
    );
    let service = ReadingService::new(&pipeline, &storage, CacheConfig::default());

    service.generate(&request("subject-1")).unwrap();

    let mut forced = request("subject-1");
    forced.force_regenerate = true;
    let response = service.generate(&forced).unwrap();

    // Recomputed, but the original row stays canonical for its digest.
    assert!(!response.cache_hit);
}

#[test]
fn ask_disables_predictions_and_lets_coordinator_choose() {
    let storage = seeded_storage();
    let completions = CompletionChain::template_only();
    let pipeline = PipelineEngine::new(
        &storage,
        None,
        &completions,
        RetrievalConfig::default(),
        PipelineConfig::default(),
    );
    let service = ReadingService::new(&pipeline, &storage, CacheConfig::default());

    let mut req = request("subject-ask");
    req.include_predictions = true; // ask must override this
    let response = service.ask(&req).unwrap();

    assert!(response.session.predictions.is_empty());
    assert_eq!(
        response.session.metadata.domains_analyzed,
        vec!["career".to_string()]
    );
}

#[test]
fn aborted_run_is_never_cached() {
    let storage = seeded_storage();
    let completions = CompletionChain::template_only();
    let pipeline = PipelineEngine::new(
        &storage,
        None,
        &completions,
        RetrievalConfig::default(),
        PipelineConfig::default(),
    );
    let service = ReadingService::new(&pipeline, &storage, CacheConfig::default());

    let aborted = service.generate_with_deadline(&request("subject-1"), Some(Instant::now()));
    assert!(aborted.is_err());

    // Nothing was persisted: the next call computes fresh.
    let response = service.generate(&request("subject-1")).unwrap();
    assert!(!response.cache_hit);
}

#[test]
fn feedback_round_trips_through_the_service() {
    let storage = seeded_storage();
    let completions = CompletionChain::template_only();
    let pipeline = PipelineEngine::new(
        &storage,
        None,
        &completions,
        RetrievalConfig::default(),
        PipelineConfig::default(),
    );
    let service = ReadingService::new(&pipeline, &storage, CacheConfig::default());

    let response = service.generate(&request("subject-1")).unwrap();
    service
        .record_feedback(&response.session.id, Some(5), Some("spot on"))
        .unwrap();

    let cached = service.generate(&request("subject-1")).unwrap();
    assert!(cached.cache_hit);
    assert_eq!(cached.session.feedback_rating, Some(5));
}
