//! Integration tests: batch isolation, idempotence, and key derivation
//! against real storage.

use jataka_core::config::EmbeddingConfig;
use jataka_core::rule::{Rule, RuleStatus, Weight};
use jataka_core::traits::IRuleStorage;
use jataka_embeddings::EmbeddingEngine;
use jataka_ingest::{IngestEngine, IngestOptions};
use jataka_storage::StorageEngine;

fn make_rule(id: &str, condition: &str, effect: &str) -> Rule {
    Rule {
        rule_id: id.to_string(),
        domain: "career".to_string(),
        condition: condition.to_string(),
        effect: effect.to_string(),
        weight: Weight::new(0.8),
        anchor: "BPHS 24.11".to_string(),
        commentary: None,
        modifiers: vec![],
        applicable_scopes: vec!["natal".to_string()],
        cancelers: vec![],
        status: RuleStatus::Active,
        version: 1,
        content_hash: Rule::compute_content_hash(condition, effect),
    }
}

fn embedding_engine() -> EmbeddingEngine {
    EmbeddingEngine::new(EmbeddingConfig {
        provider: "hashed".to_string(),
        dimensions: 64,
        model_version: "test-v1".to_string(),
        ..Default::default()
    })
}

#[test]
fn batch_ingests_rules_keys_and_embeddings() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let embeddings = embedding_engine();
    let engine = IngestEngine::new(&storage, Some(&embeddings));

    let rules = vec![
        make_rule("R1", "Sun in 10th house", "authority in profession"),
        make_rule("R2", "10th lord in 4th house", "career tied to homeland"),
    ];

    let report = engine.ingest_batch(&rules, &IngestOptions::default()).unwrap();

    assert_eq!(report.ingested_ids, vec!["R1".to_string(), "R2".to_string()]);
    assert_eq!(report.embeddings_generated, 2);
    assert!(report.errors.is_empty());
    assert!(report.keys_generated >= 4); // structural + domain + scope keys

    // Symbolic lookup works end to end.
    let ids = storage.rule_ids_for_keys(&["Sun_10".to_string()]).unwrap();
    assert_eq!(ids, vec!["R1".to_string()]);
    let ids = storage
        .rule_ids_for_keys(&["10_lord_in_4".to_string()])
        .unwrap();
    assert_eq!(ids, vec!["R2".to_string()]);
}

#[test]
fn one_bad_rule_does_not_abort_the_batch() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let engine = IngestEngine::new(&storage, None);

    let mut bad = make_rule("BAD", "condition", "effect");
    bad.domain = String::new();

    let rules = vec![
        make_rule("R1", "Sun in 10th house", "authority"),
        bad,
        make_rule("R2", "Moon in 4th house", "comforts at home"),
    ];

    let report = engine.ingest_batch(&rules, &IngestOptions::default()).unwrap();

    assert_eq!(report.ingested_ids, vec!["R1".to_string(), "R2".to_string()]);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].rule_id, "BAD");
    assert!(storage.get_rule("R1").unwrap().is_some());
    assert!(storage.get_rule("BAD").unwrap().is_none());
}

#[test]
fn duplicate_id_in_batch_is_reported() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let engine = IngestEngine::new(&storage, None);

    let rules = vec![
        make_rule("R1", "Sun in 10th house", "authority"),
        make_rule("R1", "Sun in 10th house", "authority"),
    ];

    let report = engine.ingest_batch(&rules, &IngestOptions::default()).unwrap();
    assert_eq!(report.ingested_count(), 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].reason.contains("duplicate"));
}

#[test]
fn reingest_with_same_model_version_skips_embedding() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let embeddings = embedding_engine();
    let engine = IngestEngine::new(&storage, Some(&embeddings));

    let rules = vec![make_rule("R1", "Sun in 10th house", "authority")];

    let first = engine.ingest_batch(&rules, &IngestOptions::default()).unwrap();
    assert_eq!(first.embeddings_generated, 1);

    let second = engine.ingest_batch(&rules, &IngestOptions::default()).unwrap();
    assert!(second.errors.is_empty());
    assert_eq!(second.embeddings_generated, 0);
}

#[test]
fn changed_content_for_existing_id_is_rejected() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let engine = IngestEngine::new(&storage, None);

    engine
        .ingest_batch(
            &[make_rule("R1", "Sun in 10th house", "authority")],
            &IngestOptions::default(),
        )
        .unwrap();

    let report = engine
        .ingest_batch(
            &[make_rule("R1", "Sun in 10th house", "a different effect")],
            &IngestOptions::default(),
        )
        .unwrap();

    assert!(report.ingested_ids.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].reason.contains("different content"));
}

#[test]
fn mismatched_content_hash_is_rejected() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let engine = IngestEngine::new(&storage, None);

    let mut rule = make_rule("R1", "Sun in 10th house", "authority");
    rule.content_hash = "stale-hash".to_string();

    let report = engine
        .ingest_batch(&[rule], &IngestOptions::default())
        .unwrap();
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].reason.contains("content_hash"));
}

#[test]
fn keys_can_be_disabled() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let engine = IngestEngine::new(&storage, None);

    let opts = IngestOptions {
        generate_embeddings: false,
        extract_keys: false,
    };
    let report = engine
        .ingest_batch(&[make_rule("R1", "Sun in 10th house", "authority")], &opts)
        .unwrap();

    assert_eq!(report.keys_generated, 0);
    assert_eq!(storage.count_symbolic_keys().unwrap(), 0);
}
