//! Property tests: retrieval monotonicity and ordering invariants.

use jataka_core::config::RetrievalConfig;
use jataka_core::models::QueryContext;
use jataka_core::rule::{KeyType, Rule, RuleStatus, SymbolicKey, Weight};
use jataka_core::traits::{IRetriever, IRuleStorage};
use jataka_retrieval::RetrievalEngine;
use jataka_storage::StorageEngine;
use proptest::prelude::*;

fn seed_rules(storage: &StorageEngine, weights: &[f64]) {
    for (i, weight) in weights.iter().enumerate() {
        let condition = format!("condition {i}");
        let effect = format!("effect {i}");
        let rule = Rule {
            rule_id: format!("R{i}"),
            domain: "career".to_string(),
            condition: condition.clone(),
            effect: effect.clone(),
            weight: Weight::new(*weight),
            anchor: "test".to_string(),
            commentary: None,
            modifiers: vec![],
            applicable_scopes: vec![],
            cancelers: vec![],
            status: RuleStatus::Active,
            version: 1,
            content_hash: Rule::compute_content_hash(&condition, &effect),
        };
        storage.create_rule(&rule).unwrap();
        storage
            .store_symbolic_keys(&[SymbolicKey::new(
                format!("R{i}"),
                KeyType::PlanetHouse,
                "Sun_10",
            )])
            .unwrap();
    }
}

proptest! {
    // Raising min_weight never increases the result count.
    #[test]
    fn prop_min_weight_is_monotone(
        weights in proptest::collection::vec(0.0f64..=1.0, 1..12),
        lower in 0.0f64..=1.0,
        raise in 0.0f64..=0.5,
    ) {
        let storage = StorageEngine::open_in_memory().unwrap();
        seed_rules(&storage, &weights);

        let engine = RetrievalEngine::new(&storage, None, RetrievalConfig::default());
        let context = QueryContext {
            keys: vec!["Sun_10".to_string()],
            query: None,
            domain: None,
        };

        let limit = weights.len() + 1;
        let low = engine.retrieve(&context, limit, lower).unwrap();
        let high = engine.retrieve(&context, limit, (lower + raise).min(1.0)).unwrap();

        prop_assert!(high.rules.len() <= low.rules.len());
        prop_assert!(high.total_matches <= low.total_matches);
    }

    // Results are always ordered by non-increasing relevance.
    #[test]
    fn prop_results_ordered_by_relevance(
        weights in proptest::collection::vec(0.0f64..=1.0, 1..12),
    ) {
        let storage = StorageEngine::open_in_memory().unwrap();
        seed_rules(&storage, &weights);

        let engine = RetrievalEngine::new(&storage, None, RetrievalConfig::default());
        let context = QueryContext {
            keys: vec!["Sun_10".to_string()],
            query: None,
            domain: None,
        };

        let result = engine.retrieve(&context, weights.len(), 0.0).unwrap();
        prop_assert!(result
            .rules
            .windows(2)
            .all(|w| w[0].relevance_score >= w[1].relevance_score));
    }
}
