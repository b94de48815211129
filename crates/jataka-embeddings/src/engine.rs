//! EmbeddingEngine — the main entry point for jataka-embeddings.
//!
//! Coordinates provider selection, fallback chain, and the content-hash
//! cache. Implements `IEmbeddingProvider` so it can be injected anywhere
//! a provider is expected.

use jataka_core::config::EmbeddingConfig;
use jataka_core::errors::JatakaResult;
use jataka_core::rule::Rule;
use jataka_core::traits::IEmbeddingProvider;
use tracing::{debug, info};

use crate::cache::EmbeddingCache;
use crate::chain::DegradationChain;
use crate::providers;

/// The main embedding engine.
///
/// Wraps provider selection, caching, and fallback into a single
/// coherent interface.
pub struct EmbeddingEngine {
    chain: DegradationChain,
    cache: EmbeddingCache,
    config: EmbeddingConfig,
}

impl EmbeddingEngine {
    /// Create a new engine from configuration.
    ///
    /// Sets up the provider fallback chain and cache. The hashed
    /// fallback is always the last link, so the engine can never run
    /// out of providers.
    pub fn new(config: EmbeddingConfig) -> Self {
        let mut chain = DegradationChain::new();

        let primary = providers::create_provider(&config);
        chain.push(primary);
        chain.push(Box::new(providers::HashedFallback::new(
            config.dimensions,
            config.model_version.clone(),
        )));

        let cache = EmbeddingCache::new(config.cache_size);

        info!(
            provider = chain.active_provider_name(),
            dims = config.dimensions,
            model_version = %config.model_version,
            "EmbeddingEngine initialized"
        );

        Self {
            chain,
            cache,
            config,
        }
    }

    /// Embed a rule's interpretive text, cached by its content hash.
    pub fn embed_rule(&self, rule: &Rule) -> JatakaResult<Vec<f32>> {
        if let Some(vec) = self.cache.get(&rule.content_hash) {
            debug!(hash = %rule.content_hash, "cache hit for rule embedding");
            return Ok(vec);
        }

        let text = format!("{} {}", rule.condition, rule.effect);
        let (embedding, _provider) = self.chain.embed(&text)?;
        self.cache.insert(rule.content_hash.clone(), embedding.clone());
        Ok(embedding)
    }

    /// Embed a raw query string, cached by a hash of the text.
    pub fn embed_query(&self, query: &str) -> JatakaResult<Vec<f32>> {
        let hash = blake3::hash(query.as_bytes()).to_hex().to_string();
        if let Some(vec) = self.cache.get(&hash) {
            return Ok(vec);
        }

        let (embedding, _) = self.chain.embed(query)?;
        self.cache.insert(hash, embedding.clone());
        Ok(embedding)
    }

    /// Get the active provider name.
    pub fn active_provider(&self) -> &str {
        self.chain.active_provider_name()
    }
}

/// Implement `IEmbeddingProvider` so the engine can be injected as a
/// drop-in provider anywhere in the system.
impl IEmbeddingProvider for EmbeddingEngine {
    fn embed(&self, text: &str) -> JatakaResult<Vec<f32>> {
        self.embed_query(text)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    fn model_version(&self) -> &str {
        &self.config.model_version
    }

    fn name(&self) -> &str {
        "jataka-embedding-engine"
    }

    fn is_available(&self) -> bool {
        // The chain always ends in the hashed fallback.
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jataka_core::rule::{RuleStatus, Weight};

    fn default_engine() -> EmbeddingEngine {
        EmbeddingEngine::new(EmbeddingConfig {
            provider: "hashed".to_string(),
            dimensions: 128,
            model_version: "test-v1".to_string(),
            ..Default::default()
        })
    }

    fn make_rule(condition: &str, effect: &str) -> Rule {
        Rule {
            rule_id: "r1".to_string(),
            domain: "career".to_string(),
            condition: condition.to_string(),
            effect: effect.to_string(),
            weight: Weight::new(0.8),
            anchor: "BPHS 12.4".to_string(),
            commentary: None,
            modifiers: vec![],
            applicable_scopes: vec!["natal".to_string()],
            cancelers: vec![],
            status: RuleStatus::Active,
            version: 1,
            content_hash: Rule::compute_content_hash(condition, effect),
        }
    }

    #[test]
    fn engine_creates_with_defaults() {
        let engine = default_engine();
        assert_eq!(engine.dimensions(), 128);
        assert_eq!(engine.model_version(), "test-v1");
    }

    #[test]
    fn embed_query_returns_correct_dims() {
        let engine = default_engine();
        let vec = engine.embed_query("what about my career").unwrap();
        assert_eq!(vec.len(), 128);
    }

    #[test]
    fn embed_query_caches() {
        let engine = default_engine();
        let a = engine.embed_query("cached query").unwrap();
        let b = engine.embed_query("cached query").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn embed_rule_uses_content_hash() {
        let engine = default_engine();
        let rule = make_rule("Sun in 10th house", "authority in profession");
        let a = engine.embed_rule(&rule).unwrap();
        let b = engine.embed_rule(&rule).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 128);
    }

    #[test]
    fn trait_impl_works() {
        let engine = default_engine();
        let provider: &dyn IEmbeddingProvider = &engine;
        assert!(provider.is_available());
        assert_eq!(provider.dimensions(), 128);
        let vec = provider.embed("hello").unwrap();
        assert_eq!(vec.len(), 128);
    }
}
