//! Ordered provider fallback chain. The first available provider wins;
//! a provider failure moves on to the next link instead of aborting.

use jataka_core::errors::{EmbeddingError, JatakaResult};
use jataka_core::traits::IEmbeddingProvider;
use tracing::warn;

/// A chain of embedding providers tried in order.
pub struct DegradationChain {
    providers: Vec<Box<dyn IEmbeddingProvider>>,
}

impl DegradationChain {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn IEmbeddingProvider>) {
        self.providers.push(provider);
    }

    /// Embed with the first provider that succeeds. Returns the vector
    /// and the name of the provider that produced it.
    pub fn embed(&self, text: &str) -> JatakaResult<(Vec<f32>, &str)> {
        for provider in &self.providers {
            if !provider.is_available() {
                continue;
            }
            match provider.embed(text) {
                Ok(vec) => return Ok((vec, provider.name())),
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "provider failed, degrading");
                }
            }
        }
        Err(EmbeddingError::ChainExhausted.into())
    }

    /// Name of the first available provider.
    pub fn active_provider_name(&self) -> &str {
        self.providers
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for DegradationChain {
    fn default() -> Self {
        Self::new()
    }
}
