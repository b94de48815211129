//! Embedding providers.

mod hashed_fallback;
mod http_provider;

pub use hashed_fallback::HashedFallback;
pub use http_provider::HttpEmbeddingProvider;

use jataka_core::config::EmbeddingConfig;
use jataka_core::traits::IEmbeddingProvider;

/// Construct the primary provider selected by config.
pub fn create_provider(config: &EmbeddingConfig) -> Box<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "hashed" => Box::new(HashedFallback::new(
            config.dimensions,
            config.model_version.clone(),
        )),
        _ => Box::new(HttpEmbeddingProvider::new(
            config.endpoint.clone(),
            config.model_name.clone(),
            config.model_version.clone(),
            config.dimensions,
        )),
    }
}
