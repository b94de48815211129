//! Completion providers and their fallback chain.

mod http_completion;
mod template_completion;

pub use http_completion::HttpCompletionProvider;
pub use template_completion::TemplateCompletion;

use jataka_core::config::PipelineConfig;
use jataka_core::errors::{JatakaResult, PipelineError};
use jataka_core::traits::{Completion, ICompletionProvider};
use tracing::warn;

/// Ordered completion fallback chain. The template provider is always
/// the last link, so synthesis can degrade but never die with a
/// provider-less pipeline.
pub struct CompletionChain {
    providers: Vec<Box<dyn ICompletionProvider>>,
}

impl CompletionChain {
    /// Build the default chain from config: HTTP primary, template last.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            providers: vec![
                Box::new(HttpCompletionProvider::new(
                    config.completion_endpoint.clone(),
                    config.completion_model.clone(),
                )),
                Box::new(TemplateCompletion::new()),
            ],
        }
    }

    /// A chain with only the deterministic template provider (tests,
    /// air-gapped deployments).
    pub fn template_only() -> Self {
        Self {
            providers: vec![Box::new(TemplateCompletion::new())],
        }
    }
}

impl ICompletionProvider for CompletionChain {
    fn complete(&self, prompt: &str, max_tokens: usize) -> JatakaResult<Completion> {
        for provider in &self.providers {
            if !provider.is_available() {
                continue;
            }
            match provider.complete(prompt, max_tokens) {
                Ok(completion) => return Ok(completion),
                Err(e) => {
                    warn!(model = provider.model(), error = %e, "completion provider failed, degrading");
                }
            }
        }
        Err(PipelineError::ProviderFailure {
            reason: "all completion providers failed".to_string(),
        }
        .into())
    }

    fn model(&self) -> &str {
        self.providers
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.model())
            .unwrap_or("none")
    }

    fn is_available(&self) -> bool {
        self.providers.iter().any(|p| p.is_available())
    }
}
