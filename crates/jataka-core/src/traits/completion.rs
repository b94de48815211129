use crate::errors::JatakaResult;

/// Output of one generation call.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    /// Tokens the provider reports for this call (prompt + output).
    pub tokens_used: usize,
}

/// Text generation provider.
pub trait ICompletionProvider: Send + Sync {
    /// Generate a completion for `prompt`, spending at most `max_tokens`.
    fn complete(&self, prompt: &str, max_tokens: usize) -> JatakaResult<Completion>;

    /// Model identifier, recorded in orchestration metadata.
    fn model(&self) -> &str;

    /// Whether this provider is currently available.
    fn is_available(&self) -> bool;
}
