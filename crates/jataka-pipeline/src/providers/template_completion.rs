//! Deterministic template completion provider.
//!
//! Last link of the completion chain: renders a grounded reading
//! directly from the RULE lines of the synthesis prompt, citing rule ids
//! the same way a model is instructed to. Used in tests and air-gapped
//! deployments, and as the degradation target when the HTTP provider is
//! down.

use std::sync::LazyLock;

use jataka_core::errors::JatakaResult;
use jataka_core::traits::{Completion, ICompletionProvider};
use regex::Regex;

/// `RULE [id] domain=career weight=0.80 :: condition => effect (anchor)`
static RULE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^RULE \[([^\]]+)\] domain=(\S+) [^:]*:: .*? => (.*?) \(").expect("rule line regex")
});

static DOMAINS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^DOMAINS: (.+)$").expect("domains line regex"));

pub struct TemplateCompletion;

impl TemplateCompletion {
    pub fn new() -> Self {
        Self
    }

    /// Rough token estimate: 4 characters per token.
    fn estimate_tokens(text: &str) -> usize {
        text.len().div_ceil(4)
    }
}

impl Default for TemplateCompletion {
    fn default() -> Self {
        Self::new()
    }
}

impl ICompletionProvider for TemplateCompletion {
    fn complete(&self, prompt: &str, max_tokens: usize) -> JatakaResult<Completion> {
        let rules: Vec<(String, String, String)> = RULE_LINE_RE
            .captures_iter(prompt)
            .map(|cap| (cap[1].to_string(), cap[2].to_string(), cap[3].to_string()))
            .collect();

        let domains: Vec<String> = DOMAINS_LINE_RE
            .captures(prompt)
            .map(|cap| {
                cap[1]
                    .split(',')
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let mut text = format!(
            "This reading is grounded in {} source rules across {} domain(s).\n",
            rules.len(),
            domains.len().max(1)
        );

        for domain in &domains {
            text.push_str(&format!("\nDOMAIN: {domain}\n"));
            let domain_rules: Vec<&(String, String, String)> =
                rules.iter().filter(|(_, d, _)| d == domain).collect();
            if domain_rules.is_empty() {
                text.push_str("No strong indications were retrieved for this area.\n");
                continue;
            }
            for (id, _, effect) in domain_rules.iter().take(3) {
                text.push_str(&format!("[{id}] indicates: {effect}.\n"));
            }
        }

        // Honor the caller's cap the way a real model would.
        let max_chars = max_tokens.saturating_mul(4).max(16);
        if text.len() > max_chars {
            let mut cut = max_chars;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }

        let tokens_used = Self::estimate_tokens(prompt) + Self::estimate_tokens(&text);
        Ok(Completion { text, tokens_used })
    }

    fn model(&self) -> &str {
        "template-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}
