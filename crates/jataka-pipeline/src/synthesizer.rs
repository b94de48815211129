//! Synthesizer: one generation request, grounded in the retrieved rules.
//!
//! The prompt embeds every retrieved rule as a citable `RULE [id]` line;
//! the completion is parsed back into an overall interpretation plus one
//! short analysis per domain. Citations are validated post-hoc by the
//! Verifier — the Synthesizer only constrains what the model can cite.

use jataka_core::errors::JatakaResult;
use jataka_core::models::DomainAnalysis;
use jataka_core::traits::ICompletionProvider;
use tracing::debug;

use crate::engine::DomainRules;
use crate::verifier::extract_citations;

/// Output of the synthesis stage.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    pub interpretation: String,
    pub analyses: Vec<DomainAnalysis>,
    pub tokens_used: usize,
}

/// Build the single generation request for a run.
pub fn build_prompt(groups: &[DomainRules], query: Option<&str>) -> String {
    let mut prompt = String::from(
        "You are an interpreter of birth charts. Ground every statement in the \
         rules below and cite rule ids in square brackets, like [BPHS-10-1]. \
         Never cite a rule that is not listed.\n\n",
    );

    if let Some(query) = query {
        prompt.push_str(&format!("QUESTION: {query}\n\n"));
    }

    let domains: Vec<&str> = groups.iter().map(|g| g.domain.as_str()).collect();
    prompt.push_str(&format!("DOMAINS: {}\n\n", domains.join(", ")));

    for group in groups {
        for ranked in &group.result.rules {
            let rule = &ranked.rule;
            prompt.push_str(&format!(
                "RULE [{}] domain={} weight={:.2} :: {} => {} ({})\n",
                rule.rule_id,
                rule.domain,
                rule.weight.value(),
                rule.condition,
                rule.effect,
                rule.anchor,
            ));
        }
    }

    prompt.push_str(
        "\nWrite an overall interpretation, then one section per domain headed \
         'DOMAIN: <name>'.\n",
    );
    prompt
}

/// Run the synthesis stage: one completion call, then section parsing.
pub fn synthesize(
    provider: &dyn ICompletionProvider,
    groups: &[DomainRules],
    query: Option<&str>,
    max_tokens: usize,
) -> JatakaResult<SynthesisOutput> {
    let prompt = build_prompt(groups, query);
    let completion = provider.complete(&prompt, max_tokens)?;

    let analyses = parse_domain_sections(&completion.text, groups);
    debug!(
        analyses = analyses.len(),
        tokens = completion.tokens_used,
        "synthesis complete"
    );

    Ok(SynthesisOutput {
        interpretation: completion.text,
        analyses,
        tokens_used: completion.tokens_used,
    })
}

/// Parse `DOMAIN: <name>` sections out of the completion. A domain the
/// model skipped gets a deterministic analysis from its top rules, so
/// every selected domain is always covered.
fn parse_domain_sections(text: &str, groups: &[DomainRules]) -> Vec<DomainAnalysis> {
    groups
        .iter()
        .map(|group| {
            let section = extract_section(text, &group.domain);
            match section {
                Some(analysis) if !analysis.trim().is_empty() => {
                    let rule_ids = extract_citations(&analysis);
                    DomainAnalysis {
                        domain: group.domain.clone(),
                        analysis: analysis.trim().to_string(),
                        rule_ids,
                    }
                }
                _ => fallback_analysis(group),
            }
        })
        .collect()
}

/// Text between `DOMAIN: <name>` and the next `DOMAIN:` header (or EOF).
fn extract_section(text: &str, domain: &str) -> Option<String> {
    let header = format!("DOMAIN: {domain}");
    let start = text.find(&header)? + header.len();
    let rest = &text[start..];
    let end = rest.find("\nDOMAIN: ").unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

/// Deterministic analysis from the domain's strongest rules.
fn fallback_analysis(group: &DomainRules) -> DomainAnalysis {
    let top: Vec<&jataka_core::models::RankedRule> = group.result.rules.iter().take(3).collect();
    let analysis = if top.is_empty() {
        "No strong indications were retrieved for this area.".to_string()
    } else {
        top.iter()
            .map(|r| format!("[{}] indicates: {}.", r.rule.rule_id, r.rule.effect))
            .collect::<Vec<_>>()
            .join(" ")
    };
    DomainAnalysis {
        domain: group.domain.clone(),
        analysis,
        rule_ids: top.iter().map(|r| r.rule.rule_id.clone()).collect(),
    }
}
