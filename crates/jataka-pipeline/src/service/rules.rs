//! Rule retrieval service: the read-mostly rule API operations.

use jataka_core::config::RetrievalConfig;
use jataka_core::constants::MAX_RETRIEVAL_LIMIT;
use jataka_core::errors::{JatakaError, JatakaResult, RetrievalError};
use jataka_core::models::{ChartFeatures, QueryContext, RetrievalMethod, RuleStats};
use jataka_core::rule::Rule;
use jataka_core::traits::{IEmbeddingProvider, IRetriever, IRuleStorage};
use jataka_retrieval::RetrievalEngine;
use serde::{Deserialize, Serialize};

/// Body of a retrieval request.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrieveRequest {
    #[serde(default)]
    pub chart: ChartFeatures,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_min_weight")]
    pub min_weight: f64,
}

fn default_limit() -> usize {
    jataka_core::constants::DEFAULT_RETRIEVAL_LIMIT
}

fn default_min_weight() -> f64 {
    jataka_core::constants::DEFAULT_MIN_WEIGHT
}

/// One rule in a retrieval response, scores flattened alongside.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievedRule {
    #[serde(flatten)]
    pub rule: Rule,
    pub relevance_score: f64,
    pub symbolic_match: bool,
    pub semantic_score: Option<f64>,
}

/// Response for a retrieval request.
#[derive(Debug, Clone, Serialize)]
pub struct RetrieveResponse {
    pub rules: Vec<RetrievedRule>,
    pub retrieval_method: RetrievalMethod,
    pub total_matches: usize,
    pub query_time_ms: u64,
    pub symbolic_keys_used: Vec<String>,
}

/// Read-mostly rule operations.
pub struct RuleService<'a> {
    storage: &'a dyn IRuleStorage,
    embeddings: Option<&'a dyn IEmbeddingProvider>,
    config: RetrievalConfig,
    coverage_target: usize,
}

impl<'a> RuleService<'a> {
    pub fn new(
        storage: &'a dyn IRuleStorage,
        embeddings: Option<&'a dyn IEmbeddingProvider>,
        config: RetrievalConfig,
        coverage_target: usize,
    ) -> Self {
        Self {
            storage,
            embeddings,
            config,
            coverage_target,
        }
    }

    /// `POST /rules/retrieve` semantics.
    pub fn retrieve(&self, request: &RetrieveRequest) -> JatakaResult<RetrieveResponse> {
        if request.limit == 0 || request.limit > MAX_RETRIEVAL_LIMIT {
            return Err(RetrievalError::InvalidLimit {
                limit: request.limit,
                max: MAX_RETRIEVAL_LIMIT,
            }
            .into());
        }
        if !(0.0..=1.0).contains(&request.min_weight) {
            return Err(RetrievalError::InvalidMinWeight {
                value: request.min_weight,
            }
            .into());
        }

        let mut context = QueryContext::from_chart(&request.chart);
        if let Some(query) = &request.query {
            context = context.with_query(query.clone());
        }
        if let Some(domain) = &request.domain {
            context = context.with_domain(domain.clone());
        }

        let engine = RetrievalEngine::new(self.storage, self.embeddings, self.config.clone());
        let result = engine.retrieve(&context, request.limit, request.min_weight)?;

        Ok(RetrieveResponse {
            rules: result
                .rules
                .into_iter()
                .map(|r| RetrievedRule {
                    rule: r.rule,
                    relevance_score: r.relevance_score,
                    symbolic_match: r.symbolic_match,
                    semantic_score: r.semantic_score,
                })
                .collect(),
            retrieval_method: result.method,
            total_matches: result.total_matches,
            query_time_ms: result.query_time_ms,
            symbolic_keys_used: result.keys_used,
        })
    }

    /// `GET /rules/{rule_id}` semantics: absent and retired rules are
    /// both a not-found.
    pub fn get_rule(&self, rule_id: &str) -> JatakaResult<Rule> {
        match self.storage.get_rule(rule_id)? {
            Some(rule) if rule.is_active() => Ok(rule),
            _ => Err(JatakaError::RuleNotFound {
                rule_id: rule_id.to_string(),
            }),
        }
    }

    /// `GET /rules/stats` semantics.
    pub fn stats(&self) -> JatakaResult<RuleStats> {
        let stats = RuleStats {
            total_rules: self.storage.count_rules()?,
            rules_with_embeddings: self.storage.count_rules_with_embeddings()?,
            symbolic_key_count: self.storage.count_symbolic_keys()?,
            by_domain: self.storage.count_rules_by_domain()?,
            coverage_pct: 0.0,
        };
        Ok(stats.with_coverage_target(self.coverage_target))
    }

    /// `GET /rules/domain/{domain}` semantics.
    pub fn rules_by_domain(&self, domain: &str, min_weight: f64) -> JatakaResult<Vec<Rule>> {
        if !(0.0..=1.0).contains(&min_weight) {
            return Err(RetrievalError::InvalidMinWeight { value: min_weight }.into());
        }
        self.storage.rules_by_domain(domain, min_weight)
    }
}
