use serde::{Deserialize, Serialize};

use crate::rule::symbolic_key::keyfmt;

/// A planet's placement as reported by the chart producer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetPosition {
    pub planet: String,
    pub house: u8,
    pub sign: String,
}

/// A house lord's placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseLordPlacement {
    pub lord_of: u8,
    pub placed_in: u8,
}

/// Chart-derived structural features, produced by the external chart
/// collaborator. Input to the query-context builder, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartFeatures {
    #[serde(default)]
    pub positions: Vec<PlanetPosition>,
    #[serde(default)]
    pub house_lords: Vec<HouseLordPlacement>,
    #[serde(default)]
    pub yogas: Vec<String>,
}

/// Ephemeral per-request query context: symbolic keys plus an optional
/// free-text query and domain filter.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    pub keys: Vec<String>,
    pub query: Option<String>,
    pub domain: Option<String>,
}

impl QueryContext {
    /// Build a context from chart features, using the same canonical key
    /// formats the ingestor derives from rule text.
    pub fn from_chart(features: &ChartFeatures) -> Self {
        let mut keys = Vec::new();
        for pos in &features.positions {
            keys.push(keyfmt::planet_house(&pos.planet, pos.house));
            keys.push(keyfmt::planet_sign(&pos.planet, &pos.sign));
        }
        for lord in &features.house_lords {
            keys.push(keyfmt::house_lord(lord.lord_of, lord.placed_in));
        }
        for yoga in &features.yogas {
            keys.push(keyfmt::yoga(yoga));
        }
        keys.sort();
        keys.dedup();
        Self {
            keys,
            query: None,
            domain: None,
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Whether the context carries neither keys nor a query — the
    /// domain-fallback case.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.query.is_none()
    }
}
