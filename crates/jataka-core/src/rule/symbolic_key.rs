use serde::{Deserialize, Serialize};
use std::fmt;

/// The family a symbolic key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    /// Planet placed in a house: `Sun_10`.
    PlanetHouse,
    /// House lord placed in another house: `10_lord_in_4`.
    HouseLord,
    /// Planet placed in a sign: `Mars_Aries`.
    PlanetSign,
    /// Named yoga: `gaja_kesari`.
    Yoga,
    /// The rule's domain, always emitted.
    Domain,
    /// An applicable scope, always emitted.
    Scope,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            KeyType::PlanetHouse => "planet_house",
            KeyType::HouseLord => "house_lord",
            KeyType::PlanetSign => "planet_sign",
            KeyType::Yoga => "yoga",
            KeyType::Domain => "domain",
            KeyType::Scope => "scope",
        };
        f.write_str(s)
    }
}

/// A structured exact-match key derived from a rule's text.
///
/// Many keys map to one rule; the same `key_value` may map to many rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolicKey {
    pub rule_id: String,
    pub key_type: KeyType,
    pub key_value: String,
}

impl SymbolicKey {
    pub fn new(rule_id: impl Into<String>, key_type: KeyType, key_value: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            key_type,
            key_value: key_value.into(),
        }
    }
}

/// Canonical key-value formats. Both the ingestor's pattern extraction and
/// the chart-side context builder must produce identical strings, so the
/// formatting lives here and nowhere else.
pub mod keyfmt {
    /// `Sun_10`
    pub fn planet_house(planet: &str, house: u8) -> String {
        format!("{}_{}", title_case(planet), house)
    }

    /// `10_lord_in_4`
    pub fn house_lord(lord_of: u8, placed_in: u8) -> String {
        format!("{lord_of}_lord_in_{placed_in}")
    }

    /// `Mars_Aries`
    pub fn planet_sign(planet: &str, sign: &str) -> String {
        format!("{}_{}", title_case(planet), title_case(sign))
    }

    /// `gaja_kesari`
    pub fn yoga(name: &str) -> String {
        name.split_whitespace()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// `sun` → `Sun`, `ARIES` → `Aries`.
    pub fn title_case(word: &str) -> String {
        let lower = word.to_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::keyfmt;

    #[test]
    fn key_values_are_canonical() {
        assert_eq!(keyfmt::planet_house("sun", 10), "Sun_10");
        assert_eq!(keyfmt::house_lord(10, 4), "10_lord_in_4");
        assert_eq!(keyfmt::planet_sign("MARS", "aries"), "Mars_Aries");
        assert_eq!(keyfmt::yoga("Gaja Kesari"), "gaja_kesari");
    }
}
