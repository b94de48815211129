//! Pattern-based symbolic key extraction.
//!
//! Best-effort by design: the patterns recognize the phrase families that
//! cover curated rule text (planet-in-house, house-lord-in-house,
//! planet-in-sign, named yogas). Text outside these families simply
//! yields no structural key — the rule is still reachable via its domain
//! key and semantic search.

use std::sync::LazyLock;

use regex::Regex;

use jataka_core::rule::symbolic_key::keyfmt;
use jataka_core::rule::{KeyType, Rule, SymbolicKey};

const PLANETS: &str = "sun|moon|mars|mercury|jupiter|venus|saturn|rahu|ketu";
const SIGNS: &str =
    "aries|taurus|gemini|cancer|leo|virgo|libra|scorpio|sagittarius|capricorn|aquarius|pisces";

/// `Sun in the 10th house`, `Jupiter placed in 4th house`.
static PLANET_HOUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({PLANETS})\s+(?:is\s+)?(?:placed\s+|posited\s+|situated\s+)?in\s+(?:the\s+)?(\d{{1,2}})(?:st|nd|rd|th)?\s+house"
    ))
    .expect("planet-house regex")
});

/// `10th lord in the 4th house`, `lord of the 10th in the 4th`.
static HOUSE_LORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(?:house\s+)?lord\s+(?:is\s+)?(?:placed\s+|posited\s+)?in\s+(?:the\s+)?(\d{1,2})(?:st|nd|rd|th)?",
    )
    .expect("house-lord regex")
});

/// `lord of the 10th house in the 4th house`.
static LORD_OF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\blord\s+of\s+(?:the\s+)?(\d{1,2})(?:st|nd|rd|th)?\s+(?:house\s+)?(?:is\s+)?(?:placed\s+)?in\s+(?:the\s+)?(\d{1,2})(?:st|nd|rd|th)?",
    )
    .expect("lord-of regex")
});

/// `Mars in Aries`, `Venus posited in Taurus`.
static PLANET_SIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({PLANETS})\s+(?:is\s+)?(?:placed\s+|posited\s+|situated\s+|exalted\s+)?in\s+({SIGNS})\b"
    ))
    .expect("planet-sign regex")
});

/// Curated named-yoga mentions. An open `\w+ yoga` pattern would flag
/// phrases like "this yoga", so the list is explicit.
static YOGA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(gaja\s+kesari|raja|dhana|budha\s+aditya|chandra\s+mangala|neecha\s+bhanga|viparita\s+raja|pancha\s+mahapurusha|kemadruma|saraswati|amala|vesi)\s+yoga",
    )
    .expect("yoga regex")
});

fn parse_house(raw: &str) -> Option<u8> {
    raw.parse::<u8>().ok().filter(|h| (1..=12).contains(h))
}

/// Extract all symbolic keys for a rule from its condition and effect
/// text. Always emits a domain key and one scope key per applicable
/// scope, so every rule has at least one exact-match path.
pub fn extract_keys(rule: &Rule) -> Vec<SymbolicKey> {
    let text = format!("{} {}", rule.condition, rule.effect);
    let mut keys = Vec::new();

    for cap in PLANET_HOUSE_RE.captures_iter(&text) {
        if let Some(house) = parse_house(&cap[2]) {
            keys.push(SymbolicKey::new(
                &rule.rule_id,
                KeyType::PlanetHouse,
                keyfmt::planet_house(&cap[1], house),
            ));
        }
    }

    for re in [&*HOUSE_LORD_RE, &*LORD_OF_RE] {
        for cap in re.captures_iter(&text) {
            if let (Some(lord_of), Some(placed_in)) =
                (parse_house(&cap[1]), parse_house(&cap[2]))
            {
                keys.push(SymbolicKey::new(
                    &rule.rule_id,
                    KeyType::HouseLord,
                    keyfmt::house_lord(lord_of, placed_in),
                ));
            }
        }
    }

    for cap in PLANET_SIGN_RE.captures_iter(&text) {
        keys.push(SymbolicKey::new(
            &rule.rule_id,
            KeyType::PlanetSign,
            keyfmt::planet_sign(&cap[1], &cap[2]),
        ));
    }

    for cap in YOGA_RE.captures_iter(&text) {
        keys.push(SymbolicKey::new(
            &rule.rule_id,
            KeyType::Yoga,
            keyfmt::yoga(&cap[1]),
        ));
    }

    keys.push(SymbolicKey::new(
        &rule.rule_id,
        KeyType::Domain,
        rule.domain.to_lowercase(),
    ));
    for scope in &rule.applicable_scopes {
        keys.push(SymbolicKey::new(
            &rule.rule_id,
            KeyType::Scope,
            scope.to_lowercase(),
        ));
    }

    keys.sort_by(|a, b| (a.key_type as u8, &a.key_value).cmp(&(b.key_type as u8, &b.key_value)));
    keys.dedup();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use jataka_core::rule::{RuleStatus, Weight};

    fn rule_with_text(condition: &str, effect: &str) -> Rule {
        Rule {
            rule_id: "t1".to_string(),
            domain: "career".to_string(),
            condition: condition.to_string(),
            effect: effect.to_string(),
            weight: Weight::new(0.7),
            anchor: "test".to_string(),
            commentary: None,
            modifiers: vec![],
            applicable_scopes: vec!["natal".to_string()],
            cancelers: vec![],
            status: RuleStatus::Active,
            version: 1,
            content_hash: Rule::compute_content_hash(condition, effect),
        }
    }

    fn values_of(keys: &[SymbolicKey], key_type: KeyType) -> Vec<String> {
        keys.iter()
            .filter(|k| k.key_type == key_type)
            .map(|k| k.key_value.clone())
            .collect()
    }

    // Table-driven coverage for the planet-house family.
    #[test]
    fn planet_house_patterns() {
        let cases = [
            ("Sun in 10th house", "Sun_10"),
            ("the Sun is placed in the 10th house", "Sun_10"),
            ("Jupiter posited in 4th house", "Jupiter_4"),
            ("MOON situated in the 1st house", "Moon_1"),
            ("Rahu in the 12th house", "Rahu_12"),
        ];
        for (text, expected) in cases {
            let keys = extract_keys(&rule_with_text(text, "some effect"));
            let values = values_of(&keys, KeyType::PlanetHouse);
            assert_eq!(values, vec![expected.to_string()], "text: {text}");
        }
    }

    #[test]
    fn planet_house_rejects_out_of_range() {
        let keys = extract_keys(&rule_with_text("Sun in 13th house", "effect"));
        assert!(values_of(&keys, KeyType::PlanetHouse).is_empty());
    }

    // Table-driven coverage for the house-lord family.
    #[test]
    fn house_lord_patterns() {
        let cases = [
            ("10th lord in 4th house", "10_lord_in_4"),
            ("the 10th house lord placed in the 4th", "10_lord_in_4"),
            ("lord of the 7th house in the 1st house", "7_lord_in_1"),
            ("2nd lord is in 11th", "2_lord_in_11"),
        ];
        for (text, expected) in cases {
            let keys = extract_keys(&rule_with_text(text, "some effect"));
            let values = values_of(&keys, KeyType::HouseLord);
            assert_eq!(values, vec![expected.to_string()], "text: {text}");
        }
    }

    // Table-driven coverage for the planet-sign family.
    #[test]
    fn planet_sign_patterns() {
        let cases = [
            ("Mars in Aries", "Mars_Aries"),
            ("Venus exalted in Pisces", "Venus_Pisces"),
            ("saturn placed in capricorn", "Saturn_Capricorn"),
        ];
        for (text, expected) in cases {
            let keys = extract_keys(&rule_with_text(text, "some effect"));
            let values = values_of(&keys, KeyType::PlanetSign);
            assert_eq!(values, vec![expected.to_string()], "text: {text}");
        }
    }

    // Table-driven coverage for the yoga family.
    #[test]
    fn yoga_patterns() {
        let cases = [
            ("Gaja Kesari yoga is formed", "gaja_kesari"),
            ("a powerful Raja Yoga arises", "raja"),
            ("Neecha Bhanga yoga cancels the debilitation", "neecha_bhanga"),
        ];
        for (text, expected) in cases {
            let keys = extract_keys(&rule_with_text(text, "some effect"));
            let values = values_of(&keys, KeyType::Yoga);
            assert_eq!(values, vec![expected.to_string()], "text: {text}");
        }
    }

    #[test]
    fn unnamed_yoga_mention_is_ignored() {
        let keys = extract_keys(&rule_with_text("this yoga gives results", "effect"));
        assert!(values_of(&keys, KeyType::Yoga).is_empty());
    }

    #[test]
    fn domain_and_scope_keys_always_emitted() {
        let keys = extract_keys(&rule_with_text("unstructured text", "more text"));
        assert_eq!(values_of(&keys, KeyType::Domain), vec!["career".to_string()]);
        assert_eq!(values_of(&keys, KeyType::Scope), vec!["natal".to_string()]);
    }

    #[test]
    fn keys_from_both_condition_and_effect() {
        let keys = extract_keys(&rule_with_text(
            "Sun in 10th house",
            "with Moon in the 4th house, fortunes alternate",
        ));
        let values = values_of(&keys, KeyType::PlanetHouse);
        assert!(values.contains(&"Sun_10".to_string()));
        assert!(values.contains(&"Moon_4".to_string()));
    }

    #[test]
    fn duplicate_phrases_dedup() {
        let keys = extract_keys(&rule_with_text(
            "Sun in 10th house",
            "because the Sun in the 10th house shines",
        ));
        assert_eq!(values_of(&keys, KeyType::PlanetHouse), vec!["Sun_10".to_string()]);
    }
}
