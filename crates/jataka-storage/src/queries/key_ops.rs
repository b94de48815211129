//! Symbolic key storage and exact-match lookup.

use rusqlite::{params, Connection};

use jataka_core::errors::JatakaResult;
use jataka_core::rule::{KeyType, SymbolicKey};

use crate::to_storage_err;

fn parse_key_type(s: &str) -> KeyType {
    match s {
        "planet_house" => KeyType::PlanetHouse,
        "house_lord" => KeyType::HouseLord,
        "planet_sign" => KeyType::PlanetSign,
        "yoga" => KeyType::Yoga,
        "scope" => KeyType::Scope,
        _ => KeyType::Domain,
    }
}

/// Insert symbolic keys, ignoring duplicates.
pub fn insert_keys(conn: &Connection, keys: &[SymbolicKey]) -> JatakaResult<()> {
    let mut stmt = conn
        .prepare(
            "INSERT OR IGNORE INTO rule_symbolic_keys (rule_id, key_type, key_value)
             VALUES (?1, ?2, ?3)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for key in keys {
        stmt.execute(params![
            key.rule_id,
            key.key_type.to_string(),
            key.key_value
        ])
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}

/// All symbolic keys derived for one rule.
pub fn keys_for_rule(conn: &Connection, rule_id: &str) -> JatakaResult<Vec<SymbolicKey>> {
    let mut stmt = conn
        .prepare(
            "SELECT rule_id, key_type, key_value FROM rule_symbolic_keys
             WHERE rule_id = ?1 ORDER BY key_type, key_value",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![rule_id], |row| {
            let rule_id: String = row.get(0)?;
            let key_type: String = row.get(1)?;
            let key_value: String = row.get(2)?;
            Ok(SymbolicKey::new(rule_id, parse_key_type(&key_type), key_value))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut keys = Vec::new();
    for row in rows {
        keys.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(keys)
}

/// Distinct rule ids whose key set intersects `key_values`.
pub fn rule_ids_for_keys(conn: &Connection, key_values: &[String]) -> JatakaResult<Vec<String>> {
    if key_values.is_empty() {
        return Ok(Vec::new());
    }

    // Build a parameterized IN clause; key counts are small (chart-derived).
    let placeholders = (1..=key_values.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT DISTINCT rule_id FROM rule_symbolic_keys WHERE key_value IN ({placeholders})"
    );

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(rusqlite::params_from_iter(key_values.iter()), |row| {
            row.get::<_, String>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut ids = Vec::new();
    for row in rows {
        ids.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(ids)
}
