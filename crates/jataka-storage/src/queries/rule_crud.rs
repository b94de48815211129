//! Insert, get, status transition, and domain queries for rules.

use rusqlite::{params, Connection, OptionalExtension, Row};

use jataka_core::errors::JatakaResult;
use jataka_core::rule::{Rule, RuleStatus, Weight};

use crate::to_storage_err;

fn status_str(status: RuleStatus) -> &'static str {
    match status {
        RuleStatus::Active => "active",
        RuleStatus::Retired => "retired",
    }
}

fn parse_status(s: &str) -> RuleStatus {
    match s {
        "retired" => RuleStatus::Retired,
        _ => RuleStatus::Active,
    }
}

/// Insert a single rule.
pub fn insert_rule(conn: &Connection, rule: &Rule) -> JatakaResult<()> {
    let modifiers_json =
        serde_json::to_string(&rule.modifiers).map_err(|e| to_storage_err(e.to_string()))?;
    let scopes_json = serde_json::to_string(&rule.applicable_scopes)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let cancelers_json =
        serde_json::to_string(&rule.cancelers).map_err(|e| to_storage_err(e.to_string()))?;

    conn.execute(
        "INSERT INTO rules (
            rule_id, domain, condition, effect, weight, anchor, commentary,
            modifiers, applicable_scopes, cancelers, status, version, content_hash
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            rule.rule_id,
            rule.domain,
            rule.condition,
            rule.effect,
            rule.weight.value(),
            rule.anchor,
            rule.commentary,
            modifiers_json,
            scopes_json,
            cancelers_json,
            status_str(rule.status),
            rule.version,
            rule.content_hash,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    Ok(())
}

/// Get a single rule by external id.
pub fn get_rule(conn: &Connection, rule_id: &str) -> JatakaResult<Option<Rule>> {
    let mut stmt = conn
        .prepare(
            "SELECT rule_id, domain, condition, effect, weight, anchor, commentary,
                    modifiers, applicable_scopes, cancelers, status, version, content_hash
             FROM rules WHERE rule_id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![rule_id], |row| Ok(row_to_rule(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(rule) => Ok(Some(rule?)),
        None => Ok(None),
    }
}

/// Fetch many rules by id. Missing ids are skipped silently.
pub fn bulk_get(conn: &Connection, rule_ids: &[String]) -> JatakaResult<Vec<Rule>> {
    let mut rules = Vec::with_capacity(rule_ids.len());
    for rule_id in rule_ids {
        if let Some(rule) = get_rule(conn, rule_id)? {
            rules.push(rule);
        }
    }
    Ok(rules)
}

/// Transition a rule's status. The only in-place mutation rules allow.
pub fn set_status(conn: &Connection, rule_id: &str, status: RuleStatus) -> JatakaResult<()> {
    conn.execute(
        "UPDATE rules SET status = ?2, version = version + 1 WHERE rule_id = ?1",
        params![rule_id, status_str(status)],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Active rules for one domain at or above `min_weight`, weight descending.
pub fn rules_by_domain(conn: &Connection, domain: &str, min_weight: f64) -> JatakaResult<Vec<Rule>> {
    let mut stmt = conn
        .prepare(
            "SELECT rule_id, domain, condition, effect, weight, anchor, commentary,
                    modifiers, applicable_scopes, cancelers, status, version, content_hash
             FROM rules
             WHERE domain = ?1 AND status = 'active' AND weight >= ?2
             ORDER BY weight DESC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![domain, min_weight], |row| Ok(row_to_rule(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rules = Vec::new();
    for row in rows {
        rules.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(rules)
}

/// Map a rules row into a `Rule`, parsing the JSON list columns.
fn row_to_rule(row: &Row<'_>) -> JatakaResult<Rule> {
    let weight: f64 = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let modifiers_json: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let scopes_json: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;
    let cancelers_json: String = row.get(9).map_err(|e| to_storage_err(e.to_string()))?;
    let status: String = row.get(10).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(Rule {
        rule_id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        domain: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        condition: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        effect: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        weight: Weight::new(weight),
        anchor: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        commentary: row.get(6).map_err(|e| to_storage_err(e.to_string()))?,
        modifiers: serde_json::from_str(&modifiers_json)
            .map_err(|e| to_storage_err(e.to_string()))?,
        applicable_scopes: serde_json::from_str(&scopes_json)
            .map_err(|e| to_storage_err(e.to_string()))?,
        cancelers: serde_json::from_str(&cancelers_json)
            .map_err(|e| to_storage_err(e.to_string()))?,
        status: parse_status(&status),
        version: row.get(11).map_err(|e| to_storage_err(e.to_string()))?,
        content_hash: row.get(12).map_err(|e| to_storage_err(e.to_string()))?,
    })
}
