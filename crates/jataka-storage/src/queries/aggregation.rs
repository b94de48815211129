//! Aggregate counts for the rule store stats endpoint.

use std::collections::BTreeMap;

use rusqlite::Connection;

use jataka_core::errors::JatakaResult;

use crate::to_storage_err;

pub fn count_rules(conn: &Connection) -> JatakaResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM rules WHERE status = 'active'", [], |row| {
            row.get(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

pub fn count_rules_with_embeddings(conn: &Connection) -> JatakaResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(DISTINCT re.rule_id)
             FROM rule_embeddings re
             JOIN rules r ON r.rule_id = re.rule_id
             WHERE r.status = 'active'",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

pub fn count_symbolic_keys(conn: &Connection) -> JatakaResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM rule_symbolic_keys", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count as usize)
}

pub fn count_rules_by_domain(conn: &Connection) -> JatakaResult<BTreeMap<String, usize>> {
    let mut stmt = conn
        .prepare(
            "SELECT domain, COUNT(*) FROM rules WHERE status = 'active'
             GROUP BY domain ORDER BY domain",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let domain: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((domain, count as usize))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut by_domain = BTreeMap::new();
    for row in rows {
        let (domain, count) = row.map_err(|e| to_storage_err(e.to_string()))?;
        by_domain.insert(domain, count);
    }
    Ok(by_domain)
}
