//! v001: rules, rule_symbolic_keys.

use rusqlite::Connection;

use jataka_core::errors::JatakaResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> JatakaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS rules (
            rule_id           TEXT PRIMARY KEY,
            domain            TEXT NOT NULL,
            condition         TEXT NOT NULL,
            effect            TEXT NOT NULL,
            weight            REAL NOT NULL,
            anchor            TEXT NOT NULL,
            commentary        TEXT,
            modifiers         TEXT NOT NULL DEFAULT '[]',
            applicable_scopes TEXT NOT NULL DEFAULT '[]',
            cancelers         TEXT NOT NULL DEFAULT '[]',
            status            TEXT NOT NULL DEFAULT 'active',
            version           INTEGER NOT NULL DEFAULT 1,
            content_hash      TEXT NOT NULL,
            created_at        TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_rules_domain ON rules(domain, status, weight);

        CREATE TABLE IF NOT EXISTS rule_symbolic_keys (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            rule_id     TEXT NOT NULL,
            key_type    TEXT NOT NULL,
            key_value   TEXT NOT NULL,
            UNIQUE (rule_id, key_type, key_value),
            FOREIGN KEY (rule_id) REFERENCES rules(rule_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_symbolic_keys_value ON rule_symbolic_keys(key_value);
        CREATE INDEX IF NOT EXISTS idx_symbolic_keys_rule ON rule_symbolic_keys(rule_id);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
