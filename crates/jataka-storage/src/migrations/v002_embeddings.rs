//! v002: rule_embeddings.

use rusqlite::Connection;

use jataka_core::errors::JatakaResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> JatakaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS rule_embeddings (
            rule_id       TEXT NOT NULL,
            model_version TEXT NOT NULL,
            embedding     BLOB NOT NULL,
            dimensions    INTEGER NOT NULL,
            created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (rule_id, model_version),
            FOREIGN KEY (rule_id) REFERENCES rules(rule_id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_embeddings_model ON rule_embeddings(model_version);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
