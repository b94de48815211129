//! v003: reading_sessions. The UNIQUE constraint on canonical_hash is the
//! only coordination the cache's insert race needs.

use rusqlite::Connection;

use jataka_core::errors::JatakaResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> JatakaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS reading_sessions (
            id               TEXT PRIMARY KEY,
            canonical_hash   TEXT NOT NULL UNIQUE,
            subject_id       TEXT NOT NULL,
            interpretation   TEXT NOT NULL,
            domain_analyses  TEXT NOT NULL DEFAULT '[]',
            predictions      TEXT NOT NULL DEFAULT '[]',
            rules_used       TEXT NOT NULL DEFAULT '[]',
            verification     TEXT NOT NULL,
            metadata         TEXT NOT NULL,
            created_at       TEXT NOT NULL,
            access_count     INTEGER NOT NULL DEFAULT 0,
            last_accessed_at TEXT NOT NULL,
            feedback_rating  INTEGER,
            feedback_text    TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_subject ON reading_sessions(subject_id);
        CREATE INDEX IF NOT EXISTS idx_sessions_created ON reading_sessions(created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
