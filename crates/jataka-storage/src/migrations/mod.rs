//! Versioned schema migrations, tracked via `PRAGMA user_version`.

mod v001_rules;
mod v002_embeddings;
mod v003_sessions;

use rusqlite::Connection;

use jataka_core::errors::{JatakaError, JatakaResult, StorageError};

use crate::to_storage_err;

/// All migrations in order. Index + 1 is the schema version.
const MIGRATIONS: &[fn(&Connection) -> JatakaResult<()>] =
    &[v001_rules::migrate, v002_embeddings::migrate, v003_sessions::migrate];

/// Run any pending migrations.
pub fn run_migrations(conn: &Connection) -> JatakaResult<()> {
    let current: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (idx, migrate) in MIGRATIONS.iter().enumerate() {
        let version = (idx + 1) as u32;
        if version <= current {
            continue;
        }
        migrate(conn).map_err(|e| {
            JatakaError::from(StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })
        })?;
        conn.pragma_update(None, "user_version", version)
            .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "applied migration");
    }

    Ok(())
}

/// Current schema version of a connection.
pub fn schema_version(conn: &Connection) -> JatakaResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))
}
