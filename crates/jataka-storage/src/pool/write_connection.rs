//! The single serialized write connection.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use jataka_core::errors::JatakaResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// Exclusive write connection. All writes serialize through this mutex;
/// WAL keeps readers unblocked while a write is in flight.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open the write connection for the given database path.
    pub fn open(path: &Path) -> JatakaResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory write connection (for testing).
    pub fn open_in_memory() -> JatakaResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a closure with the write connection.
    pub fn with_conn_sync<F, T>(&self, f: F) -> JatakaResult<T>
    where
        F: FnOnce(&Connection) -> JatakaResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|e| to_storage_err(format!("write connection lock poisoned: {e}")))?;
        f(&guard)
    }
}
