//! # jataka-storage
//!
//! SQLite persistence layer: rules, symbolic keys, embeddings, and
//! reading sessions. Single write connection + read pool, WAL pragmas,
//! versioned migrations.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use jataka_core::errors::{JatakaError, StorageError};

/// Map an SQLite error message into the storage error type.
pub(crate) fn to_storage_err(message: String) -> JatakaError {
    StorageError::SqliteError { message }.into()
}
