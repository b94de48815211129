//! StorageEngine — owns the ConnectionPool, implements IRuleStorage +
//! ISessionStore, runs migrations on open.

use std::collections::BTreeMap;
use std::path::Path;

use jataka_core::errors::JatakaResult;
use jataka_core::models::ReadingSession;
use jataka_core::rule::{Rule, RuleEmbedding, RuleStatus, SymbolicKey};
use jataka_core::traits::{IRuleStorage, ISessionStore};

use crate::migrations;
use crate::pool::ConnectionPool;

/// The main storage engine. Owns the connection pool and provides the
/// full IRuleStorage + ISessionStore interface.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> JatakaResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> JatakaResult<Self> {
        let pool = ConnectionPool::open_in_memory(1)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> JatakaResult<()> {
        self.pool
            .writer
            .with_conn_sync(migrations::run_migrations)
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> JatakaResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> JatakaResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }
}

impl IRuleStorage for StorageEngine {
    fn create_rule(&self, rule: &Rule) -> JatakaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::rule_crud::insert_rule(conn, rule))
    }

    fn get_rule(&self, rule_id: &str) -> JatakaResult<Option<Rule>> {
        self.with_reader(|conn| crate::queries::rule_crud::get_rule(conn, rule_id))
    }

    fn get_rules_bulk(&self, rule_ids: &[String]) -> JatakaResult<Vec<Rule>> {
        self.with_reader(|conn| crate::queries::rule_crud::bulk_get(conn, rule_ids))
    }

    fn set_rule_status(&self, rule_id: &str, status: RuleStatus) -> JatakaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::rule_crud::set_status(conn, rule_id, status))
    }

    fn rules_by_domain(&self, domain: &str, min_weight: f64) -> JatakaResult<Vec<Rule>> {
        self.with_reader(|conn| {
            crate::queries::rule_crud::rules_by_domain(conn, domain, min_weight)
        })
    }

    fn store_symbolic_keys(&self, keys: &[SymbolicKey]) -> JatakaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::key_ops::insert_keys(conn, keys))
    }

    fn keys_for_rule(&self, rule_id: &str) -> JatakaResult<Vec<SymbolicKey>> {
        self.with_reader(|conn| crate::queries::key_ops::keys_for_rule(conn, rule_id))
    }

    fn rule_ids_for_keys(&self, key_values: &[String]) -> JatakaResult<Vec<String>> {
        self.with_reader(|conn| crate::queries::key_ops::rule_ids_for_keys(conn, key_values))
    }

    fn store_embedding(&self, embedding: &RuleEmbedding) -> JatakaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::embedding_ops::store_embedding(conn, embedding))
    }

    fn has_embedding(&self, rule_id: &str, model_version: &str) -> JatakaResult<bool> {
        self.with_reader(|conn| {
            crate::queries::embedding_ops::has_embedding(conn, rule_id, model_version)
        })
    }

    fn embeddings_for_model(&self, model_version: &str) -> JatakaResult<Vec<RuleEmbedding>> {
        self.with_reader(|conn| {
            crate::queries::embedding_ops::embeddings_for_model(conn, model_version)
        })
    }

    fn count_rules(&self) -> JatakaResult<usize> {
        self.with_reader(crate::queries::aggregation::count_rules)
    }

    fn count_rules_with_embeddings(&self) -> JatakaResult<usize> {
        self.with_reader(crate::queries::aggregation::count_rules_with_embeddings)
    }

    fn count_symbolic_keys(&self) -> JatakaResult<usize> {
        self.with_reader(crate::queries::aggregation::count_symbolic_keys)
    }

    fn count_rules_by_domain(&self) -> JatakaResult<BTreeMap<String, usize>> {
        self.with_reader(crate::queries::aggregation::count_rules_by_domain)
    }
}

impl ISessionStore for StorageEngine {
    fn insert_session_if_absent(
        &self,
        session: &ReadingSession,
    ) -> JatakaResult<(ReadingSession, bool)> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::session_ops::insert_if_absent(conn, session))
    }

    fn latest_session_for_hash(
        &self,
        canonical_hash: &str,
    ) -> JatakaResult<Option<ReadingSession>> {
        self.with_reader(|conn| crate::queries::session_ops::latest_for_hash(conn, canonical_hash))
    }

    fn touch_session(&self, session_id: &str) -> JatakaResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| crate::queries::session_ops::touch(conn, session_id))
    }

    fn record_feedback(
        &self,
        session_id: &str,
        rating: Option<u8>,
        text: Option<&str>,
    ) -> JatakaResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            crate::queries::session_ops::record_feedback(conn, session_id, rating, text)
        })
    }
}
