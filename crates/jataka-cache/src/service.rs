//! Cache service: freshness reads and idempotent writes over the
//! session store.

use chrono::Utc;
use jataka_core::errors::JatakaResult;
use jataka_core::models::ReadingSession;
use jataka_core::traits::ISessionStore;
use tracing::{debug, warn};

/// Read/write facade over the persisted reading sessions.
pub struct CacheService<'a> {
    sessions: &'a dyn ISessionStore,
}

impl<'a> CacheService<'a> {
    pub fn new(sessions: &'a dyn ISessionStore) -> Self {
        Self { sessions }
    }

    /// Return the cached session for `digest` only if it is younger than
    /// `max_age_secs`. A stale row is a miss, not an error.
    ///
    /// A successful read bumps the access counters best-effort: a failed
    /// touch is logged and never fails the read.
    pub fn get_fresh(
        &self,
        digest: &str,
        max_age_secs: i64,
    ) -> JatakaResult<Option<ReadingSession>> {
        let Some(session) = self.sessions.latest_session_for_hash(digest)? else {
            return Ok(None);
        };

        if !session.is_fresh(Utc::now(), max_age_secs) {
            debug!(digest, age_secs = session.age_secs(Utc::now()), "cache entry stale");
            return Ok(None);
        }

        if let Err(e) = self.sessions.touch_session(&session.id) {
            warn!(session_id = %session.id, error = %e, "access counter update failed");
        }

        debug!(digest, "cache hit");
        Ok(Some(session))
    }

    /// Persist a freshly computed session, or return the row a
    /// concurrent writer already persisted for the same digest.
    ///
    /// Returns `(session, stored)`; `stored == false` means this caller
    /// lost the insert race and got the winner's row — a normal outcome,
    /// not an error.
    pub fn store_or_get(&self, session: &ReadingSession) -> JatakaResult<(ReadingSession, bool)> {
        let (row, inserted) = self.sessions.insert_session_if_absent(session)?;
        if !inserted {
            debug!(
                digest = %session.canonical_hash,
                winner = %row.id,
                "lost insert race, returning persisted winner"
            );
        }
        Ok((row, inserted))
    }
}
