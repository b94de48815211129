use crate::errors::JatakaResult;
use crate::models::ReadingSession;

/// Persistence for cached reading sessions.
///
/// The pipeline writes, API handlers read. Uniqueness on the canonical
/// hash is the only coordination the cache needs.
pub trait ISessionStore: Send + Sync {
    /// Insert unless a row with the same canonical hash already exists.
    ///
    /// Returns `(row, inserted)`: losing the insert race is a normal
    /// return, not an error — the caller gets the winner's row and
    /// `inserted == false`.
    fn insert_session_if_absent(
        &self,
        session: &ReadingSession,
    ) -> JatakaResult<(ReadingSession, bool)>;

    /// Most recent session for a canonical hash, regardless of age.
    fn latest_session_for_hash(&self, canonical_hash: &str) -> JatakaResult<Option<ReadingSession>>;

    /// Bump access_count and last_accessed_at. Best-effort side effect —
    /// callers must not fail a read when this errors.
    fn touch_session(&self, session_id: &str) -> JatakaResult<()>;

    /// Attach user feedback to an existing session.
    fn record_feedback(
        &self,
        session_id: &str,
        rating: Option<u8>,
        text: Option<&str>,
    ) -> JatakaResult<()>;
}
