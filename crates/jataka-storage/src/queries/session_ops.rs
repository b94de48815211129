//! Reading session persistence: the cache's insert-if-absent protocol,
//! freshness reads, access counters, and feedback.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use jataka_core::errors::JatakaResult;
use jataka_core::models::ReadingSession;

use crate::to_storage_err;

/// Insert unless a row with the same canonical hash exists.
///
/// Returns `(row, inserted)`. Losing the uniqueness race is a normal
/// return: the existing row is re-read and handed back, so every caller
/// observes exactly one canonical result per digest.
pub fn insert_if_absent(
    conn: &Connection,
    session: &ReadingSession,
) -> JatakaResult<(ReadingSession, bool)> {
    let analyses_json = serde_json::to_string(&session.domain_analyses)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let predictions_json = serde_json::to_string(&session.predictions)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rules_used_json =
        serde_json::to_string(&session.rules_used).map_err(|e| to_storage_err(e.to_string()))?;
    let verification_json = serde_json::to_string(&session.verification)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let metadata_json =
        serde_json::to_string(&session.metadata).map_err(|e| to_storage_err(e.to_string()))?;

    let inserted = conn
        .execute(
            "INSERT INTO reading_sessions (
                id, canonical_hash, subject_id, interpretation, domain_analyses,
                predictions, rules_used, verification, metadata, created_at,
                access_count, last_accessed_at, feedback_rating, feedback_text
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            ON CONFLICT (canonical_hash) DO NOTHING",
            params![
                session.id,
                session.canonical_hash,
                session.subject_id,
                session.interpretation,
                analyses_json,
                predictions_json,
                rules_used_json,
                verification_json,
                metadata_json,
                session.created_at.to_rfc3339(),
                session.access_count,
                session.last_accessed_at.to_rfc3339(),
                session.feedback_rating,
                session.feedback_text,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    if inserted > 0 {
        return Ok((session.clone(), true));
    }

    // A concurrent writer won the race; hand back the persisted winner.
    match latest_for_hash(conn, &session.canonical_hash)? {
        Some(existing) => Ok((existing, false)),
        // The winner vanished between the conflict and the re-read; keep
        // the protocol total by retrying the insert once.
        None => {
            tracing::warn!(
                hash = %session.canonical_hash,
                "conflict row disappeared before re-read, retrying insert"
            );
            insert_if_absent(conn, session)
        }
    }
}

/// The session for a canonical hash, if one exists.
pub fn latest_for_hash(
    conn: &Connection,
    canonical_hash: &str,
) -> JatakaResult<Option<ReadingSession>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, canonical_hash, subject_id, interpretation, domain_analyses,
                    predictions, rules_used, verification, metadata, created_at,
                    access_count, last_accessed_at, feedback_rating, feedback_text
             FROM reading_sessions
             WHERE canonical_hash = ?1
             ORDER BY created_at DESC LIMIT 1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let result = stmt
        .query_row(params![canonical_hash], |row| Ok(row_to_session(row)))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match result {
        Some(session) => Ok(Some(session?)),
        None => Ok(None),
    }
}

/// Bump access_count and refresh last_accessed_at.
pub fn touch(conn: &Connection, session_id: &str) -> JatakaResult<()> {
    conn.execute(
        "UPDATE reading_sessions
         SET access_count = access_count + 1,
             last_accessed_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
         WHERE id = ?1",
        params![session_id],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Attach user feedback to a session.
pub fn record_feedback(
    conn: &Connection,
    session_id: &str,
    rating: Option<u8>,
    text: Option<&str>,
) -> JatakaResult<()> {
    conn.execute(
        "UPDATE reading_sessions SET feedback_rating = ?2, feedback_text = ?3 WHERE id = ?1",
        params![session_id, rating, text],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

fn parse_timestamp(raw: &str) -> JatakaResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("bad timestamp '{raw}': {e}")))
}

/// Map a reading_sessions row, parsing the JSON document columns.
fn row_to_session(row: &Row<'_>) -> JatakaResult<ReadingSession> {
    let analyses_json: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let predictions_json: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let rules_used_json: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let verification_json: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    let metadata_json: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;
    let created_at: String = row.get(9).map_err(|e| to_storage_err(e.to_string()))?;
    let last_accessed_at: String = row.get(11).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(ReadingSession {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        canonical_hash: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        subject_id: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        interpretation: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        domain_analyses: serde_json::from_str(&analyses_json)
            .map_err(|e| to_storage_err(e.to_string()))?,
        predictions: serde_json::from_str(&predictions_json)
            .map_err(|e| to_storage_err(e.to_string()))?,
        rules_used: serde_json::from_str(&rules_used_json)
            .map_err(|e| to_storage_err(e.to_string()))?,
        verification: serde_json::from_str(&verification_json)
            .map_err(|e| to_storage_err(e.to_string()))?,
        metadata: serde_json::from_str(&metadata_json)
            .map_err(|e| to_storage_err(e.to_string()))?,
        created_at: parse_timestamp(&created_at)?,
        access_count: row.get(10).map_err(|e| to_storage_err(e.to_string()))?,
        last_accessed_at: parse_timestamp(&last_accessed_at)?,
        feedback_rating: row.get(12).map_err(|e| to_storage_err(e.to_string()))?,
        feedback_text: row.get(13).map_err(|e| to_storage_err(e.to_string()))?,
    })
}
