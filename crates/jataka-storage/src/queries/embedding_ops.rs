//! Rule embedding storage. Vectors are stored as little-endian f32 BLOBs.

use rusqlite::{params, Connection};

use jataka_core::errors::JatakaResult;
use jataka_core::rule::RuleEmbedding;

use crate::to_storage_err;

/// Encode an f32 vector as a little-endian byte blob.
pub fn f32_vec_to_bytes(vec: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vec.len() * 4);
    for v in vec {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Decode a little-endian byte blob back into an f32 vector.
pub fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Upsert the embedding for (rule, model_version).
pub fn store_embedding(conn: &Connection, embedding: &RuleEmbedding) -> JatakaResult<()> {
    let blob = f32_vec_to_bytes(&embedding.vector);
    conn.execute(
        "INSERT INTO rule_embeddings (rule_id, model_version, embedding, dimensions)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT (rule_id, model_version)
         DO UPDATE SET embedding = excluded.embedding, dimensions = excluded.dimensions",
        params![
            embedding.rule_id,
            embedding.model_version,
            blob,
            embedding.dimensions() as i64,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Whether a rule already has an embedding for this model version.
pub fn has_embedding(conn: &Connection, rule_id: &str, model_version: &str) -> JatakaResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM rule_embeddings WHERE rule_id = ?1 AND model_version = ?2",
            params![rule_id, model_version],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count > 0)
}

/// All embeddings for one model version, restricted to active rules.
pub fn embeddings_for_model(
    conn: &Connection,
    model_version: &str,
) -> JatakaResult<Vec<RuleEmbedding>> {
    let mut stmt = conn
        .prepare(
            "SELECT re.rule_id, re.embedding
             FROM rule_embeddings re
             JOIN rules r ON r.rule_id = re.rule_id
             WHERE re.model_version = ?1 AND r.status = 'active'",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![model_version], |row| {
            let rule_id: String = row.get(0)?;
            let blob: Vec<u8> = row.get(1)?;
            Ok((rule_id, blob))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut embeddings = Vec::new();
    for row in rows {
        let (rule_id, blob) = row.map_err(|e| to_storage_err(e.to_string()))?;
        embeddings.push(RuleEmbedding::new(
            rule_id,
            bytes_to_f32_vec(&blob),
            model_version,
        ));
    }
    Ok(embeddings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_roundtrip() {
        let vec = vec![0.5f32, -1.25, 3.75, 0.0];
        let bytes = f32_vec_to_bytes(&vec);
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes_to_f32_vec(&bytes), vec);
    }
}
