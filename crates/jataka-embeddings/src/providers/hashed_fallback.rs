//! Hashed TF fallback provider.
//!
//! Generates fixed-dimension vectors by hashing terms into buckets and
//! weighting by term frequency. No external dependencies — works in
//! air-gapped environments and tests.

use std::collections::HashMap;

use jataka_core::errors::JatakaResult;
use jataka_core::traits::IEmbeddingProvider;

/// Deterministic fallback embedding provider.
///
/// Not as semantically rich as a neural model, but always available, and
/// similar texts still share buckets.
pub struct HashedFallback {
    dimensions: usize,
    model_version: String,
}

impl HashedFallback {
    pub fn new(dimensions: usize, model_version: String) -> Self {
        Self {
            dimensions,
            model_version,
        }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    /// Tokenize text into lowercase alphanumeric terms.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| s.len() >= 2)
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn term_vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return vec![0.0; self.dimensions];
        }

        let mut tf: HashMap<String, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.clone()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        let mut vec = vec![0.0f32; self.dimensions];

        for (term, count) in &tf {
            let freq = count / total;
            // Longer terms carry more signal than likely stopwords.
            let idf = 1.0 + (term.len() as f32).ln();
            let bucket = Self::hash_term(term, self.dimensions);
            vec[bucket] += freq * idf;
        }

        // L2 normalize.
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }

        vec
    }
}

impl IEmbeddingProvider for HashedFallback {
    fn embed(&self, text: &str) -> JatakaResult<Vec<f32>> {
        Ok(self.term_vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_version(&self) -> &str {
        &self.model_version
    }

    fn name(&self) -> &str {
        "hashed-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> HashedFallback {
        HashedFallback::new(128, "test-v1".to_string())
    }

    #[test]
    fn vectors_are_deterministic() {
        let p = provider();
        let a = p.embed("Sun in the 10th house").unwrap();
        let b = p.embed("Sun in the 10th house").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn vectors_are_normalized() {
        let p = provider();
        let v = p.embed("career and profession").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_text_yields_zero_vector() {
        let p = provider();
        let v = p.embed("").unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
        assert_eq!(v.len(), 128);
    }

    #[test]
    fn overlapping_texts_are_closer_than_disjoint() {
        let p = provider();
        let career_a = p.embed("career profession authority rank").unwrap();
        let career_b = p.embed("career profession success").unwrap();
        let health = p.embed("illness disease vitality recovery").unwrap();

        let dot = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() };
        assert!(dot(&career_a, &career_b) > dot(&career_a, &health));
    }
}
