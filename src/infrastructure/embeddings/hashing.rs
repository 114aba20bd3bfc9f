//! Offline feature-hashing embedder.
//!
//! Every lowercase alphanumeric token is hashed (FNV-1a) into one of `dim`
//! buckets with a hash-derived sign, and the resulting vector is scaled to unit
//! length. Texts that share vocabulary land close together, which is enough to
//! drive ingestion and matching without a hosted model.

use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};

pub struct HashingProvider {
    dim: usize,
}

impl HashingProvider {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0_f32; self.dim];
        if self.dim == 0 {
            return v;
        }
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = fnv1a_64(token.to_lowercase().as_bytes());
            let bucket = (hash % self.dim as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign;
        }
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut v {
                *x /= norm;
            }
        }
        v
    }
}

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashingProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::similarity::cosine_similarity;

    #[test]
    fn test_deterministic_and_unit_length() {
        let p = HashingProvider::new(64);
        let a = p.embed_one("Rust backend engineer");
        let b = p.embed_one("rust BACKEND engineer");
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_shared_vocabulary_scores_higher() {
        let p = HashingProvider::new(256);
        let job = p.embed_one("python backend engineer aws");
        let close = p.embed_one("experienced python engineer with aws");
        let far = p.embed_one("pastry chef croissant bakery");
        assert!(cosine_similarity(&job, &close) > cosine_similarity(&job, &far));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let p = HashingProvider::new(8);
        assert!(p.embed_one("  ,, ").iter().all(|x| *x == 0.0));
    }
}
