//! Cosine similarity shared by the vector store scan and candidate ranking.
//!
//! Both vectors are scaled to unit L2 norm and the dot product of the unit
//! vectors is the score. A zero-norm (or empty) vector has no direction, so its
//! similarity to anything is `0.0`. Scores are always finite and lie in
//! `[-1.0, 1.0]`.

/// L2 norm, accumulated in f64.
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt()
}

/// Scale `v` to unit length. Returns `None` when the norm is zero or not finite.
pub fn normalize(v: &[f32]) -> Option<Vec<f64>> {
    let norm = l2_norm(v);
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    Some(v.iter().map(|x| *x as f64 / norm).collect())
}

/// A query normalized once and compared against many stored vectors.
#[derive(Debug, Clone)]
pub struct QueryVector {
    unit: Option<Vec<f64>>,
}

impl QueryVector {
    pub fn new(query: &[f32]) -> Self {
        Self {
            unit: normalize(query),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.unit.is_none()
    }

    pub fn similarity(&self, other: &[f32]) -> f64 {
        let Some(q) = &self.unit else {
            return 0.0;
        };
        if q.len() != other.len() {
            return 0.0;
        }
        match normalize(other) {
            Some(o) => finite_score(q.iter().zip(o.iter()).map(|(a, b)| a * b).sum()),
            None => 0.0,
        }
    }
}

/// Cosine similarity of `a` and `b`; `0.0` for zero-norm inputs or differing lengths.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    QueryVector::new(a).similarity(b)
}

/// Sort descending by score and keep the first `k`. The sort is stable, so
/// equal scores keep their input order.
pub fn rank_top_k<T>(mut scored: Vec<(f64, T)>, k: usize) -> Vec<(f64, T)> {
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(k);
    scored
}

fn finite_score(s: f64) -> f64 {
    if s.is_finite() {
        s.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
