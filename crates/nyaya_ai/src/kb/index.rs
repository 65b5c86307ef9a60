use nyaya_core::error::AppError;

use crate::retrieve::similarity::inner_product;

/// Similarity index over unit-normalized vectors. The flat scan below is the
/// right tier at statute-corpus sizes; an approximate index slots in behind
/// this trait without touching callers.
pub trait VectorIndex {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn dimension(&self) -> usize;

    /// Up to `k` (record_index, score) pairs, score descending, ties broken
    /// by ascending record index.
    fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)>;
}

/// Exact inner-product nearest-neighbor search over the full vector set.
/// With unit-normalized vectors the inner product equals cosine similarity.
#[derive(Debug, Clone)]
pub struct FlatIpIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIpIndex {
    pub fn from_vectors(dimension: usize, vectors: Vec<Vec<f32>>) -> Result<Self, AppError> {
        for (i, v) in vectors.iter().enumerate() {
            if v.len() != dimension {
                return Err(AppError::new(
                    "KB_INVALID",
                    "Vector dimension mismatch in index",
                )
                .with_details(format!("record={i}; expected={dimension}; got={}", v.len())));
            }
        }
        Ok(Self { dimension, vectors })
    }

    pub fn vectors(&self) -> &[Vec<f32>] {
        &self.vectors
    }

    pub fn into_vectors(self) -> Vec<Vec<f32>> {
        self.vectors
    }
}

impl VectorIndex for FlatIpIndex {
    fn len(&self) -> usize {
        self.vectors.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn search(&self, query: &[f32], k: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, inner_product(query, v)))
            .collect();

        // Stable order: score desc, record index asc on ties.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);
        scored
    }
}
