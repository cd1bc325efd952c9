//! Vector index abstraction.
//!
//! An index is built once from `(chunk, embedding)` pairs and then only
//! queried; there is no update, deletion, or persistence.

mod memory;

pub use memory::MemoryVectorStore;

use crate::document::Chunk;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A search result with its distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The matched chunk.
    pub chunk: Chunk,
    /// Distance to the query vector (lower is closer).
    pub distance: f32,
}

/// Distance metric used for nearest-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance.
    #[default]
    L2,
    /// One minus cosine similarity.
    Cosine,
}

impl DistanceMetric {
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::L2 => l2_distance(a, b),
            DistanceMetric::Cosine => 1.0 - cosine_similarity(a, b),
        }
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l2" | "euclidean" => Ok(DistanceMetric::L2),
            "cosine" => Ok(DistanceMetric::Cosine),
            _ => Err(format!("Unknown distance metric: {}", s)),
        }
    }
}

/// Trait for vector index implementations.
pub trait VectorStore: Send + Sync {
    /// Return up to `k` chunks ordered by ascending distance to `query`.
    ///
    /// Asking for more results than are indexed returns everything.
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>>;

    /// Number of indexed chunks.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of the indexed vectors, if any are indexed.
    fn dimensions(&self) -> Option<usize>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Compute Euclidean distance between two vectors of equal length.
pub fn l2_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}
