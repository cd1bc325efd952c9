//! In-memory exact vector index.

use super::{DistanceMetric, SearchResult, VectorStore};
use crate::document::Chunk;
use crate::error::{ParleyError, Result};
use tracing::debug;

/// Flat in-memory vector index.
///
/// Every query scans all entries. Entries keep their insertion order, which
/// breaks distance ties so repeated queries return identical results.
#[derive(Debug, Clone)]
pub struct MemoryVectorStore {
    entries: Vec<(Chunk, Vec<f32>)>,
    dimensions: Option<usize>,
    metric: DistanceMetric,
}

impl MemoryVectorStore {
    /// Build an L2 index from `(chunk, embedding)` pairs.
    pub fn from_entries(entries: Vec<(Chunk, Vec<f32>)>) -> Result<Self> {
        Self::with_metric(entries, DistanceMetric::L2)
    }

    /// Build an index using the given distance metric.
    pub fn with_metric(entries: Vec<(Chunk, Vec<f32>)>, metric: DistanceMetric) -> Result<Self> {
        let dimensions = entries.first().map(|(_, v)| v.len());

        if let Some(expected) = dimensions {
            if let Some((_, bad)) = entries.iter().find(|(_, v)| v.len() != expected) {
                return Err(ParleyError::DimensionMismatch {
                    expected,
                    actual: bad.len(),
                });
            }
        }

        debug!("Built vector index with {} entries", entries.len());

        Ok(Self {
            entries,
            dimensions,
            metric,
        })
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Indexed chunks in insertion order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|(chunk, _)| chunk)
    }
}

impl VectorStore for MemoryVectorStore {
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if let Some(expected) = self.dimensions {
            if query.len() != expected {
                return Err(ParleyError::DimensionMismatch {
                    expected,
                    actual: query.len(),
                });
            }
        }

        let mut results: Vec<SearchResult> = self
            .entries
            .iter()
            .map(|(chunk, vector)| SearchResult {
                chunk: chunk.clone(),
                distance: self.metric.distance(query, vector),
            })
            .collect();

        // Stable sort keeps insertion order for equal distances.
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results.truncate(k);

        Ok(results)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}
