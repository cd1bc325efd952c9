//! Retrieval and context formatting.

use crate::document::Chunk;
use crate::embedding::Embedder;
use crate::error::{ParleyError, Result};
use crate::vector_store::{SearchResult, VectorStore};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Wraps a vector index with a query embedder and a fixed `k`.
#[derive(Clone)]
pub struct Retriever {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    k: usize,
}

impl Retriever {
    /// Create a retriever returning the `k` nearest chunks.
    pub fn new(store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(ParleyError::InvalidConfig("k must be positive".to_string()));
        }
        Ok(Self { store, embedder, k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Embed the query and return the nearest chunks, closest first.
    #[instrument(skip(self), fields(k = self.k))]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.store.search(&query_embedding, self.k)?;
        debug!("Retrieved {} of {} chunks", results.len(), self.store.len());
        Ok(results)
    }
}

/// Join chunk texts into a single context block.
pub fn format_docs<'a>(chunks: impl IntoIterator<Item = &'a Chunk>, separator: &str) -> String {
    chunks
        .into_iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}
