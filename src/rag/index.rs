//! Building a vector index from documents.

use crate::chunking::Chunker;
use crate::document::Document;
use crate::embedding::Embedder;
use crate::error::{ParleyError, Result};
use crate::vector_store::{DistanceMetric, MemoryVectorStore};
use tracing::{info, instrument};

/// Chunk the documents, embed every chunk in one batch, and index the pairs.
#[instrument(skip_all, fields(documents = documents.len()))]
pub async fn build_index(
    documents: &[Document],
    chunker: &dyn Chunker,
    embedder: &dyn Embedder,
    metric: DistanceMetric,
) -> Result<MemoryVectorStore> {
    let chunks = chunker.split_documents(documents);
    info!("Split {} documents into {} chunks", documents.len(), chunks.len());

    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;

    if embeddings.len() != chunks.len() {
        return Err(ParleyError::EmbeddingService(format!(
            "Expected {} embeddings, got {}",
            chunks.len(),
            embeddings.len()
        )));
    }

    MemoryVectorStore::with_metric(chunks.into_iter().zip(embeddings).collect(), metric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::{ChunkingConfig, RecursiveCharacterSplitter};
    use crate::test_support::KeywordEmbedder;
    use crate::vector_store::VectorStore;

    #[tokio::test]
    async fn test_build_index_embeds_every_chunk() {
        let docs = vec![
            Document::new("Rust is a systems language.\n\nFAISS searches vectors."),
            Document::new("Paris is in France."),
        ];
        let splitter = RecursiveCharacterSplitter::new(ChunkingConfig::new(30, 5)).unwrap();

        let store = build_index(&docs, &splitter, &KeywordEmbedder, DistanceMetric::L2)
            .await
            .unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.dimensions(), Some(KeywordEmbedder::KEYWORDS.len()));
        let texts: Vec<_> = store.chunks().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["Rust is a systems language.", "FAISS searches vectors.", "Paris is in France."]
        );
    }
}
