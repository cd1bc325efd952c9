//! Text chunking for breaking documents into retrievable windows.
//!
//! Lengths are measured in characters (Unicode scalar values), never bytes.

mod recursive;

pub use recursive::RecursiveCharacterSplitter;

use crate::document::{Chunk, Document};
use crate::error::{ParleyError, Result};

/// Default separators, tried from most to least specific.
/// The empty string means "split anywhere".
pub const DEFAULT_SEPARATORS: &[&str] = &["\n\n", "\n", ". ", " ", ""];

/// Configuration for chunking.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Maximum characters shared by consecutive chunks.
    pub chunk_overlap: usize,
    /// Separators, most specific first.
    pub separators: Vec<String>,
}

impl ChunkingConfig {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            ..Self::default()
        }
    }

    /// Replace the separator list.
    pub fn with_separators<S: Into<String>>(mut self, separators: impl IntoIterator<Item = S>) -> Self {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    /// Check the size/overlap relationship.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ParleyError::InvalidConfig(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(ParleyError::InvalidConfig(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        if self.separators.is_empty() {
            return Err(ParleyError::InvalidConfig(
                "at least one separator is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 300,
            chunk_overlap: 50,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Trait for text chunking implementations.
pub trait Chunker: Send + Sync {
    /// Split raw text into chunk texts, in document order.
    fn split_text(&self, text: &str) -> Vec<String>;

    /// Split documents into chunks that inherit each parent's metadata.
    fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|doc| {
                self.split_text(&doc.text)
                    .into_iter()
                    .enumerate()
                    .map(move |(index, text)| {
                        let mut metadata = doc.metadata.clone();
                        metadata.insert("chunk_index".to_string(), index.to_string());
                        Chunk::new(text, metadata)
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_overlap_not_below_size() {
        assert!(ChunkingConfig::new(100, 100).validate().is_err());
        assert!(ChunkingConfig::new(100, 150).validate().is_err());
        assert!(ChunkingConfig::new(0, 0).validate().is_err());
        assert!(ChunkingConfig::new(100, 99).validate().is_ok());
    }

    #[test]
    fn test_validate_requires_separators() {
        let config = ChunkingConfig::new(10, 2).with_separators(Vec::<String>::new());
        assert!(matches!(config.validate(), Err(ParleyError::InvalidConfig(_))));
    }
}
