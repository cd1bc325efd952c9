//! Documents and chunks flowing through the retrieval pipeline.

mod loader;

pub use loader::load_text_file;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata attached to documents and inherited by their chunks.
pub type Metadata = BTreeMap<String, String>;

/// A source text, either an inline literal or a loaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Full text content.
    pub text: String,
    /// Free-form metadata (e.g. `source`).
    pub metadata: Metadata,
}

impl Document {
    /// Create a document with no metadata.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Number of characters in the document.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A window of a document's text produced by a chunker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of this chunk.
    pub text: String,
    /// Metadata inherited from the parent document, plus `chunk_index`.
    pub metadata: Metadata,
}

impl Chunk {
    pub fn new(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Number of characters in the chunk.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Short single-line preview for display.
    pub fn preview(&self, max_chars: usize) -> String {
        let flat = self.text.replace('\n', " ");
        if flat.chars().count() <= max_chars {
            flat
        } else {
            let head: String = flat.chars().take(max_chars).collect();
            format!("{}...", head)
        }
    }
}
