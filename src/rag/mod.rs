//! RAG (Retrieval-Augmented Generation) question answering.
//!
//! Chunk, embed, index, retrieve, then prompt the model with the retrieved
//! context.

pub mod context;
mod index;
mod response;

pub use context::{format_docs, Retriever};
pub use index::build_index;
pub use response::{RagChain, RagResponse};

/// Separator between retrieved chunks for inline knowledge bases.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Separator between retrieved chunks for file-backed knowledge bases.
pub const RULE_SEPARATOR: &str = "\n\n---\n\n";
