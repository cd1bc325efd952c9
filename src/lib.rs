//! Parley - LLM prompting, memory and retrieval
//!
//! A CLI and library for talking to hosted chat models: plain calls,
//! prompt templates, output parsing, multi-turn conversation memory, and
//! retrieval-augmented answering over your own text files.
//!
//! # Overview
//!
//! Parley allows you to:
//! - Call OpenAI, Groq or Gemini chat models through one interface
//! - Build reusable prompts with `{name}` placeholders and history slots
//! - Parse replies as plain text or JSON
//! - Keep conversation history across turns
//! - Index a text file in memory and ask grounded questions about it
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Settings and prompt templates
//! - `document` - Documents, chunks and the text file loader
//! - `chunking` - Recursive character splitting
//! - `embedding` - Embedding generation
//! - `vector_store` - In-memory nearest-neighbour index
//! - `llm` - Chat messages and the completion client
//! - `prompt` - Template rendering
//! - `output` - Output parsers
//! - `rag` - Retrieval and grounded answering
//! - `conversation` - Conversation history and turns
//! - `orchestrator` - Component wiring
//!
//! # Example
//!
//! ```rust,no_run
//! use parley::config::Settings;
//! use parley::document::load_text_file;
//! use parley::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let document = load_text_file("knowledge_base.txt")?;
//!     let store = orchestrator.index_documents(&[document]).await?;
//!     let chain = orchestrator.rag_chain(store)?;
//!
//!     let response = chain.ask("Who created Python?").await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod document;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod openai;
pub mod orchestrator;
pub mod output;
pub mod prompt;
pub mod rag;
pub mod vector_store;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ParleyError, Result};
