//! Deterministic stand-ins for the hosted services, used by unit tests.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::llm::{ChatModel, Completion, GenerationParams, Message, ResponseMetadata};
use async_trait::async_trait;
use std::sync::Mutex;

/// Embeds text as keyword counts, one dimension per keyword.
pub struct KeywordEmbedder;

impl KeywordEmbedder {
    pub const KEYWORDS: [&'static str; 6] = ["rust", "faiss", "paris", "langchain", "rag", "vector"];

    pub fn vector(text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();
        Self::KEYWORDS
            .iter()
            .map(|k| lower.matches(k).count() as f32)
            .collect()
    }
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn dimensions(&self) -> Option<usize> {
        Some(Self::KEYWORDS.len())
    }
}

/// Chat model whose reply is computed from the rendered messages.
/// Every request is recorded for inspection.
pub struct FnModel<F> {
    reply: F,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl<F> FnModel<F>
where
    F: Fn(&[Message]) -> Result<String> + Send + Sync,
{
    pub fn new(reply: F) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<F> ChatModel for FnModel<F>
where
    F: Fn(&[Message]) -> Result<String> + Send + Sync,
{
    async fn generate(&self, messages: &[Message], params: &GenerationParams) -> Result<Completion> {
        params.validate()?;
        self.calls.lock().unwrap().push(messages.to_vec());
        let text = (self.reply)(messages)?;
        Ok(Completion {
            text,
            metadata: ResponseMetadata {
                model: "stub".to_string(),
                finish_reason: Some("stop".to_string()),
                ..ResponseMetadata::default()
            },
        })
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}
