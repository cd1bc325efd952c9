//! RAG response generation.

use super::context::{format_docs, Retriever};
use super::RULE_SEPARATOR;
use crate::config::{RagPrompts, RagStyle};
use crate::error::Result;
use crate::llm::{ChatModel, GenerationParams};
use crate::output::{OutputParser, StrOutputParser};
use crate::prompt::{ChatPromptTemplate, PromptValues};
use crate::vector_store::SearchResult;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Retrieve, assemble the prompt, generate, and return plain text.
pub struct RagChain {
    retriever: Retriever,
    model: Arc<dyn ChatModel>,
    template: ChatPromptTemplate,
    params: GenerationParams,
    separator: String,
    fallback: String,
    base_values: PromptValues,
}

impl RagChain {
    /// Create a chain with the default system-context prompt.
    pub fn new(retriever: Retriever, model: Arc<dyn ChatModel>, params: GenerationParams) -> Self {
        let prompts = RagPrompts::default();
        Self {
            retriever,
            model,
            template: prompts.template(RagStyle::SystemContext),
            params,
            separator: RULE_SEPARATOR.to_string(),
            fallback: prompts.fallback,
            base_values: PromptValues::new(),
        }
    }

    /// Use prompts and style from configuration.
    pub fn with_prompts(mut self, prompts: &RagPrompts, style: RagStyle) -> Self {
        self.template = prompts.template(style);
        self.fallback = prompts.fallback.clone();
        self
    }

    /// Use a custom template. It may reference `{context}`, `{question}` and `{fallback}`.
    pub fn with_template(mut self, template: ChatPromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Phrase the model is told to use when the context lacks the answer.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Separator placed between retrieved chunks in the context block.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Extra values available to the template (e.g. custom config variables).
    pub fn with_values(mut self, values: PromptValues) -> Self {
        self.base_values = values;
        self
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Answer a question from the indexed context.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn ask(&self, question: &str) -> Result<RagResponse> {
        info!("Processing question: {}", question);

        let sources = self.retriever.retrieve(question).await?;
        let context = format_docs(sources.iter().map(|s| &s.chunk), &self.separator);

        let values = self
            .base_values
            .clone()
            .text("context", context)
            .text("question", question)
            .text("fallback", &self.fallback);
        let messages = self.template.render(&values)?;

        let completion = self.model.generate(&messages, &self.params).await?;
        let answer = StrOutputParser.parse(&completion.text)?;

        debug!("Generated response with {} sources", sources.len());

        Ok(RagResponse { answer, sources })
    }
}

/// A RAG answer with the chunks it was grounded on.
#[derive(Debug, Clone)]
pub struct RagResponse {
    /// The generated answer.
    pub answer: String,
    /// Retrieved chunks, closest first.
    pub sources: Vec<SearchResult>,
}

impl RagResponse {
    /// Whether the answer is the configured fallback phrase.
    pub fn is_fallback(&self, fallback: &str) -> bool {
        self.answer.contains(fallback.trim_end_matches('.'))
    }
}
