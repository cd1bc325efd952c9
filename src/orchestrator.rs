//! Component wiring for Parley.
//!
//! Builds the chat model, embedder, chunker and chains from settings, and
//! coordinates indexing documents into a searchable knowledge base.

use crate::chunking::RecursiveCharacterSplitter;
use crate::config::{Prompts, Settings};
use crate::conversation::ConversationChain;
use crate::document::Document;
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{ParleyError, Result};
use crate::llm::{ChatModel, Completion, GenerationParams, OpenAIChatModel};
use crate::openai::create_client_with_timeout;
use crate::prompt::{ChatPromptTemplate, PromptValues};
use crate::rag::{build_index, RagChain, Retriever};
use crate::vector_store::{MemoryVectorStore, VectorStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

/// The main orchestrator for the Parley pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    model: Arc<dyn ChatModel>,
    embedder: Option<Arc<dyn Embedder>>,
}

impl Orchestrator {
    /// Create an orchestrator backed by the configured provider.
    ///
    /// The embedder is created on first use, so chat-only commands work with
    /// providers that serve no embeddings.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let client = create_client_with_timeout(
            settings.llm.provider,
            settings.llm.api_base.as_deref(),
            Duration::from_secs(settings.llm.timeout_secs),
        )?;
        let model_name = settings.llm.model_name();
        info!("Using {} model {}", settings.llm.provider, model_name);

        let model: Arc<dyn ChatModel> = Arc::new(OpenAIChatModel::with_client(client, &model_name));

        Ok(Self {
            settings,
            prompts,
            model,
            embedder: None,
        })
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        model: Arc<dyn ChatModel>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            settings,
            prompts,
            model,
            embedder: Some(embedder),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    pub fn model(&self) -> Arc<dyn ChatModel> {
        self.model.clone()
    }

    /// Validated generation parameters from settings.
    pub fn generation_params(&self) -> Result<GenerationParams> {
        self.settings.llm.generation_params()
    }

    /// Render a template and generate a completion for it.
    pub async fn invoke(
        &self,
        template: &ChatPromptTemplate,
        values: &PromptValues,
    ) -> Result<Completion> {
        let messages = template.render(values)?;
        self.model.generate(&messages, &self.generation_params()?).await
    }

    /// Get the embedder, creating it from settings if none was supplied.
    pub fn embedder(&self) -> Result<Arc<dyn Embedder>> {
        if let Some(embedder) = &self.embedder {
            return Ok(embedder.clone());
        }

        let embedding = &self.settings.embedding;
        let model = embedding
            .model
            .clone()
            .or_else(|| embedding.provider.default_embedding_model().map(String::from))
            .ok_or_else(|| {
                ParleyError::Config(format!(
                    "Provider {} does not serve embeddings; set [embedding] provider to openai or gemini",
                    embedding.provider
                ))
            })?;

        let client = create_client_with_timeout(
            embedding.provider,
            embedding.api_base.as_deref(),
            Duration::from_secs(self.settings.llm.timeout_secs),
        )?;
        info!("Using {} embedding model {}", embedding.provider, model);

        Ok(Arc::new(OpenAIEmbedder::with_client(client, &model, embedding.dimensions)))
    }

    /// Chunker configured from settings.
    pub fn chunker(&self) -> Result<RecursiveCharacterSplitter> {
        RecursiveCharacterSplitter::new(self.settings.chunking.to_config())
    }

    /// Chunk, embed and index documents.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub async fn index_documents(&self, documents: &[Document]) -> Result<Arc<MemoryVectorStore>> {
        let chunker = self.chunker()?;
        let embedder = self.embedder()?;
        let store = build_index(
            documents,
            &chunker,
            embedder.as_ref(),
            self.settings.retrieval.metric,
        )
        .await?;
        info!("Indexed {} chunks", store.len());
        Ok(Arc::new(store))
    }

    /// RAG chain over an index, using configured prompts, style and `k`.
    pub fn rag_chain(&self, store: Arc<dyn VectorStore>) -> Result<RagChain> {
        let retriever = Retriever::new(store, self.embedder()?, self.settings.retrieval.k)?;
        Ok(
            RagChain::new(retriever, self.model.clone(), self.generation_params()?)
                .with_prompts(&self.prompts.rag, self.settings.retrieval.style)
                .with_values(self.prompts.values()),
        )
    }

    /// Conversation chain with the remembering-assistant prompt.
    pub fn conversation_chain(&self) -> Result<ConversationChain> {
        Ok(ConversationChain::new(
            self.model.clone(),
            self.prompts.chat.memory_template(),
            self.generation_params()?,
        )
        .with_values(self.prompts.values()))
    }
}
