//! Embeddings over an OpenAI-compatible API.

use super::Embedder;
use crate::error::{ParleyError, Result};
use crate::openai::{create_client, Provider};
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Maximum inputs per embeddings request.
const BATCH_SIZE: usize = 100;

/// Embedder backed by an OpenAI-compatible embeddings endpoint.
pub struct OpenAIEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
    dimensions: Option<usize>,
}

impl OpenAIEmbedder {
    /// Create an embedder for the provider's default embedding model.
    pub fn new(provider: Provider) -> Result<Self> {
        let model = provider.default_embedding_model().ok_or_else(|| {
            ParleyError::Config(format!("Provider {} does not serve embeddings", provider))
        })?;
        Ok(Self::with_client(create_client(provider, None)?, model, None))
    }

    /// Create an embedder from an existing client.
    ///
    /// When `dimensions` is set it is sent with every request, which truncates
    /// the returned vectors on models that support it.
    pub fn with_client(client: Client<OpenAIConfig>, model: &str, dimensions: Option<usize>) -> Self {
        Self {
            client,
            model: model.to_string(),
            dimensions,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ParleyError::EmbeddingService("Empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len(), model = %self.model))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let mut all_embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(BATCH_SIZE) {
            let mut args = CreateEmbeddingRequestArgs::default();
            args.model(&self.model)
                .input(EmbeddingInput::StringArray(batch.to_vec()));
            if let Some(dimensions) = self.dimensions {
                args.dimensions(dimensions as u32);
            }
            let request = args.build().map_err(|e| {
                ParleyError::EmbeddingService(format!("Failed to build request: {}", e))
            })?;

            let response = self.client.embeddings().create(request).await.map_err(|e| {
                ParleyError::EmbeddingService(format!("Embedding API error: {}", e))
            })?;

            if response.data.len() != batch.len() {
                return Err(ParleyError::EmbeddingService(format!(
                    "Expected {} embeddings, got {}",
                    batch.len(),
                    response.data.len()
                )));
            }

            // Sort by index to ensure correct order
            let mut embeddings = response.data;
            embeddings.sort_by_key(|e| e.index);
            all_embeddings.extend(embeddings.into_iter().map(|e| e.embedding));
        }

        debug!("Generated {} embeddings", all_embeddings.len());
        Ok(all_embeddings)
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_with_client() {
        let client = Client::with_config(OpenAIConfig::new().with_api_key("test"));
        let embedder = OpenAIEmbedder::with_client(client, "text-embedding-3-large", Some(256));
        assert_eq!(embedder.model(), "text-embedding-3-large");
        assert_eq!(embedder.dimensions(), Some(256));
    }

    #[test]
    fn test_groq_embedder_is_rejected() {
        assert!(matches!(
            OpenAIEmbedder::new(Provider::Groq),
            Err(ParleyError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_batch_skips_request() {
        let client = Client::with_config(OpenAIConfig::new().with_api_key("test"));
        let embedder = OpenAIEmbedder::with_client(client, "text-embedding-3-small", None);
        assert!(embedder.embed_batch(&[]).await.unwrap().is_empty());
    }
}
