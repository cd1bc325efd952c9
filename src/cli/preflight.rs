//! Pre-flight checks before hosted-model operations.
//!
//! Validates that API keys and settings are usable before starting work
//! that would otherwise fail midway, e.g. after indexing a large file.

use crate::config::Settings;
use crate::error::{ParleyError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Text generation requires the chat provider's API key.
    Generate,
    /// Retrieval additionally requires an embedding provider.
    Retrieve,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    settings.llm.generation_params()?;
    settings.llm.provider.api_key()?;

    if let Operation::Retrieve = operation {
        let embedding = &settings.embedding;
        if embedding.model.is_none() && embedding.provider.default_embedding_model().is_none() {
            return Err(ParleyError::Config(format!(
                "{} does not serve embeddings. Set [embedding] provider = \"openai\" or \"gemini\" in {}",
                embedding.provider,
                Settings::default_config_path().display()
            )));
        }
        embedding.provider.api_key()?;
        settings.chunking.to_config().validate()?;
        if settings.retrieval.k == 0 {
            return Err(ParleyError::InvalidConfig(
                "retrieval.k must be at least 1".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::Provider;

    fn settings_with_key() -> Settings {
        // Point both sections at a provider whose key the test controls.
        std::env::set_var("GROQ_API_KEY", "gsk-test");
        let mut settings = Settings::default();
        settings.llm.provider = Provider::Groq;
        settings.embedding.provider = Provider::Groq;
        settings
    }

    #[test]
    fn test_generate_checks_temperature() {
        let mut settings = settings_with_key();
        assert!(check(Operation::Generate, &settings).is_ok());

        settings.llm.temperature = Some(1.5);
        assert!(matches!(
            check(Operation::Generate, &settings),
            Err(ParleyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_retrieve_needs_embedding_provider() {
        let settings = settings_with_key();
        assert!(matches!(
            check(Operation::Retrieve, &settings),
            Err(ParleyError::Config(_))
        ));
    }

    #[test]
    fn test_retrieve_checks_chunking() {
        let mut settings = settings_with_key();
        settings.embedding.model = Some("custom-embedder".to_string());
        assert!(check(Operation::Retrieve, &settings).is_ok());

        settings.chunking.chunk_overlap = settings.chunking.chunk_size;
        assert!(matches!(
            check(Operation::Retrieve, &settings),
            Err(ParleyError::InvalidConfig(_))
        ));
    }
}
