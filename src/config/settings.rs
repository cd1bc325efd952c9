//! Configuration settings for Parley.

use super::prompts::RagStyle;
use crate::chunking::{ChunkingConfig, DEFAULT_SEPARATORS};
use crate::llm::GenerationParams;
use crate::openai::{Provider, DEFAULT_TIMEOUT_SECS};
use crate::vector_store::DistanceMetric;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub llm: LlmSettings,
    pub embedding: EmbeddingSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Chat model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Provider (openai, groq, gemini).
    pub provider: Provider,
    /// Model identifier. Defaults to the provider's default chat model.
    pub model: Option<String>,
    /// Sampling temperature in [0, 1]. Unset uses the command's default.
    pub temperature: Option<f32>,
    /// Optional cap on generated tokens.
    pub max_tokens: Option<u32>,
    /// Override for the provider's API base URL.
    pub api_base: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAI,
            model: None,
            temperature: None,
            max_tokens: None,
            api_base: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LlmSettings {
    /// Configured model, or the provider's default.
    pub fn model_name(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_chat_model().to_string())
    }

    /// Use `temperature` unless one was configured or given on the command line.
    pub fn default_temperature(&mut self, temperature: f32) {
        self.temperature.get_or_insert(temperature);
    }

    /// Generation parameters, validated. Unset temperature means 0.
    pub fn generation_params(&self) -> crate::error::Result<GenerationParams> {
        let params = GenerationParams::new(self.temperature.unwrap_or_default())?;
        Ok(match self.max_tokens {
            Some(max_tokens) => params.with_max_tokens(max_tokens),
            None => params,
        })
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Provider (openai, gemini). Groq serves no embeddings.
    pub provider: Provider,
    /// Embedding model. Defaults to the provider's default embedding model.
    pub model: Option<String>,
    /// Requested embedding dimensions, for models that support truncation.
    pub dimensions: Option<usize>,
    /// Override for the provider's API base URL.
    pub api_base: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAI,
            model: None,
            dimensions: None,
            api_base: None,
        }
    }
}

/// Text chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum characters per chunk.
    pub chunk_size: usize,
    /// Characters shared between consecutive chunks.
    pub chunk_overlap: usize,
    /// Separators, most specific first. "" splits anywhere.
    pub separators: Vec<String>,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 300,
            chunk_overlap: 50,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChunkingSettings {
    pub fn to_config(&self) -> ChunkingConfig {
        ChunkingConfig::new(self.chunk_size, self.chunk_overlap)
            .with_separators(self.separators.clone())
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of chunks retrieved per question.
    pub k: usize,
    /// Distance metric for the vector index.
    pub metric: DistanceMetric,
    /// How context is placed in the prompt.
    pub style: RagStyle,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            k: 3,
            metric: DistanceMetric::L2,
            style: RagStyle::SystemContext,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {variable_name}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::ParleyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("parley")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.chunking.chunk_size, 300);
        assert_eq!(settings.chunking.chunk_overlap, 50);
        assert_eq!(settings.chunking.separators, vec!["\n\n", "\n", ". ", " ", ""]);
        assert_eq!(settings.retrieval.k, 3);
        assert_eq!(settings.llm.model_name(), "gpt-4o-mini");
        assert!(settings.chunking.to_config().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [llm]
            provider = "groq"
            temperature = 0.7

            [retrieval]
            k = 5
            metric = "cosine"
            style = "single_human"
            "#,
        )
        .unwrap();

        assert_eq!(settings.llm.provider, Provider::Groq);
        assert_eq!(settings.llm.model_name(), "llama-3.3-70b-versatile");
        assert_eq!(settings.llm.temperature, Some(0.7));
        assert_eq!(settings.retrieval.k, 5);
        assert_eq!(settings.retrieval.metric, DistanceMetric::Cosine);
        assert_eq!(settings.retrieval.style, RagStyle::SingleHuman);
        assert_eq!(settings.chunking.chunk_size, 300);
        assert_eq!(settings.embedding.provider, Provider::OpenAI);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.llm.provider = Provider::Gemini;
        settings.llm.model = Some("gemma-3-27b-it".to_string());
        settings.chunking.chunk_size = 200;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.llm.provider, Provider::Gemini);
        assert_eq!(loaded.llm.model_name(), "gemma-3-27b-it");
        assert_eq!(loaded.chunking.chunk_size, 200);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = PathBuf::from("/nonexistent/parley/config.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.retrieval.k, 3);
    }

    #[test]
    fn test_generation_params_validated() {
        let mut settings = Settings::default();
        settings.llm.temperature = Some(1.2);
        assert!(settings.llm.generation_params().is_err());
    }

    #[test]
    fn test_generation_params_carry_max_tokens() {
        let mut settings = Settings::default();
        let params = settings.llm.generation_params().unwrap();
        assert_eq!(params.temperature, 0.0);
        assert_eq!(params.max_tokens, None);

        settings.llm.max_tokens = Some(256);
        settings.llm.temperature = Some(0.3);
        let params = settings.llm.generation_params().unwrap();
        assert_eq!(params.temperature, 0.3);
        assert_eq!(params.max_tokens, Some(256));
    }

    #[test]
    fn test_default_temperature_only_fills_unset() {
        let mut llm = LlmSettings::default();
        llm.default_temperature(0.7);
        assert_eq!(llm.temperature, Some(0.7));

        let mut llm = LlmSettings {
            temperature: Some(0.2),
            ..LlmSettings::default()
        };
        llm.default_temperature(0.7);
        assert_eq!(llm.temperature, Some(0.2));
    }
}
