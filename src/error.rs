//! Error types for Parley.

use thiserror::Error;

/// Library-level error type for Parley operations.
#[derive(Error, Debug)]
pub enum ParleyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding service error: {0}")]
    EmbeddingService(String),

    #[error("Generation service error: {0}")]
    GenerationService(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Missing template variable: {0}")]
    MissingVariable(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Parley operations.
pub type Result<T> = std::result::Result<T, ParleyError>;
