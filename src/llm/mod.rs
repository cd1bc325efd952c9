//! Chat completion against hosted language models.

mod openai;

pub use openai::OpenAIChatModel;

use crate::error::{ParleyError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Assistant,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Role::System),
            "human" | "user" => Ok(Role::Human),
            "assistant" | "ai" => Ok(Role::Assistant),
            _ => Err(format!("Unknown message role: {}", s)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::Human => write!(f, "human"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::new(Role::Human, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Sampling parameters for a completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature in `[0, 1]`. Zero reduces, but does not remove, variance.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: Option<u32>,
}

impl GenerationParams {
    /// Parameters with the given temperature, rejecting values outside `[0, 1]`.
    pub fn new(temperature: f32) -> Result<Self> {
        let params = Self {
            temperature,
            max_tokens: None,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ParleyError::InvalidConfig(format!(
                "temperature must be within [0, 1], got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: None,
        }
    }
}

/// Response metadata passed through from the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    pub model: String,
    pub finish_reason: Option<String>,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

/// Generated text plus response metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub metadata: ResponseMetadata,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: ResponseMetadata::default(),
        }
    }
}

/// Trait for chat completion backends.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a reply to the ordered message sequence.
    async fn generate(&self, messages: &[Message], params: &GenerationParams) -> Result<Completion>;

    /// Model identifier, for display.
    fn model_name(&self) -> &str;
}
