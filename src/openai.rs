//! OpenAI-compatible client configuration for the supported providers.
//!
//! OpenAI, Groq and Google Gemini all expose an OpenAI-compatible REST surface,
//! so a single `async-openai` client covers every provider once its base URL and
//! API key are set.

use crate::error::{ParleyError, Result};
use async_openai::{config::OpenAIConfig, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for API requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Hosted model provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAI,
    Groq,
    Gemini,
}

impl Provider {
    /// Base URL of the provider's OpenAI-compatible API.
    pub fn api_base(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::Groq => "https://api.groq.com/openai/v1",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        }
    }

    /// Environment variables consulted for the API key, in order.
    pub fn api_key_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::OpenAI => &["OPENAI_API_KEY"],
            Provider::Groq => &["GROQ_API_KEY"],
            Provider::Gemini => &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
        }
    }

    /// Look up the API key from the environment.
    pub fn api_key(&self) -> Result<String> {
        self.api_key_vars()
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ParleyError::Config(format!(
                    "{} not set. Set it with: export {}='...'",
                    self.api_key_vars().join(" or "),
                    self.api_key_vars()[0]
                ))
            })
    }

    /// Default chat model for this provider.
    pub fn default_chat_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4o-mini",
            Provider::Groq => "llama-3.3-70b-versatile",
            Provider::Gemini => "gemini-2.5-flash",
        }
    }

    /// Default embedding model for this provider, if it serves embeddings.
    pub fn default_embedding_model(&self) -> Option<&'static str> {
        match self {
            Provider::OpenAI => Some("text-embedding-3-small"),
            Provider::Groq => None,
            Provider::Gemini => Some("gemini-embedding-001"),
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "groq" => Ok(Provider::Groq),
            "gemini" | "google" => Ok(Provider::Gemini),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::OpenAI => write!(f, "openai"),
            Provider::Groq => write!(f, "groq"),
            Provider::Gemini => write!(f, "gemini"),
        }
    }
}

/// Resolve the base URL for a provider, validating any override.
pub fn resolve_api_base(provider: Provider, api_base: Option<&str>) -> Result<String> {
    match api_base {
        Some(base) => {
            let parsed = url::Url::parse(base)
                .map_err(|e| ParleyError::InvalidConfig(format!("Invalid API base '{}': {}", base, e)))?;
            Ok(parsed.as_str().trim_end_matches('/').to_string())
        }
        None => Ok(provider.api_base().to_string()),
    }
}

/// Create a client for the provider with the default timeout.
pub fn create_client(provider: Provider, api_base: Option<&str>) -> Result<Client<OpenAIConfig>> {
    create_client_with_timeout(provider, api_base, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create a client for the provider with a custom timeout.
pub fn create_client_with_timeout(
    provider: Provider,
    api_base: Option<&str>,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(timeout).build()?;

    let config = OpenAIConfig::new()
        .with_api_base(resolve_api_base(provider, api_base)?)
        .with_api_key(provider.api_key()?);

    Ok(Client::with_config(config).with_http_client(http_client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("GROQ".parse::<Provider>().unwrap(), Provider::Groq);
        assert_eq!("google".parse::<Provider>().unwrap(), Provider::Gemini);
        assert!("anthropic".parse::<Provider>().is_err());
    }

    #[test]
    fn test_resolve_api_base() {
        assert_eq!(
            resolve_api_base(Provider::Groq, None).unwrap(),
            "https://api.groq.com/openai/v1"
        );
        assert_eq!(
            resolve_api_base(Provider::OpenAI, Some("http://localhost:8080/v1/")).unwrap(),
            "http://localhost:8080/v1"
        );
        assert!(matches!(
            resolve_api_base(Provider::OpenAI, Some("not a url")),
            Err(ParleyError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_groq_has_no_embeddings() {
        assert!(Provider::Groq.default_embedding_model().is_none());
        assert_eq!(Provider::Gemini.default_embedding_model(), Some("gemini-embedding-001"));
    }
}
