//! Prompt templates for Parley.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.
//! Templates use `{name}` placeholders; see [`crate::prompt`].

use crate::llm::Role;
use crate::prompt::{ChatPromptTemplate, PromptValues};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub rag: RagPrompts,
    pub chat: ChatPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// How retrieved context is presented to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RagStyle {
    /// Context in a system message, question as the human message.
    #[default]
    SystemContext,
    /// Instructions, context and question in one human message, for models
    /// without system prompt support.
    SingleHuman,
}

impl std::str::FromStr for RagStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "system_context" | "system" => Ok(RagStyle::SystemContext),
            "single_human" | "human" => Ok(RagStyle::SingleHuman),
            _ => Err(format!("Unknown RAG prompt style: {}", s)),
        }
    }
}

/// Prompts for RAG answering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    /// System message carrying the context (`{context}`, `{fallback}`).
    pub system: String,
    /// Human message carrying the question (`{question}`).
    pub human: String,
    /// Single human message with everything (`{context}`, `{question}`, `{fallback}`).
    pub single_human: String,
    /// Phrase the model must reply with when the context lacks the answer.
    pub fallback: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            system: "You are a helpful assistant. Answer the question based ONLY on the context \
                     provided below. If the context does not contain the answer, say '{fallback}'\n\n\
                     Context:\n{context}"
                .to_string(),
            human: "{question}".to_string(),
            single_human: "You are a helpful assistant. Answer the question based ONLY on the \
                           context provided below. If the context does not contain the answer, \
                           say '{fallback}'\n\nContext:\n{context}\n\nQuestion: {question}"
                .to_string(),
            fallback: "I don't have that information in the document.".to_string(),
        }
    }
}

impl RagPrompts {
    /// Build the chat template for the given style.
    pub fn template(&self, style: RagStyle) -> ChatPromptTemplate {
        match style {
            RagStyle::SystemContext => ChatPromptTemplate::from_messages([
                (Role::System, self.system.clone()),
                (Role::Human, self.human.clone()),
            ]),
            RagStyle::SingleHuman => {
                ChatPromptTemplate::from_messages([(Role::Human, self.single_human.clone())])
            }
        }
    }
}

/// Prompts for plain chat sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    /// System prompt for the interactive assistant.
    pub system: String,
    /// System prompt for the remembering assistant used in conversation demos.
    pub memory_system: String,
}

impl Default for ChatPrompts {
    fn default() -> Self {
        Self {
            system: "You are a helpful assistant. Keep answers concise (2-3 sentences).".to_string(),
            memory_system: "You are a friendly assistant named Buddy. Keep responses concise \
                            (1-2 sentences)."
                .to_string(),
        }
    }
}

impl ChatPrompts {
    /// Template: system prompt, then a single `{question}`.
    pub fn assistant_template(&self) -> ChatPromptTemplate {
        ChatPromptTemplate::from_messages([
            (Role::System, self.system.clone()),
            (Role::Human, "{question}".to_string()),
        ])
    }

    /// Template: system prompt, `chat_history` placeholder, then `{input}`.
    pub fn memory_template(&self) -> ChatPromptTemplate {
        ChatPromptTemplate::from_messages([(Role::System, self.memory_system.clone())])
            .with_placeholder("chat_history")
            .with_message(Role::Human, "{input}")
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let rag_path = custom_path.join("rag.toml");
            if rag_path.exists() {
                let content = std::fs::read_to_string(&rag_path)?;
                prompts.rag = toml::from_str(&content)?;
            }

            let chat_path = custom_path.join("chat.toml");
            if chat_path.exists() {
                let content = std::fs::read_to_string(&chat_path)?;
                prompts.chat = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Prompt values pre-filled with the custom config variables.
    /// Values set afterwards take precedence.
    pub fn values(&self) -> PromptValues {
        self.variables
            .iter()
            .fold(PromptValues::new(), |values, (k, v)| values.text(k.clone(), v))
    }
}
