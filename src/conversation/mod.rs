//! Conversations with memory.
//!
//! History is owned by the caller and passed into each turn, so separate
//! sessions never share state.

use crate::error::Result;
use crate::llm::{ChatModel, GenerationParams, Message, Role};
use crate::output::{OutputParser, StrOutputParser};
use crate::prompt::{ChatPromptTemplate, PromptValues};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Template variable holding the history messages.
pub const HISTORY_VARIABLE: &str = "chat_history";

/// Template variable holding the new user input.
pub const INPUT_VARIABLE: &str = "input";

/// Append-only record of a conversation, in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed exchange.
    pub fn push_exchange(&mut self, input: impl Into<String>, reply: impl Into<String>) {
        self.messages.push(Message::human(input));
        self.messages.push(Message::assistant(reply));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of completed exchanges.
    pub fn turns(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::Human).count()
    }
}

/// Renders `{chat_history, input}`, generates, and records the exchange.
pub struct ConversationChain {
    model: Arc<dyn ChatModel>,
    template: ChatPromptTemplate,
    params: GenerationParams,
    base_values: PromptValues,
}

impl ConversationChain {
    /// The template must reference `chat_history` and `input`.
    pub fn new(model: Arc<dyn ChatModel>, template: ChatPromptTemplate, params: GenerationParams) -> Self {
        Self {
            model,
            template,
            params,
            base_values: PromptValues::new(),
        }
    }

    /// Extra values available to the template.
    pub fn with_values(mut self, values: PromptValues) -> Self {
        self.base_values = values;
        self
    }

    /// Run one turn. History is only extended when generation succeeds.
    #[instrument(skip(self, history), fields(history = history.len()))]
    pub async fn turn(&self, history: &mut ConversationHistory, input: &str) -> Result<String> {
        let values = self
            .base_values
            .clone()
            .messages(HISTORY_VARIABLE, history.messages().to_vec())
            .text(INPUT_VARIABLE, input);
        let messages = self.template.render(&values)?;

        let completion = self.model.generate(&messages, &self.params).await?;
        let reply = StrOutputParser.parse(&completion.text)?;

        history.push_exchange(input, reply.clone());
        debug!("History now holds {} messages", history.len());

        Ok(reply)
    }
}
