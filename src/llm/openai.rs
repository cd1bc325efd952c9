//! Chat completions over an OpenAI-compatible API.

use super::{ChatModel, Completion, GenerationParams, Message, ResponseMetadata, Role};
use crate::error::{ParleyError, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Chat model backed by an OpenAI-compatible chat completions endpoint.
pub struct OpenAIChatModel {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAIChatModel {
    /// Create a chat model from an existing client.
    pub fn with_client(client: Client<OpenAIConfig>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }
}

/// Convert messages to the request representation.
fn to_request_messages(messages: &[Message]) -> Result<Vec<ChatCompletionRequestMessage>> {
    messages
        .iter()
        .map(|message| {
            let converted: ChatCompletionRequestMessage = match message.role {
                Role::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map_err(|e| ParleyError::GenerationService(e.to_string()))?
                    .into(),
                Role::Human => ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map_err(|e| ParleyError::GenerationService(e.to_string()))?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map_err(|e| ParleyError::GenerationService(e.to_string()))?
                    .into(),
            };
            Ok(converted)
        })
        .collect()
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    #[instrument(skip(self, messages, params), fields(model = %self.model, messages = messages.len()))]
    async fn generate(&self, messages: &[Message], params: &GenerationParams) -> Result<Completion> {
        params.validate()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(to_request_messages(messages)?)
            .temperature(params.temperature);
        if let Some(max_tokens) = params.max_tokens {
            args.max_completion_tokens(max_tokens);
        }
        let request = args
            .build()
            .map_err(|e| ParleyError::GenerationService(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            ParleyError::GenerationService(format!("Failed to generate response: {}", e))
        })?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| ParleyError::GenerationService("Empty response from LLM".to_string()))?;

        let text = choice.message.content.clone().unwrap_or_default();

        let usage = response.usage.as_ref();
        let metadata = ResponseMetadata {
            model: response.model.clone(),
            finish_reason: choice
                .finish_reason
                .as_ref()
                .map(|reason| format!("{:?}", reason).to_lowercase()),
            prompt_tokens: usage.map(|u| u.prompt_tokens),
            completion_tokens: usage.map(|u| u.completion_tokens),
            total_tokens: usage.map(|u| u.total_tokens),
        };

        debug!(
            "Generated {} characters ({:?} total tokens)",
            text.len(),
            metadata.total_tokens
        );

        Ok(Completion { text, metadata })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
