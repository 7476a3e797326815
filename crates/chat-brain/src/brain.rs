//! ChatBrain implementation using an OpenAI-compatible API.

use brain_core::{async_trait, hash_prompt, Brain, BrainError, GenerationRequest};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::ChatBrainConfig;

/// A brain that generates virtual-player lines through a chat completion API.
///
/// Stateless: everything the model sees comes from the request, so one
/// instance serves every agent concurrently.
pub struct ChatBrain {
    client: Client,
    config: ChatBrainConfig,
}

impl ChatBrain {
    /// Create a new ChatBrain with the given configuration.
    pub fn new(config: ChatBrainConfig) -> Result<Self, BrainError> {
        if config.api_key.is_empty() {
            return Err(BrainError::Configuration("API key is empty".to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "ChatBrain initialized with model: {}, api: {}",
            config.model, config.api_url
        );

        Ok(Self { client, config })
    }

    /// Create a ChatBrain from environment variables.
    ///
    /// See [`ChatBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, BrainError> {
        Self::new(ChatBrainConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChatBrainConfig {
        &self.config
    }

    /// Build the body for a chat completion call.
    fn build_request(&self, request: &GenerationRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.context.len() + 2);
        messages.push(ChatMessage::system(request.system_prompt.clone()));

        for turn in &request.context {
            messages.push(ChatMessage::user(format!("{}: {}", turn.speaker, turn.text)));
        }

        messages.push(ChatMessage::user(request.prompt.clone()));

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens.or(self.config.max_tokens),
            temperature: request.temperature.or(self.config.temperature),
        }
    }

    /// Make a chat completion request.
    async fn chat_completion(
        &self,
        body: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, BrainError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| BrainError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            let detail = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);

            return Err(BrainError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                detail
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Brain for ChatBrain {
    async fn generate(&self, request: GenerationRequest) -> Result<String, BrainError> {
        debug!(
            agent = %request.agent_id,
            persona = %hash_prompt(&request.system_prompt),
            context_turns = request.context.len(),
            "Generating line"
        );

        let body = self.build_request(&request);
        let completion = self.chat_completion(&body).await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BrainError::ProcessingFailed("No choices in response".to_string()))?;

        debug!("Finish reason: {:?}", choice.finish_reason);

        choice
            .message
            .content
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| BrainError::ProcessingFailed("Empty completion".to_string()))
    }

    fn name(&self) -> &str {
        "ChatBrain"
    }
}
