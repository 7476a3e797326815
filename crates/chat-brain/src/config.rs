//! Configuration for ChatBrain.

use brain_core::BrainError;
use std::env;

const DEFAULT_API_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for ChatBrain.
#[derive(Debug, Clone)]
pub struct ChatBrainConfig {
    /// Base URL of the OpenAI-compatible API.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Default maximum tokens when the request does not set one.
    pub max_tokens: Option<u32>,

    /// Default temperature when the request does not set one (0.0 - 2.0).
    pub temperature: Option<f32>,
}

impl Default for ChatBrainConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: Some(150),
            temperature: Some(0.9),
        }
    }
}

impl ChatBrainConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CHAT_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `CHAT_API_URL` - API URL (default: https://api.openai.com)
    /// - `CHAT_MODEL` - Model name (default: gpt-4o-mini)
    /// - `CHAT_MAX_TOKENS` - Max tokens (default: 150)
    /// - `CHAT_TEMPERATURE` - Temperature (default: 0.9)
    pub fn from_env() -> Result<Self, BrainError> {
        let api_key = env::var("CHAT_API_KEY")
            .map_err(|_| BrainError::Configuration("CHAT_API_KEY not set".to_string()))?;

        let api_url = env::var("CHAT_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let model = env::var("CHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = env::var("CHAT_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(150));

        let temperature = env::var("CHAT_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.9));

        Ok(Self {
            api_url,
            api_key,
            model,
            max_tokens,
            temperature,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> ChatBrainConfigBuilder {
        ChatBrainConfigBuilder::default()
    }
}

/// Builder for ChatBrainConfig.
#[derive(Debug, Default)]
pub struct ChatBrainConfigBuilder {
    config: ChatBrainConfig,
}

impl ChatBrainConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the default max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Set the default temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ChatBrainConfig {
        self.config
    }
}
