//! Generation request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One prior line of the room conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Display name of whoever said it.
    pub speaker: String,
    /// What they said.
    pub text: String,
    /// When it was said.
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a turn stamped with the current time.
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self::at(speaker, text, Utc::now())
    }

    /// Create a turn with an explicit timestamp.
    pub fn at(speaker: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            timestamp,
        }
    }
}

/// A persona-conditioned request for one piece of generated text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Which virtual agent the text is for (used for logging and stubs).
    pub agent_id: String,
    /// Persona and style instructions.
    pub system_prompt: String,
    /// Recent conversation, oldest first.
    #[serde(default)]
    pub context: Vec<ChatTurn>,
    /// The instruction for this particular line.
    pub prompt: String,
    /// Upper bound on generated tokens, if the backend supports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Sampling temperature, if the backend supports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationRequest {
    /// Create a request with no context and backend-default parameters.
    pub fn new(
        agent_id: impl Into<String>,
        system_prompt: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            system_prompt: system_prompt.into(),
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    /// Attach conversation context.
    pub fn with_context(mut self, context: Vec<ChatTurn>) -> Self {
        self.context = context;
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let turn = ChatTurn::new("Alice", "salut");
        let request = GenerationRequest::new("lea", "Tu es Léa.", "Réponds.")
            .with_context(vec![turn.clone()])
            .with_max_tokens(120)
            .with_temperature(0.8);

        assert_eq!(request.agent_id, "lea");
        assert_eq!(request.context, vec![turn]);
        assert_eq!(request.max_tokens, Some(120));
        assert_eq!(request.temperature, Some(0.8));
    }

    #[test]
    fn test_request_serialization_skips_unset_params() {
        let request = GenerationRequest::new("lea", "system", "prompt");
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["agent_id"], "lea");
    }
}
