//! Messages flowing in and out of the orchestrator.

use brain_core::ChatTurn;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::VirtualAgent;
use crate::classifier::Classification;

/// A chat line from a human player, plus what was said just before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub text: String,
    /// Prior turns, oldest first.
    #[serde(default)]
    pub context: Vec<ChatTurn>,
}

impl IncomingMessage {
    /// A message with no prior context.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: Vec::new(),
        }
    }

    /// Attach prior turns.
    pub fn with_context(mut self, context: Vec<ChatTurn>) -> Self {
        self.context = context;
        self
    }

    /// The most recent `limit` turns, oldest first.
    pub fn recent_context(&self, limit: usize) -> Vec<ChatTurn> {
        let skip = self.context.len().saturating_sub(limit);
        self.context[skip..].to_vec()
    }
}

/// How a reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Response,
    Fallback,
}

/// How an unprompted line was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpontaneousKind {
    Spontaneous,
    Fallback,
}

/// One virtual player's reply to a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub agent_id: String,
    pub display_name: String,
    pub avatar: String,
    pub text: String,
    pub responding_to: String,
    pub timestamp: DateTime<Utc>,
    pub kind: ResponseKind,
}

impl GeneratedResponse {
    pub(crate) fn new(
        agent: &VirtualAgent,
        text: impl Into<String>,
        responding_to: impl Into<String>,
        kind: ResponseKind,
    ) -> Self {
        Self {
            agent_id: agent.id.clone(),
            display_name: agent.display_name.clone(),
            avatar: agent.avatar.clone(),
            text: text.into(),
            responding_to: responding_to.into(),
            timestamp: Utc::now(),
            kind,
        }
    }

    /// The reply as a context turn for the next message.
    pub fn as_turn(&self) -> ChatTurn {
        ChatTurn::at(&self.display_name, &self.text, self.timestamp)
    }
}

/// An unprompted line from a virtual player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpontaneousMessage {
    pub agent_id: String,
    pub display_name: String,
    pub avatar: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub kind: SpontaneousKind,
}

impl SpontaneousMessage {
    pub(crate) fn new(agent: &VirtualAgent, text: impl Into<String>, kind: SpontaneousKind) -> Self {
        Self {
            agent_id: agent.id.clone(),
            display_name: agent.display_name.clone(),
            avatar: agent.avatar.clone(),
            text: text.into(),
            timestamp: Utc::now(),
            kind,
        }
    }

    /// The line as a context turn.
    pub fn as_turn(&self) -> ChatTurn {
        ChatTurn::at(&self.display_name, &self.text, self.timestamp)
    }
}

/// Everything produced for one incoming message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBatch {
    /// Replies in delivery order.
    pub responses: Vec<GeneratedResponse>,
    /// The classification the plan was built from.
    pub classification: Classification,
    /// Number of replies actually produced.
    pub response_count: usize,
}

impl ResponseBatch {
    pub(crate) fn new(responses: Vec<GeneratedResponse>, classification: Classification) -> Self {
        Self {
            response_count: responses.len(),
            responses,
            classification,
        }
    }

    /// True when generation failed for everyone and a canned line was used.
    pub fn is_fallback(&self) -> bool {
        self.responses
            .iter()
            .any(|r| r.kind == ResponseKind::Fallback)
    }
}
