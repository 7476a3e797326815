//! Virtual-player orchestrator for a social chat room.
//!
//! This crate provides the [`Orchestrator`] type, which decides whether a
//! chat line deserves a reply, how many virtual players answer, who they
//! are, and what they say.
//!
//! # Features
//!
//! - Keyword classification of French and English chat lines
//! - Probabilistic reply count and responsiveness-weighted agent selection
//! - Concurrent generation through any [`Brain`], delivered in order with
//!   a human-like gap between replies
//! - Canned fallback lines when generation is unavailable
//! - Unprompted conversation starters, on demand or on a timer
//!
//! # Architecture
//!
//! ```text
//! IncomingMessage
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORCHESTRATOR                           │
//! │                                                             │
//! │  1. Classify (greeting / question / help / sharing)         │
//! │         ↓                                                   │
//! │  2. Plan reply count (0..=2)                                │
//! │         ↓                                                   │
//! │  3. Select agents from the registry                         │
//! │         ↓                                                   │
//! │  4. Generate concurrently (Brain, per-call timeout)         │
//! │         ↓                                                   │
//! │  5. Emit in order, staggered → ResponseSink                 │
//! │         ↓                                                   │
//! │  6. All failed? one fallback line                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crowd::{IncomingMessage, LoggingSink, Orchestrator, OrchestratorConfig};
//! use mock_brain::EchoBrain;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OrchestratorConfig::from_env()?;
//!     let orchestrator = Orchestrator::from_config(Arc::new(EchoBrain::new()), LoggingSink, config)?;
//!
//!     let batch = orchestrator.respond(IncomingMessage::new("Salut tout le monde !")).await?;
//!     for response in &batch.responses {
//!         println!("{} {}: {}", response.avatar, response.display_name, response.text);
//!     }
//!     Ok(())
//! }
//! ```

mod agent;
mod classifier;
mod config;
mod error;
mod fallback;
mod message;
mod orchestrator;
mod phrases;
mod planner;
mod prompt;
mod registry;
mod selector;
mod sink;

// Public exports
pub use agent::{AgentProfile, VirtualAgent};
pub use classifier::{classify, Classification, Priority};
pub use config::{OrchestratorConfig, OrchestratorConfigBuilder};
pub use error::OrchestratorError;
pub use fallback::{fallback_line, fallback_reply};
pub use message::{
    GeneratedResponse, IncomingMessage, ResponseBatch, ResponseKind, SpontaneousKind,
    SpontaneousMessage,
};
pub use orchestrator::Orchestrator;
pub use phrases::{
    CONVERSATION_STARTERS, FALLBACK_ACKNOWLEDGMENTS, FALLBACK_GREETINGS, GREETING_OPENERS,
    RESPONSE_OPENERS,
};
pub use planner::{plan_response_count, MAX_RESPONDERS};
pub use prompt::{response_request, spontaneous_request};
pub use registry::AgentRegistry;
pub use selector::select_agents;
pub use sink::{ChannelSink, LoggingSink, NoOpSink, Outgoing, ResponseSink};

// Re-export commonly used types from dependencies
pub use brain_core::{Brain, BrainError, ChatTurn, GenerationRequest};
