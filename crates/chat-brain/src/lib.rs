//! Chat-completion backed brain implementation.
//!
//! This crate provides a [`Brain`] that turns a persona-conditioned
//! [`GenerationRequest`] into a call against any OpenAI-compatible
//! `/v1/chat/completions` endpoint.
//!
//! # Features
//!
//! - Persona becomes the system message, room context becomes prior turns
//! - Per-request `max_tokens` / `temperature` override the configured defaults
//! - Empty completions are reported as failures so callers can fall back
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use chat_brain::ChatBrain;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = ChatBrain::from_env()?;
//!     // Hand the brain to the crowd orchestrator...
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::ChatBrain;
pub use config::{ChatBrainConfig, ChatBrainConfigBuilder};

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, ChatTurn, GenerationRequest};
