//! Mock generation backends for the crowd orchestrator.
//!
//! This crate provides mock implementations of the `Brain` trait:
//! - `EchoBrain` - Echoes the prompt back
//! - `FailingBrain` - Fails every call, counting attempts
//! - `ScriptedBrain` - Per-agent replies, failures and latencies
//! - `DelayedBrain` - Wraps another brain with artificial delay
//!
//! For real generation, use the `chat-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{Brain, EchoBrain, GenerationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::BrainError> {
//!     let brain = EchoBrain::new();
//!
//!     let request = GenerationRequest::new("lea", "Tu es Léa.", "Bonjour !");
//!
//!     let text = brain.generate(request).await?;
//!     println!("Generated: {}", text);
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod failing;
mod scripted;

// Re-export brain-core types for convenience
pub use brain_core::{async_trait, Brain, BrainError, ChatTurn, GenerationRequest};

pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use failing::FailingBrain;
pub use scripted::ScriptedBrain;
