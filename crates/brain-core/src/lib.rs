//! Core trait and types for text generation backends.
//!
//! This crate provides the shared interface between the crowd orchestrator
//! and whatever produces text for its virtual players. It defines:
//!
//! - [`Brain`] - The trait that all generation backends must implement
//! - [`GenerationRequest`] / [`ChatTurn`] - The persona-conditioned request
//! - [`BrainError`] - Error types for generation failures
//! - [`hash_prompt`] - Stable fingerprints for prompts in logs
//!
//! # Example
//!
//! ```rust
//! use brain_core::{Brain, BrainError, GenerationRequest};
//! use async_trait::async_trait;
//!
//! struct MyBrain;
//!
//! #[async_trait]
//! impl Brain for MyBrain {
//!     async fn generate(&self, request: GenerationRequest) -> Result<String, BrainError> {
//!         Ok(format!("Re: {}", request.prompt))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "MyBrain"
//!     }
//! }
//! ```

mod error;
mod prompt;
mod request;
mod trait_def;

pub use error::BrainError;
pub use prompt::hash_prompt;
pub use request::{ChatTurn, GenerationRequest};
pub use trait_def::Brain;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
