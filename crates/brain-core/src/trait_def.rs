//! The Brain trait definition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BrainError;
use crate::request::GenerationRequest;

/// A text generation capability.
///
/// Given a persona-conditioned request, produce text or fail. Nothing about
/// latency, availability or error kinds is assumed beyond that.
/// This trait is object-safe and can be used with `Arc<dyn Brain>`.
#[async_trait]
pub trait Brain: Send + Sync {
    /// Generate one piece of text for the given request.
    async fn generate(&self, request: GenerationRequest) -> Result<String, BrainError>;

    /// Get a human-readable name for this brain implementation.
    fn name(&self) -> &str;

    /// Check if the brain is ready to generate.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}

#[async_trait]
impl<B: Brain + ?Sized> Brain for Arc<B> {
    async fn generate(&self, request: GenerationRequest) -> Result<String, BrainError> {
        (**self).generate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_ready(&self) -> bool {
        (**self).is_ready().await
    }
}

#[async_trait]
impl<B: Brain + ?Sized> Brain for Box<B> {
    async fn generate(&self, request: GenerationRequest) -> Result<String, BrainError> {
        (**self).generate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_ready(&self) -> bool {
        (**self).is_ready().await
    }
}
