//! Failing brain implementation - every call fails.

use std::sync::atomic::{AtomicUsize, Ordering};

use brain_core::{async_trait, Brain, BrainError, GenerationRequest};

/// A brain whose backend is permanently down.
///
/// Counts how many calls were attempted so tests can check that every
/// selected agent was still tried.
#[derive(Debug, Default)]
pub struct FailingBrain {
    reason: String,
    calls: AtomicUsize,
}

impl FailingBrain {
    /// Create a brain that reports the backend as unavailable.
    pub fn new() -> Self {
        Self::with_reason("backend offline")
    }

    /// Create a brain that fails with a custom reason.
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of generate calls attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, BrainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BrainError::Unavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}
