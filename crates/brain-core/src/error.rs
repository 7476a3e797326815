//! Error types for generation backends.

use thiserror::Error;

/// Errors that can occur while generating text.
///
/// Callers treat every variant the same way ("generation failed"); the
/// variants only exist to make logs readable.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The backend is temporarily unavailable.
    #[error("brain unavailable: {0}")]
    Unavailable(String),

    /// The request was sent but no usable text came back.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// Transport-level failure talking to the backend.
    #[error("network error: {0}")]
    Network(String),

    /// The backend is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The call did not finish in time.
    #[error("generation timed out")]
    Timeout,
}
