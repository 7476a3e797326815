//! Error types for orchestrator operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can escape the orchestrator.
///
/// Generation failures never appear here: they are absorbed per agent and
/// replaced by fallback lines. Only structurally invalid input and a bad
/// agent roster are reported.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The incoming message had no text after trimming.
    #[error("message text is empty")]
    EmptyMessage,

    /// The agent roster violates a registry invariant.
    #[error("invalid agent registry: {0}")]
    InvalidRegistry(String),

    /// The roster file could not be read.
    #[error("failed to read agent file {path}: {source}")]
    RegistryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The roster JSON could not be parsed.
    #[error("failed to parse agent roster: {0}")]
    RegistryParse(#[from] serde_json::Error),

    /// Configuration value out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A sink refused a delivery.
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}
