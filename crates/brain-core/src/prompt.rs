//! Prompt fingerprints for logging.
//!
//! Personas and system prompts are long; logs carry a short hash instead so
//! two runs can be compared without dumping the full text.

use sha2::{Digest, Sha256};

/// Compute a stable hex SHA-256 fingerprint of the given prompt text.
pub fn hash_prompt(prompt: &str) -> String {
    Sha256::digest(prompt.as_bytes())
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
