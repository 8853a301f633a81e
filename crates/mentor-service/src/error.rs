//! Error types for the service layer

use thiserror::Error;

/// Errors that can occur in the service layer.
///
/// Most of these never reach callers of the review, question and chat
/// operations: they are logged and turned into user-facing messages.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Hint level outside 1..=4
    #[error("Invalid hint level {0}: expected 1 to 4")]
    InvalidHintLevel(u8),

    /// LLM provider error
    #[error("Provider error: {0}")]
    Llm(String),

    /// The provider did not answer in time
    #[error("No response within {0}s")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ServiceError {
    fn from(e: toml::de::Error) -> Self {
        ServiceError::Config(format!("Failed to parse TOML: {}", e))
    }
}

impl From<toml::ser::Error> for ServiceError {
    fn from(e: toml::ser::Error) -> Self {
        ServiceError::Config(format!("Failed to serialize to TOML: {}", e))
    }
}
