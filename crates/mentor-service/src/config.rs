//! Configuration for the AI service

use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`AiService`](crate::AiService)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Upper bound on one provider call, retries included (seconds)
    pub request_timeout_secs: u64,

    /// Most recent chat messages included in a chat prompt
    pub history_window: usize,

    /// Maximum follow-up suggestions attached to a chat reply
    pub max_chat_suggestions: usize,

    /// Language the candidate writes code in
    pub language: String,
}

impl ServiceConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.request_timeout_secs == 0 {
            return Err(ServiceError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.max_chat_suggestions == 0 {
            return Err(ServiceError::Config(
                "max_chat_suggestions must be greater than 0".to_string(),
            ));
        }
        if self.language.trim().is_empty() {
            return Err(ServiceError::Config("language must not be empty".to_string()));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ServiceError> {
        let config: ServiceConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ServiceError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 120,
            history_window: 5,
            max_chat_suggestions: 3,
            language: "Go".to_string(),
        }
    }
}
