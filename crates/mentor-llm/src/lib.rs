//! Mentor LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `mentor-domain`.
//!
//! # Architecture
//!
//! Providers are a closed set selected once at startup from an [`LlmConfig`].
//! [`AnyProvider`] dispatches to the selected variant so the rest of the
//! system holds one concrete type.
//!
//! # Providers
//!
//! - `GeminiProvider`: Google `generateContent`
//! - `OpenAiProvider`: OpenAI chat completions
//! - `ClaudeProvider`: Anthropic messages
//! - `MockProvider`: Deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use mentor_llm::MockProvider;
//! use mentor_domain::LlmProvider;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # });
//! ```

#![warn(missing_docs)]

pub mod claude;
pub mod config;
pub mod gemini;
mod http;
pub mod openai;
pub mod provider;

use async_trait::async_trait;
use mentor_domain::LlmProvider as LlmProviderTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use claude::ClaudeProvider;
pub use config::{ConfigError, LlmConfig, ProviderKind};
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use provider::AnyProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key configured for the provider
    #[error("No API key configured for {0}")]
    MissingApiKey(&'static str),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Non-success HTTP status with an unrecognized body
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Start of the response body
        body: String,
    },

    /// Error reported by the provider's API
    #[error("{provider} API error: {message}")]
    Api {
        /// Provider name
        provider: &'static str,
        /// Provider's error message
        message: String,
    },

    /// The provider answered without any text
    #[error("No response from {0}")]
    EmptyResponse(&'static str),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
/// It's useful for testing and development.
///
/// # Examples
///
/// ```
/// use mentor_llm::MockProvider;
/// use mentor_domain::LlmProvider;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").await.unwrap(), "Fixed response");
///
/// // Multiple responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_response("prompt2", "response2");
/// assert_eq!(provider.generate("prompt1").await.unwrap(), "response1");
/// assert_eq!(provider.generate("prompt2").await.unwrap(), "response2");
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    configured: bool,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            configured: true,
        }
    }

    /// A provider that reports missing credentials
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::default()
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), MockReply::Error);
    }

    /// Get the number of times a generate method was called
    pub fn call_count(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Prompts received so far, oldest first
    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }

    /// Reset the call history
    pub fn reset_call_count(&self) {
        lock(&self.prompts).clear();
    }

    fn reply(&self, prompt: &str) -> Result<String, LlmError> {
        lock(&self.prompts).push(prompt.to_string());

        match lock(&self.responses).get(prompt) {
            Some(MockReply::Text(response)) => Ok(response.clone()),
            Some(MockReply::Error) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.reply(prompt)
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, Self::Error> {
        self.reply(prompt)
    }
}
