//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use async_trait::async_trait;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (mentor-llm). A provider sends a
/// prompt upstream and hands back the verbatim text of the reply; turning
/// that text into structured data is not its job.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short provider name (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Model identifier sent upstream
    fn model(&self) -> &str;

    /// Whether credentials are present. Callers check this before spending
    /// a network round trip.
    fn is_configured(&self) -> bool {
        true
    }

    /// Generate free-form text
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate a reply that the prompt asks to be JSON, enabling any
    /// provider-side JSON mode
    async fn generate_json(&self, prompt: &str) -> Result<String, Self::Error>;
}
