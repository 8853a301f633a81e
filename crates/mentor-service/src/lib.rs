//! Mentor AI Service
//!
//! Ties prompt construction, the configured LLM provider and reply
//! extraction together.
//!
//! # Architecture
//!
//! ```text
//! code + challenge → PromptBuilder → LlmProvider → mentor-extractor → ReviewResult / questions / hint / chat
//! ```
//!
//! # Key Features
//!
//! - **Code review**: single JSON object prompt with a field schema
//! - **Interviewer questions**: JSON array prompt
//! - **Hints**: four levels from a nudge to a walkthrough
//! - **Mentor chat**: bounded history, code-aware instructions, follow-up suggestions
//! - **Graceful degradation**: a missing key or failed call becomes a message, not an error
//!
//! # Example Usage
//!
//! ```
//! use mentor_domain::Challenge;
//! use mentor_llm::MockProvider;
//! use mentor_service::{AiService, ServiceConfig};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let llm = MockProvider::new(r#"["Why a map?", "What if the input is empty?"]"#);
//! let service = AiService::new(llm, ServiceConfig::default());
//!
//! let challenge = Challenge::new("two-sum", "Two Sum");
//! let questions = service
//!     .interviewer_questions("func twoSum() {}", &challenge, "first attempt")
//!     .await;
//!
//! assert_eq!(questions.len(), 2);
//! # });
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod followup;
mod prompt;
mod service;

#[cfg(test)]
mod tests;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use followup::{context_description, follow_up_suggestions};
pub use prompt::{HintLevel, PromptBuilder, REVIEW_SCHEMA};
pub use service::AiService;
