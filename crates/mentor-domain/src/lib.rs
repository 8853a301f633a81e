//! Mentor Domain Layer
//!
//! Value types and trait boundaries shared by every Mentor crate.
//!
//! ## Key Concepts
//!
//! - **ReviewResult**: A fully-populated code review produced from an LLM reply
//! - **Issue / Suggestion / Complexity**: The parts of a review
//! - **Challenge**: The exercise a candidate is working on
//! - **ChatMessage / ChatResponse**: Mentor conversation turns
//! - **LlmProvider**: The "send prompt, get text back" capability
//!
//! ## Architecture
//!
//! This crate holds no I/O. Provider implementations live in `mentor-llm`,
//! reply normalization lives in `mentor-extractor`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod challenge;
pub mod chat;
mod lenient;
pub mod review;
pub mod traits;

// Re-exports for convenience
pub use challenge::Challenge;
pub use chat::{ChatMessage, ChatResponse, ChatRole};
pub use review::{Complexity, Issue, IssueKind, ReviewResult, Severity, Suggestion};
pub use traits::LlmProvider;
