//! Mentor Extractor
//!
//! Turns the raw text of an LLM reply into structured data without ever
//! failing outward.
//!
//! # Overview
//!
//! Upstream models are asked to answer with a single JSON object (code
//! reviews), a JSON array (interview questions) or plain text (hints, chat).
//! They do not always comply: replies arrive wrapped in markdown fences,
//! surrounded by prose, or cut off mid-object by token limits. This crate
//! absorbs all of that and always hands back a usable value.
//!
//! # Architecture
//!
//! ```text
//! raw reply → strip fences → direct parse
//!                          → balanced-substring parse
//!                          → issues-fragment repair   (truncated replies)
//!                          → fallback review          (everything else)
//! ```
//!
//! Every function here is pure and synchronous apart from advisory `tracing`
//! output, so it is safe to call from any number of tasks at once.
//!
//! # Example Usage
//!
//! ```
//! use mentor_extractor::{extract_review, extract_string_array, extract_plain_text};
//!
//! let review = extract_review("no json here");
//! assert_eq!(review.overall_score, 50);
//!
//! let questions = extract_string_array(r#"["Why a map?", "What about nil?"]"#);
//! assert_eq!(questions.len(), 2);
//!
//! assert_eq!(extract_plain_text("```\nUse a map.\n```"), "Use a map.");
//! ```

#![warn(missing_docs)]

mod array;
mod error;
mod fallback;
mod fence;
mod object;
mod recovery;
mod scan;
mod text;


pub use array::extract_string_array;
pub use error::ExtractionFailure;
pub use fallback::{
    default_follow_up_questions, default_interview_questions, fallback_review,
    CHAT_CONTINUATION, FALLBACK_SCORE, HINT_CONTINUATION, MAX_ECHO_CHARS,
};
pub use fence::{strip_code_fences, strip_plain_fences};
pub use object::extract_review;
pub use text::{extract_plain_text, extract_plain_text_or};
