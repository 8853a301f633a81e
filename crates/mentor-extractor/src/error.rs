//! Failure taxonomy for reply extraction
//!
//! None of these ever reach a caller of the public extract functions. They
//! select the recovery path and name the reason in logs and fallback text.

use thiserror::Error;

/// Why a reply could not be parsed as-is
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// No opening bracket anywhere in the reply
    #[error("No JSON found in AI response")]
    NoDelimiter {
        /// The reply text that was searched
        text: String,
    },

    /// Brackets found but nesting is unbalanced (truncated reply)
    #[error("Incomplete JSON response")]
    Structural {
        /// The JSON candidate
        candidate: String,
    },

    /// Balanced candidate that is not valid JSON for the expected shape
    #[error("JSON parsing error: {message}")]
    Syntactic {
        /// The JSON candidate
        candidate: String,
        /// Parser message
        message: String,
    },

    /// Valid JSON whose signal fields are all empty
    #[error("Incomplete AI response")]
    Semantic {
        /// The JSON candidate
        candidate: String,
    },
}

impl ExtractionFailure {
    /// Short label suitable for user-facing text
    pub fn reason(&self) -> &'static str {
        match self {
            ExtractionFailure::NoDelimiter { .. } => "No JSON found in AI response",
            ExtractionFailure::Structural { .. } => "Incomplete JSON response",
            ExtractionFailure::Syntactic { .. } => "JSON parsing error",
            ExtractionFailure::Semantic { .. } => "Incomplete AI response",
        }
    }

    /// The text that caused the failure
    pub fn fragment(&self) -> &str {
        match self {
            ExtractionFailure::NoDelimiter { text } => text,
            ExtractionFailure::Structural { candidate }
            | ExtractionFailure::Syntactic { candidate, .. }
            | ExtractionFailure::Semantic { candidate } => candidate,
        }
    }
}
