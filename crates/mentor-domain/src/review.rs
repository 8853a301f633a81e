//! Review module - the structured result of an AI code review
//!
//! The JSON shape is fixed: field names here are the wire contract for every
//! consumer of a review.

use crate::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete code review.
///
/// Deserialization is deliberately forgiving: missing fields take their zero
/// value, `null` strings and lists become empty, scores are coerced into
/// 0..=100, unreadable labels take their default and non-string follow-up
/// questions are dropped. Whether the result is *meaningful* is decided by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewResult {
    /// Overall score, 0-100
    #[serde(deserialize_with = "lenient::score")]
    pub overall_score: u8,

    /// Concrete problems found in the code
    #[serde(deserialize_with = "lenient::null_default")]
    pub issues: Vec<Issue>,

    /// Improvement suggestions
    #[serde(deserialize_with = "lenient::null_default")]
    pub suggestions: Vec<Suggestion>,

    /// What an interviewer would say to the candidate
    #[serde(deserialize_with = "lenient::null_default")]
    pub interviewer_feedback: String,

    /// Questions to ask the candidate next
    #[serde(deserialize_with = "lenient::string_list")]
    pub follow_up_questions: Vec<String>,

    /// Time/space complexity analysis
    #[serde(deserialize_with = "lenient::null_default")]
    pub complexity: Complexity,

    /// Readability score, 0-100
    #[serde(deserialize_with = "lenient::score")]
    pub readability_score: u8,

    /// Free-text test coverage assessment
    #[serde(deserialize_with = "lenient::null_default")]
    pub test_coverage: String,
}

impl ReviewResult {
    /// True when every signal field is at its zero value.
    ///
    /// Overall score, readability score and feedback all empty at once is
    /// what a hollow placeholder object looks like.
    pub fn is_hollow(&self) -> bool {
        self.overall_score == 0
            && self.readability_score == 0
            && self.interviewer_feedback.trim().is_empty()
    }
}

/// A specific problem in the reviewed code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    /// Issue category
    #[serde(rename = "type", deserialize_with = "lenient::label")]
    pub kind: IssueKind,

    /// How bad it is
    #[serde(deserialize_with = "lenient::label")]
    pub severity: Severity,

    /// Approximate line number, when the model gave a usable one
    #[serde(deserialize_with = "lenient::line_number")]
    pub line_number: Option<u32>,

    /// Human-readable description
    #[serde(deserialize_with = "lenient::null_default")]
    pub description: String,

    /// Suggested fix
    #[serde(deserialize_with = "lenient::null_default")]
    pub solution: String,
}

/// Issue category.
///
/// Labels outside the known set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IssueKind {
    /// Incorrect behavior
    Bug,
    /// Inefficient code
    Performance,
    /// Idiom or formatting problems
    Style,
    /// Flawed reasoning in the algorithm
    Logic,
    /// The review itself could not be parsed
    Parsing,
    /// Any other label the model produced
    Other(String),
}

impl IssueKind {
    /// Get the wire name
    pub fn as_str(&self) -> &str {
        match self {
            IssueKind::Bug => "bug",
            IssueKind::Performance => "performance",
            IssueKind::Style => "style",
            IssueKind::Logic => "logic",
            IssueKind::Parsing => "parsing",
            IssueKind::Other(label) => label,
        }
    }
}

impl Default for IssueKind {
    fn default() -> Self {
        IssueKind::Other("unspecified".to_string())
    }
}

impl From<String> for IssueKind {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "bug" => IssueKind::Bug,
            "performance" => IssueKind::Performance,
            "style" => IssueKind::Style,
            "logic" => IssueKind::Logic,
            "parsing" => IssueKind::Parsing,
            "" => IssueKind::default(),
            _ => IssueKind::Other(s),
        }
    }
}

impl From<IssueKind> for String {
    fn from(kind: IssueKind) -> Self {
        match kind {
            IssueKind::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue severity.
///
/// Unknown labels deserialize as `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Severity {
    /// Cosmetic
    Low,
    /// Worth fixing
    #[default]
    Medium,
    /// Likely to cause failures
    High,
    /// Must fix
    Critical,
}

impl Severity {
    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" | "minor" => Severity::Low,
            "high" | "major" => Severity::High,
            "critical" | "blocker" => Severity::Critical,
            _ => Severity::Medium,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An improvement suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestion {
    /// "optimization", "best_practice", "alternative", ...
    #[serde(deserialize_with = "lenient::null_default")]
    pub category: String,

    /// "low", "medium" or "high"
    #[serde(deserialize_with = "lenient::null_default")]
    pub priority: String,

    /// What to improve
    #[serde(deserialize_with = "lenient::null_default")]
    pub description: String,

    /// Code example, empty when none was given
    #[serde(deserialize_with = "lenient::null_default")]
    pub example: String,
}

/// Time/space complexity analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Complexity {
    /// e.g. "O(n)"
    #[serde(deserialize_with = "lenient::null_default")]
    pub time_complexity: String,

    /// e.g. "O(1)"
    #[serde(deserialize_with = "lenient::null_default")]
    pub space_complexity: String,

    /// Whether a better approach exists
    #[serde(deserialize_with = "lenient::flag")]
    pub can_optimize: bool,

    /// How to optimize
    #[serde(deserialize_with = "lenient::null_default")]
    pub optimized_approach: String,
}
