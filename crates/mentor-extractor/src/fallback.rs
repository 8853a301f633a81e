//! Fixed defaults used when a reply cannot be turned into real data

use mentor_domain::{Complexity, Issue, IssueKind, ReviewResult, Severity, Suggestion};

/// Neutral score reported when a review could not be analyzed.
///
/// Zero is reserved for "no API key" and "provider unreachable", which are
/// decided before any reply exists.
pub const FALLBACK_SCORE: u8 = 50;

/// How much of an unparseable reply is echoed back in the feedback text
pub const MAX_ECHO_CHARS: usize = 500;

/// Returned by chat extraction when the reply is empty
pub const CHAT_CONTINUATION: &str = "I'm here to help! Could you rephrase your question?";

/// Returned by hint extraction when the reply is empty
pub const HINT_CONTINUATION: &str =
    "Consider the problem step by step. What's the core requirement here?";

const EMPTY_REPLY_FEEDBACK: &str = "AI provided an empty or malformed response. Please try again.";

/// Follow-up questions attached to a review that could not be analyzed
pub fn default_follow_up_questions() -> Vec<String> {
    vec![
        "Can you explain your algorithm step by step?".to_string(),
        "What's the time complexity of your solution?".to_string(),
        "How would you handle edge cases?".to_string(),
    ]
}

/// Interview questions returned when a question list cannot be parsed
pub fn default_interview_questions() -> Vec<String> {
    vec![
        "What's the time complexity of your solution?".to_string(),
        "How would you handle edge cases?".to_string(),
        "Can you optimize this further?".to_string(),
    ]
}

pub(crate) fn troubleshooting_suggestion() -> Suggestion {
    Suggestion {
        category: "troubleshooting".to_string(),
        priority: "medium".to_string(),
        description: "If this keeps happening, try simplifying your code or breaking it into smaller functions."
            .to_string(),
        example: String::new(),
    }
}

pub(crate) fn unanalyzed_complexity() -> Complexity {
    Complexity {
        time_complexity: "Unable to analyze".to_string(),
        space_complexity: "Unable to analyze".to_string(),
        can_optimize: false,
        optimized_approach: "Rerun analysis after fixing any syntax issues".to_string(),
    }
}

/// Build the total-failure review.
///
/// `reason` names what went wrong; `raw` is the offending text, of which at
/// most [`MAX_ECHO_CHARS`] characters are echoed into the feedback.
pub fn fallback_review(reason: &str, raw: &str) -> ReviewResult {
    let echoed = raw.trim();
    let feedback = if echoed.is_empty() {
        EMPTY_REPLY_FEEDBACK.to_string()
    } else {
        truncate_chars(echoed, MAX_ECHO_CHARS)
    };

    ReviewResult {
        overall_score: FALLBACK_SCORE,
        issues: vec![Issue {
            kind: IssueKind::Parsing,
            severity: Severity::Medium,
            line_number: None,
            description: format!("AI response parsing issue: {}", reason),
            solution: "Try running the AI review again, or check your code for syntax issues."
                .to_string(),
        }],
        suggestions: vec![troubleshooting_suggestion()],
        interviewer_feedback: format!(
            "I'm having trouble analyzing your code automatically. {} Let's focus on the core logic - can you walk me through your approach?",
            feedback
        ),
        follow_up_questions: default_follow_up_questions(),
        complexity: unanalyzed_complexity(),
        readability_score: FALLBACK_SCORE,
        test_coverage: "Unable to assess due to parsing error".to_string(),
    }
}

/// Keep the first `max` characters, appending "..." when anything was cut.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
