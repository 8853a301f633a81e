//! Partial recovery of truncated review replies
//!
//! Long reviews hit upstream token limits and stop mid-object. What arrived
//! is usually worth keeping: the score near the top, the first few issues.
//! These strategies lift those pieces by pattern without needing the whole
//! object to parse.

use crate::fallback::{
    default_follow_up_questions, troubleshooting_suggestion, unanalyzed_complexity,
};
use crate::fence::strip_code_fences;
use crate::scan::closing_bracket;
use mentor_domain::{Issue, IssueKind, ReviewResult, Severity};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static ISSUES_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""issues"\s*:\s*\["#).expect("issues pattern is valid"));

static OBJECT_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\}\s*,\s*\{").expect("boundary pattern is valid"));

static OVERALL_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""overall_score"\s*:\s*"?(-?\d+(?:\.\d+)?)"#).expect("score pattern is valid")
});

static READABILITY_SCORE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""readability_score"\s*:\s*"?(-?\d+(?:\.\d+)?)"#)
        .expect("score pattern is valid")
});

static FEEDBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""interviewer_feedback"\s*:\s*("(?:[^"\\]|\\.)*")"#)
        .expect("feedback pattern is valid")
});

const TRUNCATED_FEEDBACK: &str = "The AI review was cut off before it finished, so only part of it could be recovered. Can you walk me through your approach while we try again?";

const TRUNCATED_ISSUE: &str = "The AI response was truncated before the review was complete.";

/// Build a review from a truncated reply.
///
/// Issues come from the repaired `"issues"` fragment; if none survive a
/// single parsing issue is synthesized. Scores and feedback are lifted
/// directly from the raw text when present. Everything else takes the
/// generic defaults.
pub(crate) fn recover_partial(raw: &str) -> ReviewResult {
    let mut issues = recover_issues(raw);
    if issues.is_empty() {
        issues.push(truncation_issue(raw));
    }

    let review = ReviewResult {
        overall_score: lift_score(raw, &OVERALL_SCORE).unwrap_or(0),
        issues,
        suggestions: vec![troubleshooting_suggestion()],
        interviewer_feedback: lift_feedback(raw).unwrap_or_else(|| TRUNCATED_FEEDBACK.to_string()),
        follow_up_questions: default_follow_up_questions(),
        complexity: unanalyzed_complexity(),
        readability_score: lift_score(raw, &READABILITY_SCORE).unwrap_or(0),
        test_coverage: "Unable to assess: the AI response was incomplete".to_string(),
    };

    debug!(
        "Recovered partial review: score {}, {} issues",
        review.overall_score,
        review.issues.len()
    );

    review
}

/// Parse whatever complete issue objects the reply contains.
pub(crate) fn recover_issues(raw: &str) -> Vec<Issue> {
    let Some(fragment) = issues_fragment(raw) else {
        return Vec::new();
    };

    let repaired = repair_array(fragment);
    serde_json::from_str::<Vec<Issue>>(&repaired).unwrap_or_else(|e| {
        debug!("Repaired issues array still unparseable: {}", e);
        Vec::new()
    })
}

/// Body of the `"issues": [ ... ]` array, without the brackets. Runs to the
/// end of the text when the closing bracket never arrived.
pub(crate) fn issues_fragment(text: &str) -> Option<&str> {
    let start = ISSUES_ARRAY.find(text)?.end();
    let body = &text[start..];
    Some(match closing_bracket(body) {
        Some(end) => &body[..end],
        None => body,
    })
}

/// Turn an array body into a parseable JSON array.
///
/// A body that does not end with `}` has an incomplete last element: it is
/// dropped at the last `},{` boundary and the array is closed again.
pub(crate) fn repair_array(fragment: &str) -> String {
    let body = fragment.trim().trim_end_matches(',').trim_end();
    if body.is_empty() {
        return "[]".to_string();
    }
    if body.ends_with('}') {
        return format!("[{}]", body);
    }

    let pieces: Vec<&str> = OBJECT_BOUNDARY.split(body).collect();
    let complete = &pieces[..pieces.len() - 1];
    if complete.is_empty() {
        return "[]".to_string();
    }
    format!("[{}}}]", complete.join("},{"))
}

/// Pull a numeric score for a key straight out of the text.
pub(crate) fn lift_score(text: &str, pattern: &Regex) -> Option<u8> {
    let value: f64 = pattern.captures(text)?.get(1)?.as_str().parse().ok()?;
    Some(value.round().clamp(0.0, 100.0) as u8)
}

fn lift_feedback(text: &str) -> Option<String> {
    let quoted = FEEDBACK.captures(text)?.get(1)?.as_str();
    let feedback: String = serde_json::from_str(quoted).ok()?;
    let feedback = feedback.trim();
    (!feedback.is_empty()).then(|| feedback.to_string())
}

/// The single issue reported when no real issue could be recovered.
///
/// Prose the model wrote before its JSON often explains what happened, so it
/// becomes the description when there is any.
pub(crate) fn truncation_issue(raw: &str) -> Issue {
    let prose = raw
        .find('{')
        .map(|idx| strip_code_fences(&raw[..idx]))
        .filter(|prose| !prose.is_empty());

    Issue {
        kind: IssueKind::Parsing,
        severity: Severity::Medium,
        line_number: None,
        description: prose.unwrap_or(TRUNCATED_ISSUE).to_string(),
        solution: "Try running the AI review again; shorter code usually gets a complete response."
            .to_string(),
    }
}
