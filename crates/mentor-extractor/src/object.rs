//! Code-review object extraction

use crate::error::ExtractionFailure;
use crate::fallback::{fallback_review, truncate_chars, MAX_ECHO_CHARS};
use crate::fence::strip_code_fences;
use crate::recovery::recover_partial;
use crate::scan::braces_balanced;
use mentor_domain::ReviewResult;
use tracing::{debug, warn};

/// Extract a [`ReviewResult`] from a raw reply.
///
/// Never fails: a clean reply is parsed as-is, a truncated one is partially
/// recovered, anything else becomes [`fallback_review`].
pub fn extract_review(raw: &str) -> ReviewResult {
    match parse_review(raw) {
        Ok(review) => {
            debug!("Parsed AI review: score {}", review.overall_score);
            review
        }
        Err(failure) => {
            warn!(
                "AI response parsing failed ({}): {}",
                failure,
                truncate_chars(failure.fragment(), MAX_ECHO_CHARS)
            );
            match failure {
                ExtractionFailure::Structural { .. } => recover_partial(raw),
                other => fallback_review(other.reason(), other.fragment()),
            }
        }
    }
}

/// Run the parse strategies in order, stopping at the first success.
pub(crate) fn parse_review(raw: &str) -> Result<ReviewResult, ExtractionFailure> {
    let cleaned = strip_code_fences(raw);

    let (review, candidate) = match parse_direct(cleaned) {
        Some(review) => (review, cleaned),
        None => {
            let candidate = locate_object(cleaned)?;
            (parse_balanced(candidate)?, candidate)
        }
    };

    validate(review, candidate)
}

/// Strategy 1: the unfenced reply is exactly one JSON object.
pub(crate) fn parse_direct(cleaned: &str) -> Option<ReviewResult> {
    if !cleaned.starts_with('{') {
        return None;
    }
    serde_json::from_str(cleaned).ok()
}

/// Slice from the first `{` to the last `}`.
///
/// A reply with an opening brace but no closing one after it was cut off;
/// the candidate then runs to the end so the balance check flags it.
pub(crate) fn locate_object(cleaned: &str) -> Result<&str, ExtractionFailure> {
    let start = cleaned
        .find('{')
        .ok_or_else(|| ExtractionFailure::NoDelimiter {
            text: cleaned.to_string(),
        })?;

    Ok(match cleaned.rfind('}') {
        Some(end) if end > start => &cleaned[start..=end],
        _ => &cleaned[start..],
    })
}

/// Strategy 2: balance-check the candidate, then parse it.
pub(crate) fn parse_balanced(candidate: &str) -> Result<ReviewResult, ExtractionFailure> {
    if !braces_balanced(candidate) {
        return Err(ExtractionFailure::Structural {
            candidate: candidate.to_string(),
        });
    }

    serde_json::from_str(candidate).map_err(|e| ExtractionFailure::Syntactic {
        candidate: candidate.to_string(),
        message: e.to_string(),
    })
}

/// Reject syntactically valid but hollow objects.
pub(crate) fn validate(
    review: ReviewResult,
    candidate: &str,
) -> Result<ReviewResult, ExtractionFailure> {
    if review.is_hollow() {
        return Err(ExtractionFailure::Semantic {
            candidate: candidate.to_string(),
        });
    }
    Ok(review)
}
