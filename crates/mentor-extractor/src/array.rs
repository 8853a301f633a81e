//! String-array extraction (interview questions)

use crate::error::ExtractionFailure;
use crate::fallback::{default_interview_questions, truncate_chars, MAX_ECHO_CHARS};
use tracing::warn;

/// Extract an ordered list of strings from a raw reply.
///
/// All-or-nothing: any failure yields [`default_interview_questions`].
pub fn extract_string_array(raw: &str) -> Vec<String> {
    match parse_string_array(raw) {
        Ok(items) => items,
        Err(failure) => {
            warn!(
                "AI question list parsing failed ({}): {}",
                failure,
                truncate_chars(failure.fragment(), MAX_ECHO_CHARS)
            );
            default_interview_questions()
        }
    }
}

pub(crate) fn parse_string_array(raw: &str) -> Result<Vec<String>, ExtractionFailure> {
    let start = raw.find('[');
    let end = raw.rfind(']');

    let candidate = match (start, end) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => {
            return Err(ExtractionFailure::NoDelimiter {
                text: raw.to_string(),
            })
        }
    };

    serde_json::from_str(candidate).map_err(|e| ExtractionFailure::Syntactic {
        candidate: candidate.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let items = parse_string_array(r#"["Q1?", "Q2?"]"#).unwrap();
        assert_eq!(items, vec!["Q1?", "Q2?"]);
    }

    #[test]
    fn test_parse_array_with_noise() {
        let items = parse_string_array("```json\n[\"a\", \"b\", \"c\"]\n```").unwrap();
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_non_string_elements_fail() {
        let err = parse_string_array(r#"[{"question": "Q1?"}]"#).unwrap_err();
        assert!(matches!(err, ExtractionFailure::Syntactic { .. }));
    }

    #[test]
    fn test_missing_brackets_fail() {
        let err = parse_string_array("not an array").unwrap_err();
        assert!(matches!(err, ExtractionFailure::NoDelimiter { .. }));
        assert!(parse_string_array("] backwards [").is_err());
    }

    #[test]
    fn test_extract_falls_back() {
        assert_eq!(extract_string_array("[\"unterminated"), default_interview_questions());
    }

    #[test]
    fn test_extract_empty_array() {
        assert!(extract_string_array("[]").is_empty());
    }
}
