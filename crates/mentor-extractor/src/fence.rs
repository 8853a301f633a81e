//! Markdown code-fence removal

const FENCE: &str = "```";

/// Strip a leading fence (with or without a language tag) and a trailing
/// fence, then trim.
///
/// Only markers at the very start and end of the trimmed text are touched;
/// fences in the middle are left alone.
pub fn strip_code_fences(text: &str) -> &str {
    let mut clean = text.trim();

    if let Some(rest) = clean.strip_prefix(FENCE) {
        // Language tag runs up to the first non-identifier character
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
            .unwrap_or(rest.len());
        clean = &rest[tag_len..];
    }

    if let Some(rest) = clean.strip_suffix(FENCE) {
        clean = rest;
    }

    clean.trim()
}

/// Strip at most one leading and one trailing triple-backtick marker.
///
/// Unlike [`strip_code_fences`] a language tag is kept, since plain-text
/// replies use it as content (`go` followed by a snippet).
pub fn strip_plain_fences(text: &str) -> &str {
    let clean = text.trim();
    let clean = clean.strip_prefix(FENCE).unwrap_or(clean);
    let clean = clean.strip_suffix(FENCE).unwrap_or(clean);
    clean.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_bare_fence() {
        assert_eq!(strip_code_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_other_language_tag() {
        assert_eq!(strip_code_fences("```JSON5\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```c++\n{}```"), "{}");
    }

    #[test]
    fn test_no_fence_only_trims() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  \n"), "{\"a\": 1}");
    }

    #[test]
    fn test_unclosed_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1"), "{\"a\": 1");
    }

    #[test]
    fn test_inner_fence_untouched() {
        let text = "Here:\n```json\n{}\n```\nthanks";
        assert_eq!(strip_code_fences(text), text);
    }

    #[test]
    fn test_fence_only() {
        assert_eq!(strip_code_fences("```"), "");
        assert_eq!(strip_code_fences(""), "");
    }

    #[test]
    fn test_plain_fences_keep_language_tag() {
        assert_eq!(strip_plain_fences("```go\nfmt.Println()\n```"), "go\nfmt.Println()");
        assert_eq!(strip_plain_fences("  hello  "), "hello");
    }

    #[test]
    fn test_plain_fences_strip_once() {
        assert_eq!(strip_plain_fences("``````"), "");
        assert_eq!(strip_plain_fences("```a``````"), "a```");
    }
}
