//! Plain-text extraction (hints, chat)

use crate::fallback::CHAT_CONTINUATION;
use crate::fence::strip_plain_fences;
use tracing::warn;

/// Clean a plain-text reply. Never parses JSON.
///
/// An empty reply becomes [`CHAT_CONTINUATION`].
pub fn extract_plain_text(raw: &str) -> String {
    extract_plain_text_or(raw, CHAT_CONTINUATION)
}

/// Like [`extract_plain_text`] with a caller-chosen continuation string.
pub fn extract_plain_text_or(raw: &str, fallback: &str) -> String {
    let cleaned = strip_plain_fences(raw);
    if cleaned.is_empty() {
        warn!("AI returned an empty text response");
        return fallback.to_string();
    }
    cleaned.to_string()
}
