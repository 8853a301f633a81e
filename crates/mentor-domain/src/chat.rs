//! Chat module - mentor conversation turns

use serde::{Deserialize, Serialize};

/// Who sent a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The candidate
    User,
    /// The AI mentor
    Assistant,
}

impl ChatRole {
    /// Speaker label used when replaying history into a prompt
    pub fn speaker(&self) -> &'static str {
        match self {
            ChatRole::User => "User",
            ChatRole::Assistant => "Mentor",
        }
    }
}

/// A single message in a mentor conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender
    pub role: ChatRole,

    /// Message text
    pub content: String,

    /// RFC 3339 timestamp
    #[serde(default)]
    pub timestamp: String,
}

impl ChatMessage {
    /// Create a message without a timestamp
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: String::new(),
        }
    }
}

/// The mentor's answer to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The mentor's reply
    pub message: String,

    /// Whether the upstream call succeeded
    pub success: bool,

    /// Failure reason when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// RFC 3339 timestamp
    pub timestamp: String,

    /// Short description of what the conversation is about
    #[serde(default)]
    pub context: String,

    /// Follow-up prompts the candidate can click
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ChatResponse {
    /// A failed response carrying a user-facing message and the reason
    pub fn failure(message: impl Into<String>, error: impl Into<String>, timestamp: String) -> Self {
        Self {
            message: message.into(),
            success: false,
            error: Some(error.into()),
            timestamp,
            context: String::new(),
            suggestions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&ChatRole::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&ChatRole::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn test_speaker_labels() {
        assert_eq!(ChatRole::User.speaker(), "User");
        assert_eq!(ChatRole::Assistant.speaker(), "Mentor");
    }

    #[test]
    fn test_message_without_timestamp() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role": "assistant", "content": "hi"}"#).unwrap();
        assert_eq!(msg.role, ChatRole::Assistant);
        assert_eq!(msg.timestamp, "");
    }

    #[test]
    fn test_failure_response() {
        let resp = ChatResponse::failure("try later", "timeout", "2024-01-01T00:00:00Z".to_string());
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("timeout"));
        assert!(resp.suggestions.is_empty());
    }
}
