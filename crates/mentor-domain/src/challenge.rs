//! Challenge module - the exercise a candidate is working on

use serde::{Deserialize, Serialize};

/// A coding challenge.
///
/// Only the title is needed to frame prompts; the description is carried
/// for richer context when the caller has it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Stable identifier (e.g., "two-sum")
    pub id: String,

    /// Display title
    pub title: String,

    /// Optional problem statement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Challenge {
    /// Create a challenge with an id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
        }
    }

    /// Attach a problem statement
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_builder() {
        let c = Challenge::new("two-sum", "Two Sum").with_description("Find two numbers");
        assert_eq!(c.id, "two-sum");
        assert_eq!(c.title, "Two Sum");
        assert_eq!(c.description.as_deref(), Some("Find two numbers"));
    }

    #[test]
    fn test_description_is_optional_on_the_wire() {
        let c: Challenge = serde_json::from_str(r#"{"id": "a", "title": "A"}"#).unwrap();
        assert!(c.description.is_none());
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("description"));
    }
}
