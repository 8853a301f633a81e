//! Follow-up suggestions and context labels attached to chat replies

use mentor_domain::Challenge;

/// Keyword groups: any keyword in the student's message adds the suggestions
const KEYWORD_SUGGESTIONS: &[(&[&str], &[&str])] = &[
    (
        &["explain", "what"],
        &["Can you show me an example?", "How would I implement this?"],
    ),
    (
        &["error", "problem"],
        &["How can I debug this?", "What's the best practice here?"],
    ),
    (
        &["optimize", "performance"],
        &["What's the time complexity?", "Are there other approaches?"],
    ),
];

const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Can you explain this more?",
    "Show me best practices",
    "Help with the current challenge",
];

/// Suggestions the student might ask next, at most `max`
pub fn follow_up_suggestions(message: &str, max: usize) -> Vec<String> {
    let lower = message.to_lowercase();

    let mut suggestions: Vec<&str> = KEYWORD_SUGGESTIONS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .flat_map(|(_, texts)| texts.iter().copied())
        .collect();

    if suggestions.is_empty() {
        suggestions = DEFAULT_SUGGESTIONS.to_vec();
    }

    suggestions.into_iter().take(max).map(str::to_string).collect()
}

/// Human-readable description of what the student is doing
pub fn context_description(challenge: Option<&Challenge>, language: &str) -> String {
    match challenge {
        Some(c) => format!("Working on: {}", c.title),
        None => format!("General {} programming discussion", language),
    }
}
