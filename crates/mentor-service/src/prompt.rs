//! LLM prompt engineering for reviews, questions, hints and chat

use crate::error::ServiceError;
use mentor_domain::{ChatMessage, Challenge};
use std::fmt::Write;

/// How much a hint may give away
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HintLevel {
    /// A subtle nudge
    Nudge = 1,
    /// A direct hint about the approach
    Approach = 2,
    /// A concrete implementation suggestion
    Implementation = 3,
    /// A detailed explanation with partial code
    Walkthrough = 4,
}

impl HintLevel {
    /// Numeric level, 1 through 4
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Wording used in the hint prompt
    pub fn description(self) -> &'static str {
        match self {
            HintLevel::Nudge => "a subtle nudge in the right direction",
            HintLevel::Approach => "a more direct hint about the approach",
            HintLevel::Implementation => "a specific suggestion about implementation",
            HintLevel::Walkthrough => "a detailed explanation with partial code example",
        }
    }
}

impl TryFrom<u8> for HintLevel {
    type Error = ServiceError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(HintLevel::Nudge),
            2 => Ok(HintLevel::Approach),
            3 => Ok(HintLevel::Implementation),
            4 => Ok(HintLevel::Walkthrough),
            other => Err(ServiceError::InvalidHintLevel(other)),
        }
    }
}

/// Builds prompts for one piece of candidate code
pub struct PromptBuilder<'a> {
    language: &'a str,
    code: &'a str,
    challenge: Option<&'a Challenge>,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder for `code` written in `language`
    pub fn new(language: &'a str, code: &'a str) -> Self {
        Self {
            language,
            code,
            challenge: None,
        }
    }

    /// Set the challenge the code answers
    pub fn with_challenge(mut self, challenge: &'a Challenge) -> Self {
        self.challenge = Some(challenge);
        self
    }

    fn challenge_title(&self) -> &str {
        self.challenge.map(|c| c.title.as_str()).unwrap_or_default()
    }

    /// Code review prompt: one JSON object following [`REVIEW_SCHEMA`]
    pub fn review(&self, context: &str) -> String {
        let lang = self.language;
        format!(
            "You are a senior {lang} interviewer. Respond ONLY with a single JSON object. \
             Do NOT include markdown or code fences. All numeric fields must be JSON numbers, not strings.\n\n\
             SCHEMA:\n{REVIEW_SCHEMA}\n\n\
             CHALLENGE: {title}\n\
             CONTEXT: {context}\n\n\
             CODE ({lang}):\nBEGIN_CODE\n{code}\nEND_CODE\n\n\
             Focus on: (1) correctness and edge cases, (2) {lang} idioms, (3) performance, \
             (4) readability, (5) interviewer follow-ups.",
            title = self.challenge_title(),
            code = self.code,
        )
    }

    /// Interviewer follow-up questions prompt: a JSON array of strings
    pub fn questions(&self, progress: &str) -> String {
        let lang = self.language;
        format!(
            "You are a technical interviewer. Respond ONLY with a JSON array of strings. \
             No markdown, no prose outside the array.\n\n\
             CHALLENGE: {title}\n\
             USER PROGRESS: {progress}\n\n\
             CODE ({lang}):\nBEGIN_CODE\n{code}\nEND_CODE\n\n\
             Generate 3-5 follow-up questions that probe: deeper understanding, edge cases, \
             optimizations, {lang}-specific concepts, and trade-offs.",
            title = self.challenge_title(),
            code = self.code,
        )
    }

    /// Hint prompt: plain text. A non-empty `context` replaces the challenge title.
    pub fn hint(&self, level: HintLevel, context: &str) -> String {
        let challenge_info = if context.is_empty() {
            self.challenge_title()
        } else {
            context
        };

        format!(
            "You are a helpful coding mentor. Return only the hint text as plain text. \
             No JSON, no code fences.\n\n\
             CHALLENGE CONTEXT: {challenge_info}\n\
             CURRENT CODE:\n{code}\n\n\
             Provide {description} (level {number}/4). Be encouraging and educational, \
             not just giving the answer.\n\n\
             Important: Use the CHALLENGE CONTEXT above to understand what specific challenge \
             the student is working on. If it mentions a specific framework (like Gin, GORM, Cobra), \
             provide hints specific to that framework.\n\n\
             Return only the hint text.",
            code = self.code,
            description = level.description(),
            number = level.number(),
        )
    }

    /// Mentor chat prompt.
    ///
    /// Only the last `history_window` messages of `history` are included. The
    /// instructions change depending on whether any code is visible.
    pub fn chat(&self, message: &str, history: &[ChatMessage], history_window: usize) -> String {
        let lang = self.language;
        let mut context = String::new();

        if let Some(challenge) = self.challenge {
            let _ = write!(context, "Current Challenge: {}", challenge.title);
        }

        let has_code = !self.code.trim().is_empty();
        if has_code {
            let _ = write!(
                context,
                "\nUser's Current Code:\n```{}\n{}\n```",
                lang.to_lowercase(),
                self.code
            );
        }

        if !history.is_empty() {
            context.push_str("\nConversation History:\n");
            let start = history.len().saturating_sub(history_window);
            for msg in &history[start..] {
                let _ = writeln!(context, "{}: {}", msg.role.speaker(), msg.content);
            }
        }

        let code_awareness = if has_code {
            CODE_VISIBLE_INSTRUCTIONS
        } else {
            NO_CODE_INSTRUCTIONS
        };

        format!(
            "You are a friendly and knowledgeable {lang} programming mentor. You're helping a student \
             learn {lang} through hands-on coding challenges.\n\n\
             CONTEXT:\n{context}\n\n\
             STUDENT'S QUESTION: {message}\n\n\
             INSTRUCTIONS:\n\
             - Be encouraging and supportive\n\
             - Give clear, practical explanations with examples when helpful\n\
             - If discussing code, provide {lang} code snippets when relevant\n\
             - When showing code examples, use triple backticks with \"{fence}\" directly after (not on separate line)\n\
             - Keep responses concise but thorough (aim for 2-3 paragraphs)\n\
             - If the student is struggling, break down concepts into smaller steps\n\
             - Relate answers back to the current challenge when possible\n\
             - Use emojis sparingly and appropriately\n\
             - If asked about non-{lang}/programming topics, gently redirect to programming{code_awareness}\n\n\
             Respond naturally as a helpful mentor would in a conversation.",
            fence = lang.to_lowercase(),
        )
    }
}

/// Field-by-field shape the review reply must follow
pub const REVIEW_SCHEMA: &str = r#"{
  "overall_score": integer (0..100),
  "issues": [
    {
      "type": "bug|performance|style|logic",
      "severity": "low|medium|high|critical",
      "line_number": integer,
      "description": string,
      "solution": string
    }
  ],
  "suggestions": [
    {
      "category": "optimization|best_practice|alternative",
      "priority": "low|medium|high",
      "description": string,
      "example": string
    }
  ],
  "interviewer_feedback": string,
  "follow_up_questions": [string],
  "complexity": {
    "time_complexity": string,
    "space_complexity": string,
    "can_optimize": boolean,
    "optimized_approach": string
  },
  "readability_score": integer (0..100),
  "test_coverage": string
}"#;

const CODE_VISIBLE_INSTRUCTIONS: &str = "
- I can see the user's current code above, so refer to it directly when relevant
- Point out specific parts of their code when giving feedback
- Suggest improvements to their existing code rather than asking them to paste it";

const NO_CODE_INSTRUCTIONS: &str = "
- The user hasn't written any code yet, or I can't see their current code
- If they ask about their code, let them know I can automatically see their code in the editor, but if they prefer, they can paste it here";

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_domain::ChatRole;

    fn two_sum() -> Challenge {
        Challenge::new("two-sum", "Two Sum")
    }

    #[test]
    fn test_review_prompt_contents() {
        let challenge = two_sum();
        let prompt = PromptBuilder::new("Go", "func main() {}")
            .with_challenge(&challenge)
            .review("arrays");

        assert!(prompt.starts_with("You are a senior Go interviewer."));
        assert!(prompt.to_lowercase().contains("single json object"));
        assert!(prompt.contains("\"overall_score\": integer (0..100)"));
        assert!(prompt.contains("CHALLENGE: Two Sum"));
        assert!(prompt.contains("CONTEXT: arrays"));
        assert!(prompt.contains("BEGIN_CODE\nfunc main() {}\nEND_CODE"));
    }

    #[test]
    fn test_questions_prompt_asks_for_array() {
        let challenge = two_sum();
        let prompt = PromptBuilder::new("Go", "x := 1")
            .with_challenge(&challenge)
            .questions("halfway");

        assert!(prompt.contains("JSON array of strings"));
        assert!(prompt.contains("USER PROGRESS: halfway"));
        assert!(prompt.contains("Go-specific concepts"));
    }

    #[test]
    fn test_hint_levels() {
        assert_eq!(HintLevel::try_from(1).unwrap(), HintLevel::Nudge);
        assert_eq!(HintLevel::try_from(4).unwrap(), HintLevel::Walkthrough);
        assert!(matches!(HintLevel::try_from(0), Err(ServiceError::InvalidHintLevel(0))));
        assert!(matches!(HintLevel::try_from(5), Err(ServiceError::InvalidHintLevel(5))));
    }

    #[test]
    fn test_hint_prompt_context_overrides_title() {
        let challenge = two_sum();
        let builder = PromptBuilder::new("Go", "code").with_challenge(&challenge);

        let with_context = builder.hint(HintLevel::Approach, "Gin REST API");
        assert!(with_context.contains("CHALLENGE CONTEXT: Gin REST API"));
        assert!(with_context.contains("a more direct hint about the approach (level 2/4)"));

        let without_context = builder.hint(HintLevel::Nudge, "");
        assert!(without_context.contains("CHALLENGE CONTEXT: Two Sum"));
    }

    #[test]
    fn test_chat_prompt_keeps_last_messages() {
        let history: Vec<ChatMessage> = (0..8)
            .map(|i| {
                let role = if i % 2 == 0 { ChatRole::User } else { ChatRole::Assistant };
                ChatMessage::new(role, format!("message-{i}"))
            })
            .collect();

        let prompt = PromptBuilder::new("Go", "").chat("why?", &history, 5);
        assert!(!prompt.contains("message-2"));
        assert!(prompt.contains("Mentor: message-3"));
        assert!(prompt.contains("User: message-4"));
        assert!(prompt.contains("Mentor: message-7"));
        assert!(prompt.contains("STUDENT'S QUESTION: why?"));
    }

    #[test]
    fn test_chat_prompt_code_awareness() {
        let challenge = two_sum();
        let with_code = PromptBuilder::new("Go", "package main")
            .with_challenge(&challenge)
            .chat("help", &[], 5);
        assert!(with_code.contains("Current Challenge: Two Sum"));
        assert!(with_code.contains("```go\npackage main\n```"));
        assert!(with_code.contains("I can see the user's current code above"));

        let without_code = PromptBuilder::new("Go", "   ").chat("help", &[], 5);
        assert!(without_code.contains("hasn't written any code yet"));
        assert!(!without_code.contains("Current Challenge"));
    }
}
