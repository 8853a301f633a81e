//! Integration tests for the AiService

#[cfg(test)]
mod tests {
    use crate::{AiService, ServiceConfig, ServiceError};
    use async_trait::async_trait;
    use mentor_domain::{ChatMessage, ChatRole, Challenge, IssueKind, LlmProvider};
    use mentor_extractor::{default_interview_questions, CHAT_CONTINUATION, HINT_CONTINUATION};
    use mentor_llm::{LlmError, MockProvider};
    use std::time::Duration;

    const REVIEW_REPLY: &str = r#"```json
{"overall_score": 72, "issues": [{"type": "bug", "severity": "high", "line_number": 3, "description": "nil map write", "solution": "make the map"}], "suggestions": [], "interviewer_feedback": "Solid start.", "follow_up_questions": ["What about duplicates?"], "complexity": {"time_complexity": "O(n)", "space_complexity": "O(n)", "can_optimize": false, "optimized_approach": ""}, "readability_score": 80, "test_coverage": "none"}
```"#;

    fn two_sum() -> Challenge {
        Challenge::new("two-sum", "Two Sum")
    }

    fn service(llm: MockProvider) -> AiService<MockProvider> {
        AiService::new(llm, ServiceConfig::default())
    }

    /// Never answers within any sane timeout
    struct StalledProvider;

    #[async_trait]
    impl LlmProvider for StalledProvider {
        type Error = LlmError;

        fn name(&self) -> &'static str {
            "stalled"
        }

        fn model(&self) -> &str {
            "stalled"
        }

        async fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }

        async fn generate_json(&self, prompt: &str) -> Result<String, Self::Error> {
            self.generate(prompt).await
        }
    }

    #[tokio::test]
    async fn test_review_flow() {
        let llm = MockProvider::new(REVIEW_REPLY);
        let service = service(llm.clone());

        let review = service.review_code("func twoSum() {}", &two_sum(), "arrays").await;

        assert_eq!(review.overall_score, 72);
        assert_eq!(review.issues.len(), 1);
        assert_eq!(review.issues[0].kind, IssueKind::Bug);
        assert_eq!(review.interviewer_feedback, "Solid start.");
        assert_eq!(llm.call_count(), 1);
        assert!(llm.prompts()[0].contains("CHALLENGE: Two Sum"));
    }

    #[tokio::test]
    async fn test_review_with_garbage_reply_falls_back() {
        let service = service(MockProvider::new("I cannot review this."));
        let review = service.review_code("x", &two_sum(), "").await;

        assert_eq!(review.overall_score, 50);
        assert_eq!(review.issues[0].kind, IssueKind::Parsing);
    }

    #[tokio::test]
    async fn test_review_without_api_key() {
        let llm = MockProvider::unconfigured();
        let service = service(llm.clone());

        let review = service.review_code("x", &two_sum(), "").await;

        assert_eq!(review.overall_score, 0);
        assert_eq!(review.readability_score, 0);
        assert!(review.interviewer_feedback.contains("requires an API key"));
        assert_eq!(review.test_coverage, "API key required for AI analysis");
        assert_eq!(llm.call_count(), 0, "no provider call without a key");
    }

    #[tokio::test]
    async fn test_review_provider_error() {
        let llm = MockProvider::default();
        let service = service(llm.clone());
        let challenge = two_sum();

        let mut handle = llm.clone();
        handle.add_error(service.review_prompt("x", &challenge, "ctx"));

        let review = service.review_code("x", &challenge, "ctx").await;
        assert_eq!(review.overall_score, 0);
        assert!(review.interviewer_feedback.contains("temporarily unavailable"));
        assert_eq!(review.follow_up_questions, vec!["Would you like to try again?"]);
        assert_eq!(review.complexity.time_complexity, "N/A");
    }

    #[tokio::test(start_paused = true)]
    async fn test_review_times_out() {
        let config = ServiceConfig {
            request_timeout_secs: 5,
            ..ServiceConfig::default()
        };
        let service = AiService::new(StalledProvider, config);

        let review = service.review_code("x", &two_sum(), "").await;
        assert_eq!(review.overall_score, 0);
        assert!(review.interviewer_feedback.contains("No response within 5s"));
    }

    #[tokio::test]
    async fn test_questions_flow() {
        let service = service(MockProvider::new(r#"Sure: ["Why a map?", "Edge cases?", "Complexity?"]"#));
        let questions = service.interviewer_questions("x", &two_sum(), "done").await;
        assert_eq!(questions, vec!["Why a map?", "Edge cases?", "Complexity?"]);
    }

    #[tokio::test]
    async fn test_questions_fallback_and_missing_key() {
        let service_a = service(MockProvider::new("no array"));
        assert_eq!(
            service_a.interviewer_questions("x", &two_sum(), "").await,
            default_interview_questions()
        );

        let service_b = service(MockProvider::unconfigured());
        let questions = service_b.interviewer_questions("x", &two_sum(), "").await;
        assert_eq!(questions.len(), 1);
        assert!(questions[0].contains("MOCK_API_KEY"));
    }

    #[tokio::test]
    async fn test_hint_flow() {
        let llm = MockProvider::new("```\nTry a hash map keyed by value.\n```");
        let service = service(llm.clone());

        let hint = service.code_hint("x", &two_sum(), 2, "").await.unwrap();
        assert_eq!(hint, "Try a hash map keyed by value.");
        assert!(llm.prompts()[0].contains("(level 2/4)"));
    }

    #[tokio::test]
    async fn test_hint_empty_reply_uses_continuation() {
        let service = service(MockProvider::new("   "));
        let hint = service.code_hint("x", &two_sum(), 1, "").await.unwrap();
        assert_eq!(hint, HINT_CONTINUATION);
    }

    #[tokio::test]
    async fn test_hint_level_out_of_range() {
        let llm = MockProvider::default();
        let service = service(llm.clone());

        for level in [0, 5, 255] {
            let result = service.code_hint("x", &two_sum(), level, "").await;
            assert!(matches!(result, Err(ServiceError::InvalidHintLevel(l)) if l == level));
        }
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_flow() {
        let llm = MockProvider::new("Slices share their backing array.");
        let service = service(llm.clone());
        let challenge = two_sum();
        let history: Vec<ChatMessage> = (0..7)
            .map(|i| ChatMessage::new(ChatRole::User, format!("turn-{i}")))
            .collect();

        let response = service
            .chat_with_mentor("Can you explain slices?", Some(&challenge), &history, "")
            .await;

        assert!(response.success);
        assert!(response.error.is_none());
        assert_eq!(response.message, "Slices share their backing array.");
        assert_eq!(response.context, "Working on: Two Sum");
        assert_eq!(
            response.suggestions,
            vec!["Can you show me an example?", "How would I implement this?"]
        );
        assert!(chrono::DateTime::parse_from_rfc3339(&response.timestamp).is_ok());

        let prompt = &llm.prompts()[0];
        assert!(!prompt.contains("turn-1\n"));
        assert!(prompt.contains("turn-2"));
        assert!(prompt.contains("turn-6"));
    }

    #[tokio::test]
    async fn test_chat_empty_reply() {
        let service = service(MockProvider::new(""));
        let response = service.chat_with_mentor("hello", None, &[], "").await;
        assert!(response.success);
        assert_eq!(response.message, CHAT_CONTINUATION);
        assert_eq!(response.context, "General Go programming discussion");
        assert_eq!(response.suggestions.len(), 3);
    }

    #[tokio::test]
    async fn test_chat_failures() {
        let response = service(MockProvider::unconfigured())
            .chat_with_mentor("hello", None, &[], "")
            .await;
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("API key not configured"));

        let mut llm = MockProvider::default();
        let service = service(llm.clone());
        let prompt = crate::PromptBuilder::new("Go", "").chat("hello", &[], 5);
        llm.add_error(prompt);

        let response = service.chat_with_mentor("hello", None, &[], "").await;
        assert!(!response.success);
        assert!(response.message.contains("trouble connecting"));
        assert!(response.error.unwrap().contains("Mock error"));
    }

    #[tokio::test]
    async fn test_raw_review_reply() {
        let llm = MockProvider::new("raw text");
        let service = service(llm.clone());
        assert_eq!(
            service.raw_review_reply("x", &two_sum(), "").await.unwrap(),
            "raw text"
        );

        let mut handle = llm.clone();
        handle.add_error(service.review_prompt("y", &two_sum(), ""));
        let result = service.raw_review_reply("y", &two_sum(), "").await;
        assert!(matches!(result, Err(ServiceError::Llm(_))));
    }

    #[test]
    fn test_language_flows_into_prompts() {
        let config = ServiceConfig {
            language: "Rust".to_string(),
            ..ServiceConfig::default()
        };
        let service = AiService::new(MockProvider::default(), config);
        let prompt = service.review_prompt("fn main() {}", &two_sum(), "");
        assert!(prompt.contains("senior Rust interviewer"));
        assert!(prompt.contains("CODE (Rust):"));
    }
}
