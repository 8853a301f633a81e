//! Core AiService implementation

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::followup::{context_description, follow_up_suggestions};
use crate::prompt::{HintLevel, PromptBuilder};
use chrono::{SecondsFormat, Utc};
use mentor_domain::{ChatMessage, ChatResponse, Challenge, Complexity, LlmProvider, ReviewResult};
use mentor_extractor::{
    extract_plain_text, extract_plain_text_or, extract_review, extract_string_array,
    HINT_CONTINUATION,
};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

const CHAT_UNAVAILABLE: &str =
    "❌ I'm having trouble connecting right now. Please try again in a moment.";

/// Turns candidate code and questions into structured mentor output.
///
/// Every operation except [`code_hint`](Self::code_hint) always returns data:
/// a missing API key or a failed provider call becomes a user-facing message
/// instead of an error.
pub struct AiService<P>
where
    P: LlmProvider,
{
    provider: Arc<P>,
    config: ServiceConfig,
}

impl<P> AiService<P>
where
    P: LlmProvider + 'static,
{
    /// Create a new AiService
    pub fn new(provider: P, config: ServiceConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config,
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Active configuration
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn prompts<'a>(&'a self, code: &'a str) -> PromptBuilder<'a> {
        PromptBuilder::new(&self.config.language, code)
    }

    fn missing_key_message(&self, feature: &str) -> String {
        format!(
            "⚠️ {} requires an API key. Set {}_API_KEY (or AI_API_KEY) in your environment and restart.",
            feature,
            self.provider.name().to_uppercase()
        )
    }

    async fn call(&self, prompt: &str, expect_json: bool) -> Result<String, ServiceError> {
        debug!(
            "Calling {} ({}), prompt length {} chars",
            self.provider.name(),
            self.provider.model(),
            prompt.len()
        );

        let request = async {
            if expect_json {
                self.provider.generate_json(prompt).await
            } else {
                self.provider.generate(prompt).await
            }
        };

        let reply = timeout(self.config.request_timeout(), request)
            .await
            .map_err(|_| ServiceError::Timeout(self.config.request_timeout_secs))?
            .map_err(|e| ServiceError::Llm(e.to_string()))?;

        debug!("Reply length: {} chars", reply.len());
        Ok(reply)
    }

    /// Review `code` written for `challenge`.
    pub async fn review_code(&self, code: &str, challenge: &Challenge, context: &str) -> ReviewResult {
        if !self.provider.is_configured() {
            warn!("Code review requested without an API key");
            return self.api_key_required_review();
        }

        info!("Reviewing {} chars of code for '{}'", code.len(), challenge.title);

        let prompt = self.prompts(code).with_challenge(challenge).review(context);
        match self.call(&prompt, true).await {
            Ok(reply) => extract_review(&reply),
            Err(e) => {
                warn!("Code review failed: {}", e);
                unavailable_review(&e)
            }
        }
    }

    /// Follow-up questions an interviewer could ask about `code`.
    pub async fn interviewer_questions(
        &self,
        code: &str,
        challenge: &Challenge,
        progress: &str,
    ) -> Vec<String> {
        if !self.provider.is_configured() {
            return vec![self.missing_key_message("AI features")];
        }

        let prompt = self.prompts(code).with_challenge(challenge).questions(progress);
        match self.call(&prompt, true).await {
            Ok(reply) => extract_string_array(&reply),
            Err(e) => {
                warn!("Question generation failed: {}", e);
                vec![format!("❌ AI service unavailable: {}", e)]
            }
        }
    }

    /// A hint for `code` at the given level (1 to 4).
    ///
    /// A non-empty `context` replaces the challenge title in the prompt.
    pub async fn code_hint(
        &self,
        code: &str,
        challenge: &Challenge,
        level: u8,
        context: &str,
    ) -> Result<String, ServiceError> {
        let level = HintLevel::try_from(level)?;

        if !self.provider.is_configured() {
            return Ok(self.missing_key_message("AI features"));
        }

        let prompt = self.prompts(code).with_challenge(challenge).hint(level, context);
        match self.call(&prompt, false).await {
            Ok(reply) => Ok(extract_plain_text_or(&reply, HINT_CONTINUATION)),
            Err(e) => {
                warn!("Hint generation failed: {}", e);
                Ok(format!("❌ AI service unavailable: {}", e))
            }
        }
    }

    /// Answer a student's chat message.
    ///
    /// `code` is the editor contents, possibly empty.
    pub async fn chat_with_mentor(
        &self,
        message: &str,
        challenge: Option<&Challenge>,
        history: &[ChatMessage],
        code: &str,
    ) -> ChatResponse {
        if !self.provider.is_configured() {
            return ChatResponse::failure(
                self.missing_key_message("AI chat"),
                "API key not configured",
                timestamp(),
            );
        }

        let mut builder = self.prompts(code);
        if let Some(challenge) = challenge {
            builder = builder.with_challenge(challenge);
        }
        let prompt = builder.chat(message, history, self.config.history_window);

        match self.call(&prompt, false).await {
            Ok(reply) => ChatResponse {
                message: extract_plain_text(&reply),
                success: true,
                error: None,
                timestamp: timestamp(),
                context: context_description(challenge, &self.config.language),
                suggestions: follow_up_suggestions(message, self.config.max_chat_suggestions),
            },
            Err(e) => {
                warn!("Chat failed: {}", e);
                ChatResponse::failure(CHAT_UNAVAILABLE, e.to_string(), timestamp())
            }
        }
    }

    /// The review prompt that [`review_code`](Self::review_code) would send
    pub fn review_prompt(&self, code: &str, challenge: &Challenge, context: &str) -> String {
        self.prompts(code).with_challenge(challenge).review(context)
    }

    /// Send the review prompt and return the reply without extraction
    pub async fn raw_review_reply(
        &self,
        code: &str,
        challenge: &Challenge,
        context: &str,
    ) -> Result<String, ServiceError> {
        let prompt = self.review_prompt(code, challenge, context);
        self.call(&prompt, true).await
    }

    fn api_key_required_review(&self) -> ReviewResult {
        ReviewResult {
            overall_score: 0,
            issues: Vec::new(),
            suggestions: Vec::new(),
            interviewer_feedback: self.missing_key_message("AI code review"),
            follow_up_questions: vec!["Would you like to set up AI code review?".to_string()],
            complexity: Complexity {
                time_complexity: "N/A".to_string(),
                space_complexity: "N/A".to_string(),
                can_optimize: false,
                optimized_approach: "Set up your API key first".to_string(),
            },
            readability_score: 0,
            test_coverage: "API key required for AI analysis".to_string(),
        }
    }
}

fn unavailable_review(error: &ServiceError) -> ReviewResult {
    ReviewResult {
        overall_score: 0,
        issues: Vec::new(),
        suggestions: Vec::new(),
        interviewer_feedback: format!(
            "❌ AI service temporarily unavailable: {}. Please try again later.",
            error
        ),
        follow_up_questions: vec!["Would you like to try again?".to_string()],
        complexity: Complexity {
            time_complexity: "N/A".to_string(),
            space_complexity: "N/A".to_string(),
            can_optimize: false,
            optimized_approach: "API service temporarily unavailable".to_string(),
        },
        readability_score: 0,
        test_coverage: "AI service unavailable".to_string(),
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
