//! Claude Provider Implementation
//!
//! Anthropic messages API. The system prompt travels in the top-level
//! `system` field rather than as a message.

use crate::config::LlmConfig;
use crate::http::{decode, HttpTransport};
use crate::LlmError;
use async_trait::async_trait;
use mentor_domain::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};

const NAME: &str = "claude";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic Claude provider
pub struct ClaudeProvider {
    config: LlmConfig,
    transport: HttpTransport,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    system: String,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentBlock<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl ClaudeProvider {
    /// Create a new Claude provider
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let transport = HttpTransport::new(config.timeout(), config.max_retries)?;
        Ok(Self { config, transport })
    }

    fn build_request<'a>(&'a self, prompt: &'a str, expect_json: bool) -> MessagesRequest<'a> {
        MessagesRequest {
            model: self.config.model(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system: self.config.system_text(expect_json),
            messages: vec![Message {
                role: "user",
                content: vec![ContentBlock {
                    kind: "text",
                    text: prompt,
                }],
            }],
        }
    }

    async fn send(&self, prompt: &str, expect_json: bool) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey(NAME))?;

        let request = self.build_request(prompt, expect_json);
        let (status, body) = self
            .transport
            .post_json(
                self.config.base_url(),
                &[("x-api-key", api_key), ("anthropic-version", ANTHROPIC_VERSION)],
                &request,
            )
            .await?;

        extract_text(decode(status, &body)?)
    }
}

fn extract_text(response: MessagesResponse) -> Result<String, LlmError> {
    if let Some(error) = response.error {
        return Err(LlmError::Api {
            provider: "Claude",
            message: error.message,
        });
    }

    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .ok_or(LlmError::EmptyResponse("Claude"))
}

#[async_trait]
impl LlmProviderTrait for ClaudeProvider {
    type Error = LlmError;

    fn name(&self) -> &'static str {
        NAME
    }

    fn model(&self) -> &str {
        self.config.model()
    }

    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.send(prompt, false).await
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, Self::Error> {
        self.send(prompt, true).await
    }
}
