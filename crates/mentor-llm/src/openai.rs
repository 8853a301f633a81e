//! OpenAI Provider Implementation
//!
//! Chat completions with a system message taken from [`LlmConfig::system_prompt`].

use crate::config::LlmConfig;
use crate::http::{decode, HttpTransport};
use crate::LlmError;
use async_trait::async_trait;
use mentor_domain::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};

const NAME: &str = "openai";

/// OpenAI chat completions provider
pub struct OpenAiProvider {
    config: LlmConfig,
    transport: HttpTransport,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let transport = HttpTransport::new(config.timeout(), config.max_retries)?;
        Ok(Self { config, transport })
    }

    fn build_request<'a>(&'a self, prompt: &str, expect_json: bool) -> ChatCompletionRequest<'a> {
        let system = self.config.system_text(expect_json);

        // json_object mode rejects prompts that do not ask for one object
        let wants_object = expect_json && prompt.to_lowercase().contains("single json object");

        ChatCompletionRequest {
            model: self.config.model(),
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            response_format: wants_object.then_some(ResponseFormat { kind: "json_object" }),
        }
    }

    async fn send(&self, prompt: &str, expect_json: bool) -> Result<String, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey(NAME))?;

        let authorization = format!("Bearer {}", api_key);
        let request = self.build_request(prompt, expect_json);
        let (status, body) = self
            .transport
            .post_json(
                self.config.base_url(),
                &[("Authorization", authorization.as_str())],
                &request,
            )
            .await?;

        extract_text(decode(status, &body)?)
    }
}

fn extract_text(response: ChatCompletionResponse) -> Result<String, LlmError> {
    if let Some(error) = response.error {
        return Err(LlmError::Api {
            provider: "OpenAI",
            message: error.message,
        });
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(LlmError::EmptyResponse("OpenAI"))
}

#[async_trait]
impl LlmProviderTrait for OpenAiProvider {
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
