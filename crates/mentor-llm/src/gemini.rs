//! Gemini Provider Implementation
//!
//! Calls Google's `models/{model}:generateContent` endpoint. JSON replies are
//! requested through `responseMimeType`.

use crate::config::LlmConfig;
use crate::http::{decode, HttpTransport};
use crate::LlmError;
use async_trait::async_trait;
use mentor_domain::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};

const NAME: &str = "gemini";

/// Google Gemini provider
pub struct GeminiProvider {
    config: LlmConfig,
    transport: HttpTransport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let transport = HttpTransport::new(config.timeout(), config.max_retries)?;
        Ok(Self { config, transport })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.config.base_url(), self.config.model())
    }

    fn build_request<'a>(&self, prompt: &'a str, expect_json: bool) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
                response_mime_type: expect_json.then_some("application/json"),
            },
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
            .post_json(&self.endpoint(), &[("x-goog-api-key", api_key)], &request)
            .await?;

        extract_text(decode(status, &body)?)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    if let Some(error) = response.error {
        return Err(LlmError::Api {
            provider: "Gemini",
            message: error.message,
        });
    }

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or(LlmError::EmptyResponse("Gemini"))
}

#[async_trait]
impl LlmProviderTrait for GeminiProvider {
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
