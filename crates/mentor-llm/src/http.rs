//! Shared HTTP plumbing for the hosted providers
//!
//! - JSON POST with per-provider headers
//! - Retry with exponential backoff on transport errors, 429 and 5xx
//! - Body decoding that surfaces upstream error payloads

use crate::LlmError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest slice of an error body kept in an error message
const MAX_ERROR_BODY: usize = 300;

pub(crate) struct HttpTransport {
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpTransport {
    pub(crate) fn new(timeout: Duration, max_retries: u32) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_retries: max_retries.max(1),
        })
    }

    /// POST `body` as JSON and return the status with the raw response text.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &B,
    ) -> Result<(StatusCode, String), LlmError> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let mut request = self.client.post(url).json(body);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let text = response
                        .text()
                        .await
                        .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

                    if !is_retryable(status) {
                        debug!("Upstream replied HTTP {} ({} bytes)", status, text.len());
                        return Ok((status, text));
                    }

                    warn!("Upstream replied HTTP {}, attempt {}/{}", status, attempts + 1, self.max_retries);
                    last_error = Some(if status == StatusCode::TOO_MANY_REQUESTS {
                        LlmError::RateLimitExceeded
                    } else {
                        LlmError::Status {
                            status: status.as_u16(),
                            body: truncate(&text),
                        }
                    });
                }
                Err(e) => {
                    warn!("Request failed, attempt {}/{}: {}", attempts + 1, self.max_retries, e);
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Decode a provider response body.
///
/// Error payloads are JSON too, so a non-2xx body is decoded first and only
/// reported as a bare status when it does not match the provider's shape.
pub(crate) fn decode<R: DeserializeOwned>(status: StatusCode, body: &str) -> Result<R, LlmError> {
    match serde_json::from_str(body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !status.is_success() => Err(LlmError::Status {
            status: status.as_u16(),
            body: truncate(body),
        }),
        Err(e) => Err(LlmError::InvalidResponse(format!("Failed to parse response: {}", e))),
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
