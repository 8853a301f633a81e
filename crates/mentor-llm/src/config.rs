//! Provider configuration
//!
//! Built once at startup, from environment variables or a TOML file, and
//! handed to [`AnyProvider::from_config`](crate::AnyProvider::from_config).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Upstream LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini
    #[default]
    Gemini,
    /// OpenAI chat completions
    OpenAi,
    /// Anthropic messages
    Claude,
}

impl ProviderKind {
    /// Get the provider name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Claude => "claude",
        }
    }

    /// Parse a provider from a string, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Some(ProviderKind::Gemini),
            "openai" => Some(ProviderKind::OpenAi),
            "claude" | "anthropic" => Some(ProviderKind::Claude),
            _ => None,
        }
    }

    /// Environment variable holding this provider's key
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Claude => "CLAUDE_API_KEY",
        }
    }

    /// Endpoint used when none is configured
    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta/models",
            ProviderKind::OpenAi => "https://api.openai.com/v1/chat/completions",
            ProviderKind::Claude => "https://api.anthropic.com/v1/messages",
        }
    }

    /// Model used when none is configured
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.5-flash",
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Claude => "claude-3-sonnet-20240229",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic key variable consulted when the provider-specific one is unset
pub const FALLBACK_API_KEY_VAR: &str = "AI_API_KEY";

/// Appended to the system text when the caller wants JSON back
pub(crate) const STRICT_JSON_INSTRUCTION: &str = "Respond ONLY with strict JSON. No markdown.";

/// Configuration for an LLM provider
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which upstream API to call
    pub provider: ProviderKind,

    /// API key; `None` disables AI features without failing startup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model override (provider default when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Endpoint override (provider default when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Maximum tokens in a reply
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,

    /// System persona sent to providers that accept one
    pub system_prompt: String,

    /// Per-request HTTP timeout (seconds)
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            api_key: None,
            model: None,
            base_url: None,
            max_tokens: 4000,
            temperature: 0.3,
            system_prompt: "You are a senior Go interviewer.".to_string(),
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

// The API key never appears in logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("system_prompt", &self.system_prompt)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl LlmConfig {
    /// Default configuration for a provider
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Build from process environment variables.
    ///
    /// - `AI_PROVIDER`: gemini | openai | claude (unknown or unset: gemini)
    /// - `GEMINI_API_KEY` / `OPENAI_API_KEY` / `CLAUDE_API_KEY`, then `AI_API_KEY`
    /// - `AI_MODEL`, `AI_BASE_URL`: optional overrides
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let provider = get("AI_PROVIDER")
            .and_then(|p| ProviderKind::parse(&p))
            .unwrap_or_default();

        Self {
            provider,
            api_key: get(provider.api_key_var()).or_else(|| get(FALLBACK_API_KEY_VAR)),
            model: get("AI_MODEL"),
            base_url: get("AI_BASE_URL"),
            ..Self::default()
        }
    }

    /// Fill a missing API key from the environment
    pub fn fill_api_key_from_env(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var(self.provider.api_key_var())
                .or_else(|_| std::env::var(FALLBACK_API_KEY_VAR))
                .ok()
                .filter(|k| !k.trim().is_empty());
        }
    }

    /// System text for one request, with the strict-JSON instruction in JSON mode
    pub fn system_text(&self, expect_json: bool) -> String {
        if expect_json {
            format!("{} {}", self.system_prompt, STRICT_JSON_INSTRUCTION)
        } else {
            self.system_prompt.clone()
        }
    }

    /// Resolved model name
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Resolved endpoint, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
            .trim_end_matches('/')
    }

    /// Whether an API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Longest one call can take: every attempt timing out, plus the backoff between them
    pub fn max_call_duration(&self) -> Duration {
        let backoff_secs = 2u64.saturating_pow(self.max_retries.saturating_sub(1)).saturating_sub(1);
        self.timeout() * self.max_retries + Duration::from_secs(backoff_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid("max_tokens must be greater than 0".to_string()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature {} out of range [0.0, 2.0]",
                self.temperature
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(ConfigError::Invalid("max_retries must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: LlmConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = LlmConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.model(), "gemini-2.5-flash");
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_max_call_duration_counts_retries_and_backoff() {
        let config = LlmConfig::default();
        // 3 x 30s attempts, then 1s + 2s of backoff
        assert_eq!(config.max_call_duration(), Duration::from_secs(93));

        let config = LlmConfig {
            timeout_secs: 10,
            max_retries: 1,
            ..LlmConfig::default()
        };
        assert_eq!(config.max_call_duration(), Duration::from_secs(10));
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(ProviderKind::parse("OpenAI"), Some(ProviderKind::OpenAi));
        assert_eq!(ProviderKind::parse(" claude "), Some(ProviderKind::Claude));
        assert_eq!(ProviderKind::parse("gemini"), Some(ProviderKind::Gemini));
        assert_eq!(ProviderKind::parse("llama"), None);
    }

    #[test]
    fn test_from_lookup_provider_specific_key() {
        let config = LlmConfig::from_lookup(lookup(&[
            ("AI_PROVIDER", "openai"),
            ("OPENAI_API_KEY", "sk-test"),
            ("AI_API_KEY", "generic"),
        ]));
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.base_url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_from_lookup_generic_key_fallback() {
        let config = LlmConfig::from_lookup(lookup(&[
            ("AI_PROVIDER", "claude"),
            ("GEMINI_API_KEY", "wrong-provider"),
            ("AI_API_KEY", "generic"),
            ("AI_MODEL", "claude-3-haiku"),
        ]));
        assert_eq!(config.provider, ProviderKind::Claude);
        assert_eq!(config.api_key.as_deref(), Some("generic"));
        assert_eq!(config.model(), "claude-3-haiku");
    }

    #[test]
    fn test_from_lookup_unknown_provider_defaults_to_gemini() {
        let config = LlmConfig::from_lookup(lookup(&[("AI_PROVIDER", "mystery"), ("AI_API_KEY", "")]));
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = LlmConfig::default().with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_invalid_values() {
        let mut config = LlmConfig::default();
        config.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = LlmConfig::default();
        config.temperature = 3.5;
        assert!(config.validate().is_err());

        let mut config = LlmConfig::default();
        config.max_retries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = LlmConfig::default().with_api_key("super-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LlmConfig::for_provider(ProviderKind::Claude).with_model("claude-3-opus");
        let toml_str = config.to_toml().unwrap();
        let parsed = LlmConfig::from_toml(&toml_str).unwrap();

        assert_eq!(parsed.provider, ProviderKind::Claude);
        assert_eq!(parsed.model(), "claude-3-opus");
        assert_eq!(parsed.max_tokens, config.max_tokens);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "provider = \"openai\"\napi_key = \"sk-file\"\ntimeout_secs = 10").unwrap();

        let config = LlmConfig::from_file(file.path()).unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAi);
        assert_eq!(config.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(matches!(
            LlmConfig::from_toml("timeout_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            LlmConfig::from_toml("provider = 12"),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
