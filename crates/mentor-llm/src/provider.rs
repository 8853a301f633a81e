//! Provider selection
//!
//! [`AnyProvider`] wraps the closed set of hosted providers behind one type,
//! chosen from [`LlmConfig::provider`].

use crate::config::{LlmConfig, ProviderKind};
use crate::{ClaudeProvider, GeminiProvider, LlmError, OpenAiProvider};
use async_trait::async_trait;
use mentor_domain::LlmProvider as LlmProviderTrait;
use tracing::{info, warn};

/// One of the supported hosted providers
pub enum AnyProvider {
    /// Google Gemini
    Gemini(GeminiProvider),
    /// OpenAI chat completions
    OpenAi(OpenAiProvider),
    /// Anthropic Claude
    Claude(ClaudeProvider),
}

impl AnyProvider {
    /// Build the provider named by `config.provider`.
    ///
    /// A missing API key is not an error here; the provider reports itself as
    /// unconfigured and callers degrade instead of failing startup.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        if config.has_api_key() {
            info!("AI provider {} using model {}", config.provider, config.model());
        } else {
            warn!(
                "No API key for {} (set {} or {}); AI features disabled",
                config.provider,
                config.provider.api_key_var(),
                crate::config::FALLBACK_API_KEY_VAR
            );
        }

        Ok(match config.provider {
            ProviderKind::Gemini => AnyProvider::Gemini(GeminiProvider::new(config)?),
            ProviderKind::OpenAi => AnyProvider::OpenAi(OpenAiProvider::new(config)?),
            ProviderKind::Claude => AnyProvider::Claude(ClaudeProvider::new(config)?),
        })
    }

    /// Which provider this is
    pub fn kind(&self) -> ProviderKind {
        match self {
            AnyProvider::Gemini(_) => ProviderKind::Gemini,
            AnyProvider::OpenAi(_) => ProviderKind::OpenAi,
            AnyProvider::Claude(_) => ProviderKind::Claude,
        }
    }
}

#[async_trait]
impl LlmProviderTrait for AnyProvider {
    type Error = LlmError;

    fn name(&self) -> &'static str {
        match self {
            AnyProvider::Gemini(p) => p.name(),
            AnyProvider::OpenAi(p) => p.name(),
            AnyProvider::Claude(p) => p.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            AnyProvider::Gemini(p) => p.model(),
            AnyProvider::OpenAi(p) => p.model(),
            AnyProvider::Claude(p) => p.model(),
        }
    }

    fn is_configured(&self) -> bool {
        match self {
            AnyProvider::Gemini(p) => p.is_configured(),
            AnyProvider::OpenAi(p) => p.is_configured(),
            AnyProvider::Claude(p) => p.is_configured(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            AnyProvider::Gemini(p) => p.generate(prompt).await,
            AnyProvider::OpenAi(p) => p.generate(prompt).await,
            AnyProvider::Claude(p) => p.generate(prompt).await,
        }
    }

    async fn generate_json(&self, prompt: &str) -> Result<String, Self::Error> {
        match self {
            AnyProvider::Gemini(p) => p.generate_json(prompt).await,
            AnyProvider::OpenAi(p) => p.generate_json(prompt).await,
            AnyProvider::Claude(p) => p.generate_json(prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_configured_provider() {
        for kind in [ProviderKind::Gemini, ProviderKind::OpenAi, ProviderKind::Claude] {
            let provider = AnyProvider::from_config(LlmConfig::for_provider(kind).with_api_key("k")).unwrap();
            assert_eq!(provider.kind(), kind);
            assert_eq!(provider.name(), kind.as_str());
            assert_eq!(provider.model(), kind.default_model());
            assert!(provider.is_configured());
        }
    }

    #[test]
    fn test_model_override() {
        let config = LlmConfig::for_provider(ProviderKind::OpenAi).with_model("gpt-4o");
        let provider = AnyProvider::from_config(config).unwrap();
        assert_eq!(provider.model(), "gpt-4o");
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_errors() {
        let provider = AnyProvider::from_config(LlmConfig::for_provider(ProviderKind::Claude)).unwrap();
        let result = provider.generate_json("prompt").await;
        assert!(matches!(result, Err(LlmError::MissingApiKey("claude"))));
    }
}
