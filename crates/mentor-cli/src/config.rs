//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use mentor_llm::{LlmConfig, ProviderKind};
use mentor_service::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// CLI configuration.
///
/// ```toml
/// [llm]
/// provider = "openai"
/// model = "gpt-4o"
///
/// [service]
/// language = "Go"
///
/// [settings]
/// format = "text"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Provider settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// Human-readable text
    Text,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".mentor").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used when
    /// present; otherwise provider settings come from the environment. API keys
    /// missing from the file are always looked up in the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::path().ok().filter(|p| p.exists()),
        };

        let mut config = match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self {
                llm: LlmConfig::from_env(),
                ..Self::default()
            },
        };

        config.llm.fill_api_key_from_env();
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Apply command-line overrides.
    ///
    /// Switching provider drops the key and endpoint of the previous one.
    pub fn apply_overrides(&mut self, provider: Option<&str>, model: Option<&str>) -> Result<()> {
        if let Some(name) = provider {
            let kind = ProviderKind::parse(name)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown provider '{}'", name)))?;
            if kind != self.llm.provider {
                self.llm.provider = kind;
                self.llm.api_key = None;
                self.llm.base_url = None;
                self.llm.model = None;
                self.llm.fill_api_key_from_env();
            }
        }

        if let Some(model) = model {
            self.llm.model = Some(model.to_string());
        }

        Ok(())
    }

    /// Validate provider and service settings.
    pub fn validate(&self) -> Result<()> {
        self.llm.validate()?;
        self.service.validate()?;
        if self.cuts_off_retries() {
            warn!(
                "request_timeout_secs ({}) is shorter than {}s of provider retries; later attempts will never run",
                self.service.request_timeout_secs,
                self.llm.max_call_duration().as_secs()
            );
        }
        Ok(())
    }

    /// Whether the service timeout fires before the provider has used all its attempts
    pub fn cuts_off_retries(&self) -> bool {
        self.service.request_timeout() < self.llm.max_call_duration()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Json,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Json
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.llm.provider, ProviderKind::Gemini);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[llm]\nprovider = \"openai\"\napi_key = \"sk-file\"\nmodel = \"gpt-4o\"\n\n[service]\nlanguage = \"Rust\"\n\n[settings]\nformat = \"text\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.llm.provider, ProviderKind::OpenAi);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.llm.model(), "gpt-4o");
        assert_eq!(config.service.language, "Rust");
        assert_eq!(config.settings.format, OutputFormat::Text);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/mentor.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_model_override() {
        let mut config = Config::default();
        config.apply_overrides(None, Some("gemini-2.0-pro")).unwrap();
        assert_eq!(config.llm.model(), "gemini-2.0-pro");
    }

    #[test]
    fn test_provider_override_resets_provider_settings() {
        let mut config = Config::default();
        config.llm.api_key = Some("gemini-key".to_string());
        config.llm.model = Some("gemini-x".to_string());

        config.apply_overrides(Some("Claude"), None).unwrap();
        assert_eq!(config.llm.provider, ProviderKind::Claude);
        assert_ne!(config.llm.api_key.as_deref(), Some("gemini-key"));
        assert_eq!(config.llm.model(), "claude-3-sonnet-20240229");
    }

    #[test]
    fn test_unknown_provider() {
        let mut config = Config::default();
        let result = config.apply_overrides(Some("llama"), None);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_default_timeout_covers_every_retry() {
        let config = Config::default();
        assert!(!config.cuts_off_retries());

        let mut config = Config::default();
        config.service.request_timeout_secs = 60;
        assert!(config.cuts_off_retries());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_service_config() {
        let mut config = Config::default();
        config.service.request_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(CliError::Service(_))));
    }
}
