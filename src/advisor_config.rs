//! Configuration for the sage advisor.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Configuration for the LLM that comments on positions.
///
/// Loaded from TOML; every field has a default, so an empty file (or no
/// file at all) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Whether to consult the advisor at all.
    #[serde(default = "default_enabled")]
    enabled: bool,

    /// LLM provider (gemini, openai or anthropic).
    #[serde(default = "default_provider")]
    llm_provider: LlmProvider,

    /// LLM model name. Defaults to the provider's default model.
    #[serde(default)]
    llm_model: Option<String>,

    /// Maximum tokens for LLM responses.
    #[serde(default = "default_max_tokens")]
    llm_max_tokens: u32,

    /// Seconds to wait for commentary before giving up.
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_provider() -> LlmProvider {
    LlmProvider::Gemini
}

fn default_max_tokens() -> u32 {
    256
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            llm_provider: default_provider(),
            llm_model: None,
            llm_max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AdvisorConfig {
    /// Creates a configuration for the given provider with default settings.
    #[instrument]
    pub fn with_provider(llm_provider: LlmProvider) -> Self {
        Self {
            llm_provider,
            ..Self::default()
        }
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(provider = %config.llm_provider, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns a copy with the advisor switched off.
    pub fn disabled(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }

    /// Returns a copy using a different provider.
    pub fn override_provider(self, llm_provider: LlmProvider) -> Self {
        Self {
            llm_provider,
            ..self
        }
    }

    /// Model to request, falling back to the provider default.
    pub fn model_name(&self) -> String {
        self.llm_model
            .clone()
            .unwrap_or_else(|| self.llm_provider.default_model().to_string())
    }

    /// How long to wait for commentary.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Creates LLM configuration using API keys from the process environment.
    #[instrument(skip(self), fields(provider = %self.llm_provider))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        self.create_llm_config_with(|name| std::env::var(name).ok())
    }

    /// Creates LLM configuration, resolving API keys through `lookup`.
    ///
    /// Tries each of the provider's key variables in turn; blank values
    /// count as missing.
    #[instrument(skip(self, lookup), fields(provider = %self.llm_provider))]
    pub fn create_llm_config_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<LlmConfig, ConfigError> {
        debug!("Creating LLM config");
        let vars = self.llm_provider.api_key_vars();

        let api_key = vars
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::new(format!("{} environment variable not set", vars.join(" or ")))
            })?;

        Ok(LlmConfig::new(
            self.llm_provider,
            api_key,
            self.model_name(),
            self.llm_max_tokens,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
