//! Configuration loading, validation, and management for DocChat.
//!
//! Loads configuration from `~/.docchat/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use docchat_core::language::Language;
use docchat_core::model_config::{
    MAX_OUTPUT_TOKENS_MAX, MAX_OUTPUT_TOKENS_MIN, ModelConfig, TEMPERATURE_MAX, TEMPERATURE_MIN,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.docchat/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Generation model (fixed per session, not user-selectable per request)
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, [0.0, 1.0]
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per generated response, [100, 8000]
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Response language ("en" or "am")
    #[serde(default)]
    pub language: Language,

    /// Token ceiling for the document context block
    #[serde(default = "default_context_token_ceiling")]
    pub context_token_ceiling: usize,
}

fn default_model() -> String {
    "gemini-2.5-flash".into()
}
fn default_temperature() -> f32 {
    0.3
}
fn default_max_output_tokens() -> u32 {
    2048
}
fn default_context_token_ceiling() -> usize {
    240_000
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("language", &self.language)
            .field("context_token_ceiling", &self.context_token_ceiling)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.docchat/config.toml).
    ///
    /// Also checks environment variables:
    /// - `DOCCHAT_API_KEY` (highest priority), then `GEMINI_API_KEY`
    /// - `DOCCHAT_MODEL` overrides the model
    /// - `DOCCHAT_LANGUAGE` overrides the language ("en" / "am")
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("DOCCHAT_API_KEY")
                .ok()
                .or_else(|| std::env::var("GEMINI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("DOCCHAT_MODEL") {
            config.model = model;
        }

        if let Ok(lang) = std::env::var("DOCCHAT_LANGUAGE") {
            if let Some(parsed) = Language::parse(&lang) {
                config.language = parsed;
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".docchat")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "temperature must be between {TEMPERATURE_MIN} and {TEMPERATURE_MAX}"
            )));
        }

        if !(MAX_OUTPUT_TOKENS_MIN..=MAX_OUTPUT_TOKENS_MAX).contains(&self.max_output_tokens) {
            return Err(ConfigError::ValidationError(format!(
                "max_output_tokens must be between {MAX_OUTPUT_TOKENS_MIN} and {MAX_OUTPUT_TOKENS_MAX}"
            )));
        }

        if self.context_token_ceiling == 0 {
            return Err(ConfigError::ValidationError(
                "context_token_ceiling must be nonzero".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// The generation parameters this config describes.
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig::new(self.temperature, self.max_output_tokens)
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            language: Language::default(),
            context_token_ceiling: default_context_token_ceiling(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
