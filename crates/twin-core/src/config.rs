//! Configuration
//!
//! Loaded from TOML; every section is optional and falls back to defaults.
//! The API key itself is never part of the configuration, only the name of
//! the environment variable that holds it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use twin_contract::ValidationLimits;
use twin_layout::LayoutConfig;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values are inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// External model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier
    pub model_name: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// API root
    pub base_url: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: "gemini-2.5-flash".to_string(),
            temperature: 0.8,
            api_key_env: "GOOGLE_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwinConfig {
    pub model: ModelConfig,
    /// Upper bound on one model call
    pub request_timeout_secs: u64,
    pub validation: ValidationLimits,
    pub layout: LayoutConfig,
}

impl Default for TwinConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            request_timeout_secs: 60,
            validation: ValidationLimits::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl TwinConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With model settings
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: ModelConfig) -> Self {
        self.model = model;
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// With validation limits
    #[inline]
    #[must_use]
    pub fn with_validation(mut self, limits: ValidationLimits) -> Self {
        self.validation = limits;
        self
    }

    /// With layout settings
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and check a TOML document
    ///
    /// # Errors
    /// `Parse` for malformed TOML, `Invalid` for inconsistent values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Check values that serde cannot
    ///
    /// # Errors
    /// `ConfigError::Invalid` describing the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.model_name.trim().is_empty() {
            return Err(ConfigError::Invalid("model.model_name must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::Invalid(format!(
                "model.temperature must be within 0.0..=2.0, got {}",
                self.model.temperature
            )));
        }
        if self.model.api_key_env.trim().is_empty() {
            return Err(ConfigError::Invalid("model.api_key_env must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        self.layout
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
