//! # twin-gemini
//!
//! [`ModelClient`] over the Gemini `generateContent` HTTP API.
//!
//! The response is requested as `application/json` so the text part is the
//! artifact document itself. Every failure maps to a [`ModelError`]:
//! - no API key in the configured environment variable
//! - transport errors and undecodable bodies
//! - non-success HTTP status
//! - no candidate text

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod wire;

use twin_core::{ModelClient, ModelConfig, ModelError};
use wire::{GenerateRequest, GenerateResponse};

/// Longest error body kept in `ModelError::Status`
const MAX_ERROR_BODY: usize = 512;

/// Gemini backend
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: ModelConfig,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model_name)
            .field("base_url", &self.config.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

impl GeminiClient {
    /// Create a client reading the key from `config.api_key_env`
    ///
    /// A missing key is reported on the first `generate` call.
    ///
    /// # Errors
    /// `ModelError::Transport` if the HTTP client cannot be built.
    pub fn from_env(config: ModelConfig) -> Result<Self, ModelError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::build(config, api_key)
    }

    /// Create a client with an explicit key
    ///
    /// # Errors
    /// `ModelError::Transport` if the HTTP client cannot be built.
    pub fn with_api_key(config: ModelConfig, api_key: impl Into<String>) -> Result<Self, ModelError> {
        Self::build(config, Some(api_key.into()))
    }

    fn build(config: ModelConfig, api_key: Option<String>) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ModelError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            config,
            api_key,
        })
    }

    /// `{base}/v1beta/models/{model}:generateContent`
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model_name
        )
    }
}

#[async_trait::async_trait]
impl ModelClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ModelError::MissingCredentials {
                env: self.config.api_key_env.clone(),
            })?;

        let request = GenerateRequest::new(prompt, self.config.temperature);
        tracing::debug!(model = %self.config.model_name, "sending generateContent request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(ModelError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let decoded: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Transport(format!("undecodable response body: {e}")))?;

        let text = decoded.text().ok_or(ModelError::EmptyResponse)?;
        tracing::debug!(len = text.len(), "generateContent responded");
        Ok(text)
    }
}
