//! External model seam
//!
//! The core depends only on `generate(prompt) -> raw text`. Transport,
//! authentication and model selection belong to implementations.

/// Failures of the external model collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Credentials are not configured
    #[error("missing credentials: environment variable {env} is not set")]
    MissingCredentials { env: String },

    /// Network or protocol failure
    #[error("transport failure: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("model returned status {code}: {body}")]
    Status { code: u16, body: String },

    /// No response within the configured bound
    #[error("model call timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Response carried no text
    #[error("model returned no content")]
    EmptyResponse,
}

/// Text generation backend
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Send one prompt, receive the raw response text
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}
