//! Error types for the simulation core
//!
//! Every failure of a simulation request is one [`SimulationError`]:
//! - model unavailability (transport, status, timeout, credentials)
//! - invalid artifacts (any [`ValidationError`] kind)
//! - layout precondition violations
//! - rejected requests and configuration problems

use crate::config::ConfigError;
use crate::model::ModelError;
use twin_contract::ValidationError;
use twin_layout::LayoutError;

/// Main simulation error type
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// External model could not produce a response
    #[error("model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),

    /// Model response failed validation
    #[error("invalid artifact: {0}")]
    InvalidArtifact(#[from] ValidationError),

    /// Layout refused the validated graph
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),

    /// Caller input rejected before any model call
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SimulationError {
    /// Human-readable reason for the presentation layer
    #[must_use]
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Stable machine-readable kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ModelUnavailable(_) => "model_unavailable",
            Self::InvalidArtifact(_) => "invalid_artifact",
            Self::Layout(_) => "layout",
            Self::InvalidRequest(_) => "invalid_request",
            Self::Config(_) => "config",
        }
    }

    /// Whether a user-initiated retry of the whole request may succeed
    ///
    /// The model is non-deterministic, so a rejected artifact may come back
    /// valid. The core itself never retries.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ModelUnavailable(_) | Self::InvalidArtifact(_))
    }
}
