//! Simulation orchestrator
//!
//! Single entry point: prompt -> model -> validate -> layout. One model
//! round trip per call; no caching, no deduplication, no retries.

use crate::config::TwinConfig;
use crate::error::SimulationError;
use crate::model::{ModelClient, ModelError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use twin_contract::{build_prompt, ResponseValidator};
use twin_layout::LayoutEngine;
use twin_model::{PositionedGraph, StrategicArtifact};
use ulid::Ulid;

/// Unique identifier of one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SimulationId(Ulid);

impl SimulationId {
    /// Generate a new id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SimulationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SimulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Successful simulation: the artifact and its laid-out flow graph
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Simulation {
    pub id: SimulationId,
    pub artifact: StrategicArtifact,
    pub positioned: PositionedGraph,
    pub completed_at: DateTime<Utc>,
}

/// Runs simulations against one model backend
pub struct SimulationOrchestrator {
    model: Arc<dyn ModelClient>,
    validator: ResponseValidator,
    layout: LayoutEngine,
    timeout: Duration,
}

impl fmt::Debug for SimulationOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationOrchestrator")
            .field("validator", &self.validator)
            .field("layout", &self.layout)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SimulationOrchestrator {
    /// Create an orchestrator with default configuration
    #[must_use]
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        let config = TwinConfig::default();
        Self {
            model,
            validator: ResponseValidator::with_limits(config.validation),
            layout: LayoutEngine::default(),
            timeout: config.request_timeout(),
        }
    }

    /// Create an orchestrator from configuration
    ///
    /// # Errors
    /// `SimulationError::Config` if the configuration is inconsistent.
    pub fn with_config(
        model: Arc<dyn ModelClient>,
        config: &TwinConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            model,
            validator: ResponseValidator::with_limits(config.validation),
            layout: LayoutEngine::new(config.layout)?,
            timeout: config.request_timeout(),
        })
    }

    /// Run one simulation
    ///
    /// # Errors
    /// - `InvalidRequest` if `company_name` is blank (no model call is made)
    /// - `ModelUnavailable` if the model call fails or times out
    /// - `InvalidArtifact` if the response fails validation
    /// - `Layout` if the validated graph cannot be laid out
    pub async fn simulate(
        &self,
        company_name: &str,
        context: &str,
        options: &str,
    ) -> Result<Simulation, SimulationError> {
        let company = company_name.trim();
        if company.is_empty() {
            return Err(SimulationError::InvalidRequest(
                "company name must not be empty".to_string(),
            ));
        }

        let id = SimulationId::new();
        tracing::info!(%id, company, "simulation started");

        let prompt = build_prompt(company, context, options);
        tracing::debug!(%id, prompt_len = prompt.len(), "prompt built");

        let raw = match tokio::time::timeout(self.timeout, self.model.generate(&prompt)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                tracing::error!(%id, error = %e, "model call failed");
                return Err(e.into());
            }
            Err(_) => {
                let e = ModelError::Timeout {
                    secs: self.timeout.as_secs(),
                };
                tracing::error!(%id, error = %e, "model call timed out");
                return Err(e.into());
            }
        };
        tracing::debug!(%id, response_len = raw.len(), "model responded");

        let artifact = self.validator.validate(&raw)?;
        let positioned = self.layout.layout(&artifact.flow_graph)?;

        tracing::info!(
            %id,
            scenarios = artifact.scenarios.len(),
            nodes = positioned.nodes.len(),
            ranks = positioned.rank_count(),
            "simulation completed"
        );

        Ok(Simulation {
            id,
            artifact,
            positioned,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MockModelClient;
    use serde_json::json;
    use twin_contract::ValidationError;

    fn response() -> String {
        json!({
            "status": "Synced with Live Market Model",
            "competitorProfile": {
                "name": "Globex",
                "archetype": "Agile Disruptor",
                "likelyCounterMove": "Bundle services",
                "threatLevel": "Critical"
            },
            "scenarios": [
                {"id": "a", "title": "Hold", "outcome3Month": "x", "outcome12Month": "y",
                 "successProbability": 30, "competitorReaction": "ignore"},
                {"id": "b", "title": "Cut", "outcome3Month": "x", "outcome12Month": "y",
                 "successProbability": 70, "competitorReaction": "match"},
                {"id": "c", "title": "Bundle", "outcome3Month": "x", "outcome12Month": "y",
                 "successProbability": 55, "competitorReaction": "copy"}
            ],
            "recommendedScenarioId": "b",
            "flowGraph": {
                "nodes": [
                    {"id": "1", "label": "Audit", "kind": "input"},
                    {"id": "2", "label": "Reprice", "kind": "process"}
                ],
                "edges": [{"sourceId": "1", "targetId": "2"}]
            }
        })
        .to_string()
    }

    fn orchestrator(mock: MockModelClient) -> SimulationOrchestrator {
        SimulationOrchestrator::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn simulate_success() {
        let mut mock = MockModelClient::new();
        mock.expect_generate()
            .withf(|prompt: &str| prompt.contains("Acme"))
            .times(1)
            .returning(|_| Ok(response()));

        let simulation = orchestrator(mock)
            .simulate("Acme", "flat growth", "cut prices")
            .await
            .unwrap();
        assert_eq!(simulation.artifact.recommended_scenario_id, "b");
        assert_eq!(simulation.positioned.nodes.len(), 2);
        assert_eq!(simulation.positioned.rank_count(), 2);
    }

    #[tokio::test]
    async fn blank_company_skips_model() {
        let mut mock = MockModelClient::new();
        mock.expect_generate().never();

        let err = orchestrator(mock).simulate("   ", "", "").await.unwrap_err();
        assert!(matches!(err, SimulationError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn model_failure_is_unavailable() {
        let mut mock = MockModelClient::new();
        mock.expect_generate().returning(|_| {
            Err(ModelError::MissingCredentials {
                env: "GOOGLE_API_KEY".into(),
            })
        });

        let err = orchestrator(mock).simulate("Acme", "", "").await.unwrap_err();
        assert!(matches!(
            err,
            SimulationError::ModelUnavailable(ModelError::MissingCredentials { .. })
        ));
        assert!(err.is_retryable());
    }

    /// Never answers
    struct StalledModel;

    #[async_trait::async_trait]
    impl ModelClient for StalledModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn expired_timeout_is_unavailable() {
        let config = TwinConfig::default().with_timeout_secs(1);
        let orchestrator = SimulationOrchestrator::with_config(Arc::new(StalledModel), &config)
            .unwrap();

        let err = orchestrator.simulate("Acme", "", "").await.unwrap_err();
        assert!(matches!(
            err,
            SimulationError::ModelUnavailable(ModelError::Timeout { secs: 1 })
        ));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn invalid_response_is_invalid_artifact() {
        let mut mock = MockModelClient::new();
        mock.expect_generate()
            .returning(|_| Ok("Sorry, I cannot help with that.".to_string()));

        let err = orchestrator(mock).simulate("Acme", "", "").await.unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidArtifact(ValidationError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn each_call_gets_its_own_id() {
        let mut mock = MockModelClient::new();
        mock.expect_generate().times(2).returning(|_| Ok(response()));

        let orchestrator = orchestrator(mock);
        let first = orchestrator.simulate("Acme", "", "").await.unwrap();
        let second = orchestrator.simulate("Acme", "", "").await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.artifact, second.artifact);
        assert_eq!(first.positioned, second.positioned);
    }

    #[test]
    fn with_config_rejects_bad_layout() {
        let config = TwinConfig::default().with_layout(
            twin_layout::LayoutConfig::new().with_gaps(-1.0, 10.0),
        );
        let err = SimulationOrchestrator::with_config(Arc::new(MockModelClient::new()), &config)
            .unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
    }
}
