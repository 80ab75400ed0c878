//! Testing utilities for the strategic twin workspace
//!
//! Shared fixtures and a scripted model stub.

#![allow(missing_docs)]

use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use twin_core::{ModelClient, ModelError, SimulationOrchestrator};

/// A complete, valid model response
///
/// Three scenarios `s0`..`s2`, each with a risk matrix, recommending `s1`,
/// and a four-node linear flow `1 -> 2 -> 3 -> 4`.
pub fn artifact_document() -> Value {
    json!({
        "status": "Synced with Live Market Model",
        "competitorProfile": {
            "name": "Globex Retail",
            "archetype": "Aggressive Incumbent",
            "likelyCounterMove": "Match any price cut within two weeks",
            "threatLevel": "High"
        },
        "scenarios": [
            {
                "id": "s0",
                "title": "Hold Price, Invest in Service",
                "outcome3Month": "Churn stabilises, margins intact",
                "outcome12Month": "Modest share gain among premium buyers",
                "successProbability": 45,
                "competitorReaction": "Ignores the move",
                "riskMatrix": {"financial": "Low", "legal": "Low", "market": "Medium", "brand": "Low"}
            },
            {
                "id": "s1",
                "title": "Targeted Price Cuts",
                "outcome3Month": "Volume up 12% in contested segments",
                "outcome12Month": "Share recovered, margin pressure contained",
                "successProbability": 68,
                "competitorReaction": "Matches on flagship lines only",
                "riskMatrix": {"financial": "Medium", "legal": "Low", "market": "Medium", "brand": "Low"}
            },
            {
                "id": "s2",
                "title": "Across-the-Board Discount",
                "outcome3Month": "Short spike in volume",
                "outcome12Month": "Price war erodes margins",
                "successProbability": 22,
                "competitorReaction": "Undercuts aggressively",
                "riskMatrix": {"financial": "High", "legal": "Medium", "market": "High", "brand": "Medium"}
            }
        ],
        "recommendedScenarioId": "s1",
        "flowGraph": {
            "nodes": [
                {"id": "1", "label": "Segment Audit", "kind": "input"},
                {"id": "2", "label": "Select Lines", "kind": "decision"},
                {"id": "3", "label": "Reprice", "kind": "process"},
                {"id": "4", "label": "Monitor Response", "kind": "output"}
            ],
            "edges": [
                {"sourceId": "1", "targetId": "2", "label": "findings"},
                {"sourceId": "2", "targetId": "3"},
                {"sourceId": "3", "targetId": "4"}
            ]
        }
    })
}

/// [`artifact_document`] as raw response text
pub fn artifact_json() -> String {
    artifact_document().to_string()
}

/// A `flowGraph` value with `process` nodes labelled after their ids
pub fn flow_graph_document(nodes: &[String], edges: &[(String, String)]) -> Value {
    let nodes: Vec<Value> = nodes
        .iter()
        .map(|id| json!({"id": id, "label": format!("Step {id}"), "kind": "process"}))
        .collect();
    let edges: Vec<Value> = edges
        .iter()
        .map(|(s, t)| json!({"sourceId": s, "targetId": t}))
        .collect();
    json!({"nodes": nodes, "edges": edges})
}

/// Model stub answering from a queue and recording every prompt
///
/// An exhausted queue answers `ModelError::EmptyResponse`.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response
    #[must_use]
    pub fn respond(self, raw: impl Into<String>) -> Self {
        self.responses.lock().push_back(Ok(raw.into()));
        self
    }

    /// Queue a failure
    #[must_use]
    pub fn fail(self, error: ModelError) -> Self {
        self.responses.lock().push_back(Err(error));
        self
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait::async_trait]
impl ModelClient for ScriptedModel {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().push(prompt.to_string());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or(Err(ModelError::EmptyResponse))
    }
}

/// Orchestrator over a scripted model, keeping a handle for inspection
pub fn setup_orchestrator(model: ScriptedModel) -> (Arc<ScriptedModel>, SimulationOrchestrator) {
    let model = Arc::new(model);
    let orchestrator = SimulationOrchestrator::new(model.clone());
    (model, orchestrator)
}
