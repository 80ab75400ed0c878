//! Schema contract
//!
//! Builds the single text prompt sent to the model and declares the JSON
//! shape the model must return. The declared shape is the authority the
//! [`ResponseValidator`](crate::ResponseValidator) checks against; the closed
//! enumerations are spelled out from [`ClosedSet`] so the two cannot drift.

use serde_json::{json, Value};
use twin_model::{Archetype, ClosedSet, NodeKind, RiskLevel, ThreatLevel};

/// Number of scenarios the model is asked to produce
pub const SCENARIO_COUNT: usize = 3;

/// Prompt builder and response shape declaration
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaContract;

impl SchemaContract {
    /// Build the model prompt
    ///
    /// Pure string construction. `company_name` is expected non-empty (the
    /// caller enforces this); `context` and `options` may be empty, in which
    /// case the quality of the answer is left to the model.
    #[must_use]
    pub fn build_prompt(company_name: &str, context: &str, options: &str) -> String {
        let template = serde_json::to_string_pretty(&Self::output_template())
            .unwrap_or_else(|_| Self::output_template().to_string());
        let archetypes = Archetype::choices(" | ");
        let threats = ThreatLevel::choices(" | ");
        let risks = RiskLevel::choices(" | ");
        let kinds = NodeKind::choices(" | ");

        format!(
            "You are the Strategic Digital Twin for {company_name}.\n\
             \n\
             ROLE:\n\
             Act as a game theory engine. Treat every competitor as a rational, \
             resource-bounded and strategically selfish agent.\n\
             \n\
             INPUT:\n\
             Context: {context}\n\
             Options: {options}\n\
             \n\
             TASKS:\n\
             1. COMPETITOR: identify the primary competitor and its dominant strategy. \
             Its archetype must be exactly one of: {archetypes}. \
             Its threatLevel must be exactly one of: {threats}.\n\
             2. SCENARIOS: create exactly {SCENARIO_COUNT} competing strategic scenarios with \
             distinct ids. successProbability is an integer from 0 to 100.\n\
             3. RISK MATRIX: for each scenario rate financial, legal, market and brand risk, \
             each exactly one of: {risks}.\n\
             4. RECOMMENDATION: recommendedScenarioId must equal the id of one scenario.\n\
             5. IMPLEMENTATION: describe how to execute the recommended scenario as a \
             directed flow graph with at least one node. Node ids must be unique, each \
             node kind must be exactly one of: {kinds}, and every edge sourceId and \
             targetId must be the id of a declared node.\n\
             \n\
             OUTPUT:\n\
             Respond with a single JSON object and nothing else, in this shape:\n\
             {template}\n"
        )
    }

    /// Example of the response shape, with enumerations listed as `A | B | C`
    #[must_use]
    pub fn output_template() -> Value {
        let risk = RiskLevel::choices(" | ");
        json!({
            "status": "Synced with Live Market Model",
            "competitorProfile": {
                "name": "String",
                "archetype": Archetype::choices(" | "),
                "likelyCounterMove": "String",
                "threatLevel": ThreatLevel::choices(" | ")
            },
            "scenarios": [{
                "id": "1",
                "title": "String",
                "outcome3Month": "String",
                "outcome12Month": "String",
                "successProbability": 85,
                "competitorReaction": "String",
                "riskMatrix": {
                    "financial": risk.as_str(),
                    "legal": risk.as_str(),
                    "market": risk.as_str(),
                    "brand": risk.as_str()
                }
            }],
            "recommendedScenarioId": "1",
            "flowGraph": {
                "nodes": [
                    { "id": "1", "label": "Start", "kind": "input" },
                    { "id": "2", "label": "Action", "kind": "process" }
                ],
                "edges": [
                    { "sourceId": "1", "targetId": "2", "label": "Next" }
                ]
            }
        })
    }
}

/// Shorthand for [`SchemaContract::build_prompt`]
#[must_use]
pub fn build_prompt(company_name: &str, context: &str, options: &str) -> String {
    SchemaContract::build_prompt(company_name, context, options)
}
