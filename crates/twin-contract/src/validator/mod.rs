//! Response validator
//!
//! Turns raw model text into a [`StrategicArtifact`] or a classified
//! [`ValidationError`]. The model is untrusted: it may return non-JSON text,
//! partially shaped JSON, out-of-set enum values or dangling references.
//!
//! Stages, in order:
//! 1. syntactic parse -> [`ValidationError::Malformed`]
//! 2. structure (presence, primitive types, exactly three scenarios, limits,
//!    unique ids) -> [`ValidationError::SchemaMismatch`]
//! 3. references (recommended scenario, edge endpoints) ->
//!    [`ValidationError::DanglingReference`]
//! 4. closed enumerations -> [`ValidationError::InvalidEnum`]
//!
//! No retries and no repair: this is a pure function from text to result.

mod path;
mod resolve;
mod structure;

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use twin_model::StrategicArtifact;

/// Size limits applied to untrusted responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Maximum number of flow graph nodes
    pub max_nodes: usize,
    /// Maximum number of flow graph edges
    pub max_edges: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_nodes: 200,
            max_edges: 1000,
        }
    }
}

/// Validator for model responses
#[derive(Debug, Clone, Default)]
pub struct ResponseValidator {
    limits: ValidationLimits,
}

impl ResponseValidator {
    /// Create a validator with default limits
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom limits
    #[inline]
    #[must_use]
    pub fn with_limits(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// Current limits
    #[inline]
    #[must_use]
    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Validate raw model output
    ///
    /// # Errors
    /// - `Malformed` if the text is not JSON
    /// - `SchemaMismatch` if required fields are missing or mistyped
    /// - `DanglingReference` if a scenario or edge reference does not resolve
    /// - `InvalidEnum` if an enumerated field is outside its closed set
    pub fn validate(&self, raw: &str) -> Result<StrategicArtifact, ValidationError> {
        let document: Value = serde_json::from_str(raw.trim()).map_err(|e| {
            tracing::warn!(error = %e, "model response is not JSON");
            ValidationError::from(e)
        })?;
        tracing::debug!("response parsed");

        let result = structure::decode(&document, &self.limits)
            .and_then(|artifact| {
                tracing::debug!(
                    scenarios = artifact.scenarios.len(),
                    nodes = artifact.nodes.len(),
                    edges = artifact.edges.len(),
                    "structure ok"
                );
                resolve::check_references(&artifact)?;
                tracing::debug!("references ok");
                resolve::resolve_enums(artifact)
            });

        if let Err(e) = &result {
            tracing::warn!(kind = e.kind(), error = %e, "model response rejected");
        }
        result
    }
}

/// Validate with default limits
///
/// # Errors
/// See [`ResponseValidator::validate`].
pub fn validate(raw: &str) -> Result<StrategicArtifact, ValidationError> {
    ResponseValidator::new().validate(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use twin_model::{Archetype, NodeKind, RiskLevel, ThreatLevel};

    fn document() -> Value {
        json!({
            "status": "Synced with Live Market Model",
            "competitorProfile": {
                "name": "Globex",
                "archetype": "Aggressive Incumbent",
                "likelyCounterMove": "Undercut on price",
                "threatLevel": "High"
            },
            "scenarios": [
                {
                    "id": "s1", "title": "Hold", "outcome3Month": "a", "outcome12Month": "b",
                    "successProbability": 40, "competitorReaction": "ignore",
                    "riskMatrix": {"financial": "Low", "legal": "Low", "market": "High", "brand": "Medium"}
                },
                {
                    "id": "s2", "title": "Cut", "outcome3Month": "a", "outcome12Month": "b",
                    "successProbability": 75, "competitorReaction": "match"
                },
                {
                    "id": "s3", "title": "Bundle", "outcome3Month": "a", "outcome12Month": "b",
                    "successProbability": 60, "competitorReaction": "copy"
                }
            ],
            "recommendedScenarioId": "s2",
            "flowGraph": {
                "nodes": [
                    {"id": "1", "label": "Start", "kind": "input"},
                    {"id": "2", "label": "Reprice", "kind": "process"},
                    {"id": "3", "label": "Launch"}
                ],
                "edges": [
                    {"sourceId": "1", "targetId": "2", "label": "Next"},
                    {"sourceId": "2", "targetId": "3"}
                ]
            }
        })
    }

    fn check(value: &Value) -> Result<StrategicArtifact, ValidationError> {
        validate(&value.to_string())
    }

    #[test]
    fn accepts_valid_document() {
        let artifact = check(&document()).unwrap();
        assert_eq!(artifact.competitor_profile.archetype, Archetype::AggressiveIncumbent);
        assert_eq!(artifact.competitor_profile.threat_level, ThreatLevel::High);
        assert_eq!(artifact.scenarios.len(), 3);
        assert_eq!(
            artifact.scenarios[0].risk_matrix.map(|m| m.market),
            Some(RiskLevel::High)
        );
        assert!(artifact.scenarios[1].risk_matrix.is_none());
        assert_eq!(artifact.recommended().map(|s| s.title.as_str()), Some("Cut"));
        assert_eq!(artifact.flow_graph.nodes[2].kind, NodeKind::Default);
        assert_eq!(artifact.flow_graph.edges[0].label.as_deref(), Some("Next"));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let raw = format!("\n  {}\n", document());
        assert!(validate(&raw).is_ok());
    }

    #[test]
    fn not_json_is_malformed() {
        assert!(matches!(
            validate("not json"),
            Err(ValidationError::Malformed { .. })
        ));
        assert!(matches!(validate(""), Err(ValidationError::Malformed { .. })));
    }

    #[test]
    fn empty_scenarios_is_schema_mismatch() {
        assert!(matches!(
            validate(r#"{"scenarios": []}"#),
            Err(ValidationError::SchemaMismatch { .. })
        ));

        let mut doc = document();
        doc["scenarios"] = json!([]);
        let err = check(&doc).unwrap_err();
        assert_eq!(err.path(), Some("scenarios"));
    }

    #[test]
    fn scenario_count_is_exact() {
        let mut doc = document();
        doc["scenarios"].as_array_mut().unwrap().pop();
        let err = check(&doc).unwrap_err();
        assert!(matches!(err, ValidationError::SchemaMismatch { .. }));
        assert_eq!(err.path(), Some("scenarios"));

        let mut doc = document();
        let extra = doc["scenarios"][0].clone();
        doc["scenarios"].as_array_mut().unwrap().push(extra);
        doc["scenarios"][3]["id"] = json!("s4");
        assert_eq!(check(&doc).unwrap_err().path(), Some("scenarios"));
    }

    #[test]
    fn structure_is_checked_before_references() {
        let mut doc = document();
        doc["recommendedScenarioId"] = json!("missing");
        doc["competitorProfile"]["name"] = json!(7);
        let err = check(&doc).unwrap_err();
        assert_eq!(err.path(), Some("competitorProfile.name"));
    }

    #[test]
    fn references_are_checked_before_enums() {
        let mut doc = document();
        doc["competitorProfile"]["threatLevel"] = json!("Unknown");
        doc["flowGraph"]["edges"][1]["targetId"] = json!("9");
        let err = check(&doc).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DanglingReference {
                path: "flowGraph.edges[1].targetId".to_string(),
                id: "9".to_string(),
            }
        );
    }

    #[test]
    fn unknown_threat_level_is_invalid_enum() {
        let mut doc = document();
        doc["competitorProfile"]["threatLevel"] = json!("Unknown");
        let err = check(&doc).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidEnum { ref field, ref value, .. }
                if field == "competitorProfile.threatLevel" && value == "Unknown"
        ));
    }

    #[test]
    fn limits_apply() {
        let validator = ResponseValidator::with_limits(ValidationLimits {
            max_nodes: 2,
            ..ValidationLimits::default()
        });
        let err = validator.validate(&document().to_string()).unwrap_err();
        assert_eq!(err.path(), Some("flowGraph.nodes"));
    }
}
