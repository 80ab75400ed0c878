//! Strategic artifact types
//!
//! A [`StrategicArtifact`] is created exactly once per simulation request,
//! entirely from the model's response, and is immutable afterwards.

use crate::graph::FlowGraph;
use serde::Serialize;

closed_set! {
    /// Behavioural archetype of the primary competitor
    pub enum Archetype {
        /// Established player defending share with force
        AggressiveIncumbent => "Aggressive Incumbent",
        /// Newcomer attacking with speed and novelty
        AgileDisruptor => "Agile Disruptor",
        /// Copies proven moves once the risk is gone
        FastFollower => "Fast Follower",
    }
}

closed_set! {
    /// How dangerous the competitor is to the company
    pub enum ThreatLevel {
        Moderate => "Moderate",
        High => "High",
        Critical => "Critical",
    }
}

closed_set! {
    /// Ordinal level of a single risk dimension
    pub enum RiskLevel {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

/// Profile of the primary competitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorProfile {
    /// Competitor name
    pub name: String,
    /// Behavioural archetype
    pub archetype: Archetype,
    /// The move the competitor is most likely to make in response
    pub likely_counter_move: String,
    /// Threat posed to the company
    pub threat_level: ThreatLevel,
}

/// Per-scenario risk, one ordinal level per dimension
///
/// No aggregate score is derived; dimensions are presented independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskMatrix {
    pub financial: RiskLevel,
    pub legal: RiskLevel,
    pub market: RiskLevel,
    pub brand: RiskLevel,
}

impl RiskMatrix {
    /// Wire names of the four dimensions, in presentation order
    pub const DIMENSIONS: [&'static str; 4] = ["financial", "legal", "market", "brand"];

    /// Dimensions paired with their levels, in presentation order
    #[must_use]
    pub fn dimensions(&self) -> [(&'static str, RiskLevel); 4] {
        [
            ("financial", self.financial),
            ("legal", self.legal),
            ("market", self.market),
            ("brand", self.brand),
        ]
    }
}

/// One candidate strategic option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Unique within the artifact; opaque, carries no ordering
    pub id: String,
    pub title: String,
    #[serde(rename = "outcome3Month")]
    pub outcome_3_month: String,
    #[serde(rename = "outcome12Month")]
    pub outcome_12_month: String,
    /// Success/confidence score in `0..=100`
    pub success_probability: u8,
    pub competitor_reaction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_matrix: Option<RiskMatrix>,
}

/// Aggregate root: the full structured output of one simulation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicArtifact {
    pub status: String,
    pub competitor_profile: CompetitorProfile,
    /// Presentation order, not priority
    pub scenarios: Vec<Scenario>,
    /// Always names exactly one entry of `scenarios`
    pub recommended_scenario_id: String,
    pub flow_graph: FlowGraph,
}

impl StrategicArtifact {
    /// Look up a scenario by id
    #[must_use]
    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// The recommended scenario
    ///
    /// `None` is only possible for artifacts that bypassed validation.
    #[must_use]
    pub fn recommended(&self) -> Option<&Scenario> {
        self.scenario(&self.recommended_scenario_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlowEdge, FlowNode, NodeKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn scenario(id: &str) -> Scenario {
        Scenario {
            id: id.to_string(),
            title: format!("Option {id}"),
            outcome_3_month: "short term".to_string(),
            outcome_12_month: "long term".to_string(),
            success_probability: 70,
            competitor_reaction: "matches price".to_string(),
            risk_matrix: None,
        }
    }

    fn artifact() -> StrategicArtifact {
        StrategicArtifact {
            status: "Synced".to_string(),
            competitor_profile: CompetitorProfile {
                name: "Globex".to_string(),
                archetype: Archetype::FastFollower,
                likely_counter_move: "price match".to_string(),
                threat_level: ThreatLevel::High,
            },
            scenarios: vec![scenario("a"), scenario("b"), scenario("c")],
            recommended_scenario_id: "b".to_string(),
            flow_graph: FlowGraph {
                nodes: vec![FlowNode::new("1", "Start", NodeKind::Input)],
                edges: Vec::<FlowEdge>::new(),
            },
        }
    }

    #[test]
    fn recommended_resolves() {
        let artifact = artifact();
        assert_eq!(artifact.recommended().map(|s| s.id.as_str()), Some("b"));
        assert!(artifact.scenario("z").is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut artifact = artifact();
        artifact.scenarios[0].risk_matrix = Some(RiskMatrix {
            financial: RiskLevel::High,
            legal: RiskLevel::Low,
            market: RiskLevel::Medium,
            brand: RiskLevel::Low,
        });

        let value = serde_json::to_value(&artifact).unwrap();
        assert_eq!(value["competitorProfile"]["threatLevel"], json!("High"));
        assert_eq!(value["competitorProfile"]["archetype"], json!("Fast Follower"));
        assert_eq!(value["scenarios"][0]["outcome3Month"], json!("short term"));
        assert_eq!(value["scenarios"][0]["riskMatrix"]["financial"], json!("High"));
        assert!(value["scenarios"][1].get("riskMatrix").is_none());
        assert_eq!(value["recommendedScenarioId"], json!("b"));
        assert_eq!(value["flowGraph"]["nodes"][0]["kind"], json!("input"));
    }

    #[test]
    fn risk_dimensions_in_presentation_order() {
        let matrix = RiskMatrix {
            financial: RiskLevel::High,
            legal: RiskLevel::Low,
            market: RiskLevel::Medium,
            brand: RiskLevel::Low,
        };
        let names: Vec<_> = matrix.dimensions().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, RiskMatrix::DIMENSIONS.to_vec());
    }
}
