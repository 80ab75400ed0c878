//! Referential and enumeration stages

use super::structure::{RawArtifact, RawRiskMatrix, Tagged};
use crate::error::ValidationError;
use std::collections::HashSet;
use twin_model::{
    ClosedSet, CompetitorProfile, FlowEdge, FlowGraph, FlowNode, NodeKind, RiskMatrix,
    Scenario, StrategicArtifact,
};

fn dangling(tagged: &Tagged<'_>) -> ValidationError {
    ValidationError::DanglingReference {
        path: tagged.path.to_string(),
        id: tagged.value.to_string(),
    }
}

/// Confirm the recommendation and every edge endpoint resolve
pub(crate) fn check_references(raw: &RawArtifact<'_>) -> Result<(), ValidationError> {
    let scenario_ids: HashSet<&str> = raw.scenarios.iter().map(|s| s.id).collect();
    if !scenario_ids.contains(raw.recommended.value) {
        return Err(dangling(&raw.recommended));
    }

    let node_ids: HashSet<&str> = raw.nodes.iter().map(|n| n.id).collect();
    for edge in &raw.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !node_ids.contains(endpoint.value) {
                return Err(dangling(endpoint));
            }
        }
    }
    Ok(())
}

fn resolve<T: ClosedSet>(tagged: &Tagged<'_>) -> Result<T, ValidationError> {
    T::from_wire(tagged.value).ok_or_else(|| ValidationError::InvalidEnum {
        field: tagged.path.to_string(),
        value: tagged.value.to_string(),
        expected: T::choices(", "),
    })
}

fn resolve_matrix(raw: &RawRiskMatrix<'_>) -> Result<RiskMatrix, ValidationError> {
    Ok(RiskMatrix {
        financial: resolve(&raw.financial)?,
        legal: resolve(&raw.legal)?,
        market: resolve(&raw.market)?,
        brand: resolve(&raw.brand)?,
    })
}

/// Resolve every enumerated field and build the artifact
///
/// Fields are visited in document order, so the first offending field in the
/// response is the one reported.
pub(crate) fn resolve_enums(raw: RawArtifact<'_>) -> Result<StrategicArtifact, ValidationError> {
    let competitor_profile = CompetitorProfile {
        name: raw.profile.name.to_string(),
        archetype: resolve(&raw.profile.archetype)?,
        likely_counter_move: raw.profile.likely_counter_move.to_string(),
        threat_level: resolve(&raw.profile.threat_level)?,
    };

    let scenarios = raw
        .scenarios
        .iter()
        .map(|s| {
            Ok(Scenario {
                id: s.id.to_string(),
                title: s.title.to_string(),
                outcome_3_month: s.outcome_3_month.to_string(),
                outcome_12_month: s.outcome_12_month.to_string(),
                success_probability: s.success_probability,
                competitor_reaction: s.competitor_reaction.to_string(),
                risk_matrix: s.risk_matrix.as_ref().map(resolve_matrix).transpose()?,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let nodes = raw
        .nodes
        .iter()
        .map(|n| {
            let kind = match &n.kind {
                Some(tagged) => resolve(tagged)?,
                None => NodeKind::default(),
            };
            Ok(FlowNode::new(n.id, n.label, kind))
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    let edges = raw
        .edges
        .iter()
        .map(|e| FlowEdge {
            source_id: e.source.value.to_string(),
            target_id: e.target.value.to_string(),
            label: e.label.map(str::to_string),
        })
        .collect();

    Ok(StrategicArtifact {
        status: raw.status.to_string(),
        competitor_profile,
        scenarios,
        recommended_scenario_id: raw.recommended.value.to_string(),
        flow_graph: FlowGraph { nodes, edges },
    })
}
