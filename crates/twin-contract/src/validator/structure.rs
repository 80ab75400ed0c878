//! Structural stage
//!
//! Walks the decoded JSON value and confirms every required field is present
//! with the right primitive type. Enumerated fields are captured as raw
//! strings with their paths; they are resolved later, after references have
//! been checked.

use super::path::FieldPath;
use super::ValidationLimits;
use crate::error::ValidationError;
use crate::prompt::SCENARIO_COUNT;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// A string that still has to be checked against a closed set or an id table
#[derive(Debug, Clone)]
pub(crate) struct Tagged<'a> {
    pub(crate) value: &'a str,
    pub(crate) path: FieldPath,
}

#[derive(Debug)]
pub(crate) struct RawProfile<'a> {
    pub(crate) name: &'a str,
    pub(crate) archetype: Tagged<'a>,
    pub(crate) likely_counter_move: &'a str,
    pub(crate) threat_level: Tagged<'a>,
}

#[derive(Debug)]
pub(crate) struct RawRiskMatrix<'a> {
    pub(crate) financial: Tagged<'a>,
    pub(crate) legal: Tagged<'a>,
    pub(crate) market: Tagged<'a>,
    pub(crate) brand: Tagged<'a>,
}

#[derive(Debug)]
pub(crate) struct RawScenario<'a> {
    pub(crate) id: &'a str,
    pub(crate) title: &'a str,
    pub(crate) outcome_3_month: &'a str,
    pub(crate) outcome_12_month: &'a str,
    pub(crate) success_probability: u8,
    pub(crate) competitor_reaction: &'a str,
    pub(crate) risk_matrix: Option<RawRiskMatrix<'a>>,
}

#[derive(Debug)]
pub(crate) struct RawNode<'a> {
    pub(crate) id: &'a str,
    pub(crate) label: &'a str,
    /// `None` when the field is absent; absent means `default`
    pub(crate) kind: Option<Tagged<'a>>,
}

#[derive(Debug)]
pub(crate) struct RawEdge<'a> {
    pub(crate) source: Tagged<'a>,
    pub(crate) target: Tagged<'a>,
    pub(crate) label: Option<&'a str>,
}

/// Structurally sound artifact, not yet reference- or enum-checked
#[derive(Debug)]
pub(crate) struct RawArtifact<'a> {
    pub(crate) status: &'a str,
    pub(crate) profile: RawProfile<'a>,
    pub(crate) scenarios: Vec<RawScenario<'a>>,
    pub(crate) recommended: Tagged<'a>,
    pub(crate) nodes: Vec<RawNode<'a>>,
    pub(crate) edges: Vec<RawEdge<'a>>,
}

fn mismatch(path: &FieldPath, reason: impl Into<String>) -> ValidationError {
    ValidationError::SchemaMismatch {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected(path: &FieldPath, what: &str, found: &Value) -> ValidationError {
    mismatch(path, format!("expected {what}, found {}", describe(found)))
}

/// A JSON object together with the path it was reached by
struct Object<'a> {
    map: &'a Map<String, Value>,
    path: FieldPath,
}

impl<'a> Object<'a> {
    fn at(value: &'a Value, path: FieldPath) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self { map, path }),
            other => Err(expected(&path, "object", other)),
        }
    }

    /// Present and non-null
    fn present(&self, key: &'static str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn required(&self, key: &'static str) -> Result<(&'a Value, FieldPath), ValidationError> {
        let path = self.path.key(key);
        match self.map.get(key) {
            Some(value) if !value.is_null() => Ok((value, path)),
            _ => Err(mismatch(&path, "missing required field")),
        }
    }

    fn string(&self, key: &'static str) -> Result<&'a str, ValidationError> {
        self.tagged(key).map(|t| t.value)
    }

    fn tagged(&self, key: &'static str) -> Result<Tagged<'a>, ValidationError> {
        let (value, path) = self.required(key)?;
        match value.as_str() {
            Some(value) => Ok(Tagged { value, path }),
            None => Err(expected(&path, "string", value)),
        }
    }

    fn optional_string(&self, key: &'static str) -> Result<Option<&'a str>, ValidationError> {
        self.optional_tagged(key).map(|t| t.map(|t| t.value))
    }

    fn optional_tagged(&self, key: &'static str) -> Result<Option<Tagged<'a>>, ValidationError> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => {
                let path = self.path.key(key);
                match value.as_str() {
                    Some(value) => Ok(Some(Tagged { value, path })),
                    None => Err(expected(&path, "string", value)),
                }
            }
        }
    }

    fn object(&self, key: &'static str) -> Result<Object<'a>, ValidationError> {
        let (value, path) = self.required(key)?;
        Object::at(value, path)
    }

    fn optional_object(&self, key: &'static str) -> Result<Option<Object<'a>>, ValidationError> {
        self.present(key)
            .map(|value| Object::at(value, self.path.key(key)))
            .transpose()
    }

    fn array(
        &self,
        key: &'static str,
        limit: usize,
    ) -> Result<(&'a [Value], FieldPath), ValidationError> {
        let (value, path) = self.required(key)?;
        let items = value
            .as_array()
            .ok_or_else(|| expected(&path, "array", value))?;
        if items.len() > limit {
            return Err(mismatch(
                &path,
                format!("has {} entries, limit is {limit}", items.len()),
            ));
        }
        Ok((items.as_slice(), path))
    }

    fn percentage(&self, key: &'static str) -> Result<u8, ValidationError> {
        let (value, path) = self.required(key)?;
        let Value::Number(number) = value else {
            return Err(expected(&path, "integer", value));
        };
        if let Some(n) = number.as_u64() {
            return u8::try_from(n)
                .ok()
                .filter(|n| *n <= 100)
                .ok_or_else(|| mismatch(&path, format!("must be within 0..=100, found {n}")));
        }
        if let Some(n) = number.as_i64() {
            return Err(mismatch(&path, format!("must be within 0..=100, found {n}")));
        }
        Err(mismatch(&path, format!("expected integer, found {number}")))
    }
}

/// Run the structural stage over a decoded document
pub(crate) fn decode<'a>(
    document: &'a Value,
    limits: &ValidationLimits,
) -> Result<RawArtifact<'a>, ValidationError> {
    let root = Object::at(document, FieldPath::root())?;

    let status = root.string("status")?;
    let profile = decode_profile(&root.object("competitorProfile")?)?;

    let (items, scenarios_path) = root.array("scenarios", SCENARIO_COUNT)?;
    if items.is_empty() {
        return Err(mismatch(
            &scenarios_path,
            "must contain at least one scenario",
        ));
    }
    if items.len() != SCENARIO_COUNT {
        return Err(mismatch(
            &scenarios_path,
            format!("expected exactly {SCENARIO_COUNT} scenarios, found {}", items.len()),
        ));
    }
    let mut scenarios = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();
    for (i, item) in items.iter().enumerate() {
        let scenario = decode_scenario(&Object::at(item, scenarios_path.index(i))?)?;
        if !seen.insert(scenario.id) {
            return Err(mismatch(
                &scenarios_path.index(i).key("id"),
                format!("duplicate scenario id `{}`", scenario.id),
            ));
        }
        scenarios.push(scenario);
    }

    let recommended = root.tagged("recommendedScenarioId")?;

    let graph = root.object("flowGraph")?;
    let (items, nodes_path) = graph.array("nodes", limits.max_nodes)?;
    let mut nodes = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();
    for (i, item) in items.iter().enumerate() {
        let node = Object::at(item, nodes_path.index(i))?;
        let node = RawNode {
            id: node.string("id")?,
            label: node.string("label")?,
            kind: node.optional_tagged("kind")?,
        };
        if !seen.insert(node.id) {
            return Err(mismatch(
                &nodes_path.index(i).key("id"),
                format!("duplicate node id `{}`", node.id),
            ));
        }
        nodes.push(node);
    }

    let (items, edges_path) = graph.array("edges", limits.max_edges)?;
    let edges = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let edge = Object::at(item, edges_path.index(i))?;
            Ok(RawEdge {
                source: edge.tagged("sourceId")?,
                target: edge.tagged("targetId")?,
                label: edge.optional_string("label")?,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(RawArtifact {
        status,
        profile,
        scenarios,
        recommended,
        nodes,
        edges,
    })
}

fn decode_profile<'a>(profile: &Object<'a>) -> Result<RawProfile<'a>, ValidationError> {
    Ok(RawProfile {
        name: profile.string("name")?,
        archetype: profile.tagged("archetype")?,
        likely_counter_move: profile.string("likelyCounterMove")?,
        threat_level: profile.tagged("threatLevel")?,
    })
}

fn decode_scenario<'a>(scenario: &Object<'a>) -> Result<RawScenario<'a>, ValidationError> {
    let risk_matrix = scenario
        .optional_object("riskMatrix")?
        .map(|matrix| {
            Ok::<_, ValidationError>(RawRiskMatrix {
                financial: matrix.tagged("financial")?,
                legal: matrix.tagged("legal")?,
                market: matrix.tagged("market")?,
                brand: matrix.tagged("brand")?,
            })
        })
        .transpose()?;

    Ok(RawScenario {
        id: scenario.string("id")?,
        title: scenario.string("title")?,
        outcome_3_month: scenario.string("outcome3Month")?,
        outcome_12_month: scenario.string("outcome12Month")?,
        success_probability: scenario.percentage("successProbability")?,
        competitor_reaction: scenario.string("competitorReaction")?,
        risk_matrix,
    })
}
