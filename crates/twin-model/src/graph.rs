//! Flow graph types
//!
//! The implementation plan of the recommended scenario. The graph is not
//! guaranteed acyclic and may contain parallel edges.

use serde::Serialize;

closed_set! {
    /// Role of a node in the flow
    #[derive(Default)]
    pub enum NodeKind {
        Input => "input",
        Process => "process",
        Decision => "decision",
        Output => "output",
        #[default]
        Default => "default",
    }
}

/// A step of the implementation plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowNode {
    /// Unique within the graph; opaque
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
}

impl FlowNode {
    /// Create a node
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }
}

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    pub source_id: String,
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FlowEdge {
    /// Create an unlabeled edge
    #[inline]
    #[must_use]
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            label: None,
        }
    }

    /// With label
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Nodes plus directed edges, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Create empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add node (builder style)
    #[must_use]
    pub fn node(mut self, id: &str, label: &str, kind: NodeKind) -> Self {
        self.nodes.push(FlowNode::new(id, label, kind));
        self
    }

    /// Add edge (builder style)
    #[must_use]
    pub fn edge(mut self, source_id: &str, target_id: &str) -> Self {
        self.edges.push(FlowEdge::new(source_id, target_id));
        self
    }

    /// Look up a node by id
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
