//! # twin-layout
//!
//! Deterministic layered layout for flow graphs.
//!
//! Pipeline:
//! - **Arena**: resolve ids to indices, classify back edges with a DFS,
//!   assign longest-path ranks over the remaining DAG
//! - **Order**: barycenter sweeps to reduce crossings, best order kept
//! - **Place**: fixed-size slots per (rank, order), ranks centred
//! - **Anchor**: edge endpoints on the facing sides of their nodes
//!
//! Identical input always yields identical output: every tie is broken by
//! input order and no hashing order leaks into the result.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod arena;
mod config;
mod error;
mod order;
mod place;

pub use config::{LayoutConfig, LayoutDirection};
pub use error::LayoutError;

use arena::Arena;
use place::{edge_sides, Placer};
use twin_model::{FlowGraph, Point, PositionedEdge, PositionedGraph, PositionedNode, Rect};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Layered layout engine
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine
    ///
    /// # Errors
    /// `LayoutError::InvalidConfig` if the geometry is unusable.
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Compute positions for every node and edge of `graph`
    ///
    /// Nodes and edges come back in input order. Edges that close a cycle
    /// are kept and flagged with `back_edge`.
    ///
    /// # Errors
    /// `DuplicateNode` or `UnresolvedEdge` if the graph's ids do not resolve.
    pub fn layout(&self, graph: &FlowGraph) -> Result<PositionedGraph, LayoutError> {
        if graph.nodes.is_empty() && graph.edges.is_empty() {
            return Ok(PositionedGraph::default());
        }

        let arena = Arena::build(graph)?;
        let ordering = order::order_layers(&arena, self.config.ordering_passes);
        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            ranks = ordering.layers.len(),
            back_edges = arena.back_edge_count(),
            crossings = ordering.crossings,
            "layout computed"
        );

        let placer = Placer::new(self.config, &ordering.layers);

        // (rank, order, rect) per input node index
        let mut slots = vec![(0usize, 0usize, Rect::default()); graph.nodes.len()];
        for (rank, layer) in ordering.layers.iter().enumerate() {
            for (order, ix) in layer.iter().enumerate() {
                let input = arena.graph[*ix];
                slots[input] = (rank, order, placer.rect(rank, order, layer.len()));
            }
        }

        let nodes: Vec<PositionedNode> = graph
            .nodes
            .iter()
            .zip(&slots)
            .map(|(node, &(rank, order, rect))| PositionedNode {
                id: node.id.clone(),
                label: node.label.clone(),
                kind: node.kind,
                rank,
                order,
                position: Point::new(rect.x, rect.y),
                size: placer.size(),
            })
            .collect();

        let mut edges = Vec::with_capacity(graph.edges.len());
        for edge in arena.graph.edge_indices() {
            let Some((source, target)) = arena.graph.edge_endpoints(edge) else {
                continue;
            };
            let input = arena.graph[edge];
            let flow_edge = &graph.edges[input];
            let (s_rank, s_order, s_rect) = slots[arena.graph[source]];
            let (t_rank, t_order, t_rect) = slots[arena.graph[target]];
            let (s_side, t_side) = edge_sides((s_rank, s_order), (t_rank, t_order));
            edges.push(PositionedEdge {
                source_id: flow_edge.source_id.clone(),
                target_id: flow_edge.target_id.clone(),
                label: flow_edge.label.clone(),
                source_point: placer.anchor(&s_rect, s_side),
                target_point: placer.anchor(&t_rect, t_side),
                back_edge: arena.back[input],
            });
        }

        let bounds = slots
            .iter()
            .map(|(_, _, rect)| *rect)
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or_default();

        Ok(PositionedGraph {
            nodes,
            edges,
            bounds,
        })
    }
}

/// Lay out with the default configuration
///
/// # Errors
/// See [`LayoutEngine::layout`].
pub fn layout(graph: &FlowGraph) -> Result<PositionedGraph, LayoutError> {
    LayoutEngine::default().layout(graph)
}
