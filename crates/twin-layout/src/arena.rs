//! Indexed graph arena, cycle breaking and rank assignment
//!
//! Nodes and edges live in a petgraph `DiGraph` whose weights are indices
//! into the input `FlowGraph`, so every later phase works on integers and
//! maps back to input order cheaply.

use crate::error::LayoutError;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{depth_first_search, DfsEvent, EdgeRef};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use twin_model::FlowGraph;

/// Resolved graph with back edges classified and ranks assigned
#[derive(Debug)]
pub(crate) struct Arena {
    /// Node weight: input node index. Edge weight: input edge index.
    pub(crate) graph: DiGraph<usize, usize>,
    /// Per input edge, true when it closes a cycle
    pub(crate) back: Vec<bool>,
    /// Per node index, its layer
    pub(crate) rank: Vec<usize>,
}

impl Arena {
    /// Resolve ids, break cycles and assign longest-path ranks
    ///
    /// # Errors
    /// `DuplicateNode` or `UnresolvedEdge` when ids do not resolve.
    pub(crate) fn build(flow: &FlowGraph) -> Result<Self, LayoutError> {
        let mut graph = DiGraph::with_capacity(flow.nodes.len(), flow.edges.len());
        let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(flow.nodes.len());

        for (i, node) in flow.nodes.iter().enumerate() {
            let ix = graph.add_node(i);
            if index.insert(node.id.as_str(), ix).is_some() {
                return Err(LayoutError::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        for (i, edge) in flow.edges.iter().enumerate() {
            let lookup = |id: &str| {
                index
                    .get(id)
                    .copied()
                    .ok_or_else(|| LayoutError::UnresolvedEdge {
                        index: i,
                        id: id.to_string(),
                    })
            };
            let source = lookup(&edge.source_id)?;
            let target = lookup(&edge.target_id)?;
            graph.add_edge(source, target, i);
        }

        let (back, topo) = break_cycles(&graph);
        let rank = assign_ranks(&graph, &back, &topo);

        Ok(Self { graph, back, rank })
    }

    /// Number of layers
    pub(crate) fn rank_count(&self) -> usize {
        self.rank.iter().max().map_or(0, |max| max + 1)
    }

    /// Node indices grouped by rank, each layer in input order
    pub(crate) fn layers(&self) -> Vec<Vec<NodeIndex>> {
        let mut layers = vec![Vec::new(); self.rank_count()];
        for ix in self.graph.node_indices() {
            layers[self.rank[ix.index()]].push(ix);
        }
        layers
    }

    /// Forward edges as (source, target) node indices, in input edge order
    pub(crate) fn forward_edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_references()
            .filter(|e| !self.back[*e.weight()])
            .map(|e| (e.source(), e.target()))
    }

    pub(crate) fn back_edge_count(&self) -> usize {
        self.back.iter().filter(|b| **b).count()
    }
}

/// Classify back edges with a depth-first search
///
/// Roots are tried sources first, then every node, both in input order, so
/// pure cycles still get visited and the result depends only on input order.
/// Returns the back-edge flags and a topological order of the remaining DAG.
fn break_cycles(graph: &DiGraph<usize, usize>) -> (Vec<bool>, Vec<NodeIndex>) {
    let sources = graph
        .node_indices()
        .filter(|ix| graph.neighbors_directed(*ix, Direction::Incoming).next().is_none());
    let roots: Vec<NodeIndex> = sources.chain(graph.node_indices()).collect();

    let mut back_pairs: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();
    let mut finished: Vec<NodeIndex> = Vec::with_capacity(graph.node_count());
    depth_first_search(graph, roots, |event| match event {
        DfsEvent::BackEdge(u, v) => {
            back_pairs.insert((u, v));
        }
        DfsEvent::Finish(u, _) => finished.push(u),
        _ => {}
    });

    // Parallel edges share a classification: the second copy of a tree edge
    // is seen after its target finished, the second copy of a back edge while
    // the target is still open.
    let mut back = vec![false; graph.edge_count()];
    for edge in graph.edge_references() {
        if back_pairs.contains(&(edge.source(), edge.target())) {
            back[*edge.weight()] = true;
        }
    }

    finished.reverse();
    (back, finished)
}

/// Longest path from any rank-0 node over forward edges
fn assign_ranks(graph: &DiGraph<usize, usize>, back: &[bool], topo: &[NodeIndex]) -> Vec<usize> {
    let mut rank = vec![0usize; graph.node_count()];
    for &u in topo {
        let next = rank[u.index()] + 1;
        for edge in graph.edges_directed(u, Direction::Outgoing) {
            if back[*edge.weight()] {
                continue;
            }
            let v = edge.target().index();
            if rank[v] < next {
                rank[v] = next;
            }
        }
    }
    rank
}
