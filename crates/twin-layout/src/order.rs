//! Crossing reduction
//!
//! Barycenter heuristic: each sweep re-sorts a layer by the mean position of
//! its neighbours in the adjacent layer. Forward sweeps use predecessors,
//! backward sweeps successors. The order with the fewest crossings seen so
//! far is kept, starting from input order.

use crate::arena::Arena;
use petgraph::graph::NodeIndex;

/// Neighbour lists restricted to adjacent layers
struct Adjacency {
    /// Per node index, forward predecessors one rank up
    up: Vec<Vec<NodeIndex>>,
    /// Per node index, forward successors one rank down
    down: Vec<Vec<NodeIndex>>,
}

impl Adjacency {
    fn new(arena: &Arena) -> Self {
        let n = arena.graph.node_count();
        let mut up = vec![Vec::new(); n];
        let mut down = vec![Vec::new(); n];
        for (u, v) in arena.forward_edges() {
            if arena.rank[v.index()] == arena.rank[u.index()] + 1 {
                down[u.index()].push(v);
                up[v.index()].push(u);
            }
        }
        Self { up, down }
    }
}

/// Result of crossing reduction
#[derive(Debug)]
pub(crate) struct Ordering {
    pub(crate) layers: Vec<Vec<NodeIndex>>,
    pub(crate) crossings: usize,
}

/// Order every layer, keeping the best arrangement found
pub(crate) fn order_layers(arena: &Arena, passes: usize) -> Ordering {
    let adjacency = Adjacency::new(arena);
    let mut layers = arena.layers();
    let mut position = vec![0usize; arena.graph.node_count()];
    refresh_positions(&layers, &mut position);

    let mut best_crossings = count_crossings(&layers, &adjacency, &position);
    let mut best = layers.clone();

    for pass in 0..passes {
        if best_crossings == 0 {
            break;
        }
        for r in 1..layers.len() {
            sort_by_barycenter(&mut layers[r], &adjacency.up, &position);
            refresh_positions(&layers, &mut position);
        }
        for r in (0..layers.len().saturating_sub(1)).rev() {
            sort_by_barycenter(&mut layers[r], &adjacency.down, &position);
            refresh_positions(&layers, &mut position);
        }

        let crossings = count_crossings(&layers, &adjacency, &position);
        tracing::trace!(pass, crossings, "ordering sweep");
        if crossings < best_crossings {
            best_crossings = crossings;
            best = layers.clone();
        }
    }

    Ordering {
        layers: best,
        crossings: best_crossings,
    }
}

fn refresh_positions(layers: &[Vec<NodeIndex>], position: &mut [usize]) {
    for layer in layers {
        for (i, ix) in layer.iter().enumerate() {
            position[ix.index()] = i;
        }
    }
}

/// Stable sort so ties and neighbourless nodes keep their relative order
#[allow(clippy::cast_precision_loss)]
fn sort_by_barycenter(layer: &mut [NodeIndex], neighbours: &[Vec<NodeIndex>], position: &[usize]) {
    let mut keyed: Vec<(f64, NodeIndex)> = layer
        .iter()
        .map(|&ix| {
            let adjacent = &neighbours[ix.index()];
            let key = if adjacent.is_empty() {
                position[ix.index()] as f64
            } else {
                let sum: usize = adjacent.iter().map(|n| position[n.index()]).sum();
                sum as f64 / adjacent.len() as f64
            };
            (key, ix)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    for (slot, (_, ix)) in layer.iter_mut().zip(keyed) {
        *slot = ix;
    }
}

/// Pairwise crossings between every pair of adjacent layers
fn count_crossings(layers: &[Vec<NodeIndex>], adjacency: &Adjacency, position: &[usize]) -> usize {
    let mut total = 0;
    for layer in layers {
        let mut segments: Vec<(usize, usize)> = Vec::new();
        for &u in layer {
            for &v in &adjacency.down[u.index()] {
                segments.push((position[u.index()], position[v.index()]));
            }
        }
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if (a.0 < b.0 && a.1 > b.1) || (a.0 > b.0 && a.1 < b.1) {
                    total += 1;
                }
            }
        }
    }
    total
}
