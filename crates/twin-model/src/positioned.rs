//! Positioned graph types
//!
//! Derived, transient view of a [`FlowGraph`](crate::FlowGraph) with
//! concrete coordinates. Never persisted; recomputed whenever the graph
//! changes.

use crate::graph::NodeKind;
use serde::Serialize;

/// A point in layout space
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a node footprint
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle; `x`/`y` is the top-left corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Rectangle at `origin` with `size`
    #[inline]
    #[must_use]
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True if the interiors overlap; touching edges do not count
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Bounding union of two rectangles
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// A flow node with its computed placement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    /// Layer index (longest path from a source)
    pub rank: usize,
    /// Position within the layer after crossing reduction
    pub order: usize,
    /// Top-left corner
    pub position: Point,
    pub size: Size,
}

impl PositionedNode {
    #[inline]
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

/// A flow edge with resolved endpoint coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEdge {
    pub source_id: String,
    pub target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub source_point: Point,
    pub target_point: Point,
    /// Excluded from ranking to break a cycle; still rendered
    pub back_edge: bool,
}

/// Every node and edge of a flow graph, placed
///
/// Nodes and edges keep the input order of the source graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionedGraph {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<PositionedEdge>,
    /// Bounding box of all nodes; zero-sized when empty
    pub bounds: Rect,
}

impl PositionedGraph {
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a placed node by id
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Number of layers
    #[must_use]
    pub fn rank_count(&self) -> usize {
        self.nodes.iter().map(|n| n.rank + 1).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64) -> Rect {
        Rect::new(
            Point::new(x, y),
            Size {
                width: 10.0,
                height: 5.0,
            },
        )
    }

    #[test]
    fn overlap_excludes_touching() {
        assert!(rect(0.0, 0.0).overlaps(&rect(5.0, 2.0)));
        assert!(!rect(0.0, 0.0).overlaps(&rect(10.0, 0.0)));
        assert!(!rect(0.0, 0.0).overlaps(&rect(0.0, 5.0)));
    }

    #[test]
    fn union_and_center() {
        let u = rect(0.0, 0.0).union(&rect(20.0, 10.0));
        assert_eq!(u.width, 30.0);
        assert_eq!(u.height, 15.0);
        assert_eq!(rect(0.0, 0.0).center(), Point::new(5.0, 2.5));
    }

    #[test]
    fn empty_graph_has_no_ranks() {
        let graph = PositionedGraph::default();
        assert!(graph.is_empty());
        assert_eq!(graph.rank_count(), 0);
    }
}
