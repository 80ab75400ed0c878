//! Coordinate assignment and edge anchoring

use crate::config::{LayoutConfig, LayoutDirection};
use petgraph::graph::NodeIndex;
use twin_model::{Point, Rect, Size};

/// Which face of a node an edge attaches to, relative to the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// Facing the previous rank
    Upstream,
    /// Facing the next rank
    Downstream,
    /// Facing earlier nodes of the same rank
    Leading,
    /// Facing later nodes of the same rank
    Trailing,
}

/// Maps (rank, order) slots to rectangles for one configuration
#[derive(Debug)]
pub(crate) struct Placer {
    config: LayoutConfig,
    widest: usize,
}

impl Placer {
    /// `layers` gives the final per-rank order
    pub(crate) fn new(config: LayoutConfig, layers: &[Vec<NodeIndex>]) -> Self {
        let widest = layers.iter().map(Vec::len).max().unwrap_or(0);
        Self { config, widest }
    }

    pub(crate) fn size(&self) -> Size {
        Size::new(self.config.node_width, self.config.node_height)
    }

    /// Extent of a node along the rank axis
    fn primary_extent(&self) -> f64 {
        match self.config.direction {
            LayoutDirection::TopToBottom => self.config.node_height,
            LayoutDirection::LeftToRight => self.config.node_width,
        }
    }

    /// Extent of a node along the in-rank axis
    fn secondary_extent(&self) -> f64 {
        match self.config.direction {
            LayoutDirection::TopToBottom => self.config.node_width,
            LayoutDirection::LeftToRight => self.config.node_height,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn span(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        count as f64 * self.secondary_extent() + (count - 1) as f64 * self.config.node_gap
    }

    /// Top-left corner of the slot, each rank centred against the widest
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn rect(&self, rank: usize, order: usize, layer_len: usize) -> Rect {
        let primary = rank as f64 * (self.primary_extent() + self.config.rank_gap);
        let shift = (self.span(self.widest) - self.span(layer_len)) / 2.0;
        let secondary =
            shift + order as f64 * (self.secondary_extent() + self.config.node_gap);
        let origin = match self.config.direction {
            LayoutDirection::TopToBottom => Point::new(secondary, primary),
            LayoutDirection::LeftToRight => Point::new(primary, secondary),
        };
        Rect::new(origin, self.size())
    }

    /// Midpoint of the given face
    pub(crate) fn anchor(&self, rect: &Rect, side: Side) -> Point {
        let center = rect.center();
        match (self.config.direction, side) {
            (LayoutDirection::TopToBottom, Side::Upstream) => Point::new(center.x, rect.y),
            (LayoutDirection::TopToBottom, Side::Downstream) => Point::new(center.x, rect.bottom()),
            (LayoutDirection::TopToBottom, Side::Leading) => Point::new(rect.x, center.y),
            (LayoutDirection::TopToBottom, Side::Trailing) => Point::new(rect.right(), center.y),
            (LayoutDirection::LeftToRight, Side::Upstream) => Point::new(rect.x, center.y),
            (LayoutDirection::LeftToRight, Side::Downstream) => Point::new(rect.right(), center.y),
            (LayoutDirection::LeftToRight, Side::Leading) => Point::new(center.x, rect.y),
            (LayoutDirection::LeftToRight, Side::Trailing) => Point::new(center.x, rect.bottom()),
        }
    }
}

/// Faces for an edge between slots `(rank, order)`
///
/// Edges pointing down the flow leave the downstream face, edges pointing
/// back up leave the upstream face, same-rank edges use the in-rank faces.
/// A self loop starts and ends on the trailing face, outside the node body.
pub(crate) fn edge_sides(source: (usize, usize), target: (usize, usize)) -> (Side, Side) {
    use std::cmp::Ordering::{Equal, Greater, Less};
    match (source.0.cmp(&target.0), source.1.cmp(&target.1)) {
        (Equal, Equal) => (Side::Trailing, Side::Trailing),
        (Less, _) => (Side::Downstream, Side::Upstream),
        (Greater, _) => (Side::Upstream, Side::Downstream),
        (Equal, Less) => (Side::Trailing, Side::Leading),
        (Equal, Greater) => (Side::Leading, Side::Trailing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placer(direction: LayoutDirection, widest: usize) -> Placer {
        let config = LayoutConfig::new()
            .with_direction(direction)
            .with_node_size(100.0, 20.0)
            .with_gaps(30.0, 10.0);
        let layers = vec![vec![NodeIndex::new(0); widest]];
        Placer::new(config, &layers)
    }

    #[test]
    fn narrow_rank_is_centred() {
        let p = placer(LayoutDirection::TopToBottom, 3);
        // widest span 3*100 + 2*10 = 320, single node span 100
        let rect = p.rect(1, 0, 1);
        assert_eq!(rect.x, 110.0);
        assert_eq!(rect.y, 50.0);
    }

    #[test]
    fn left_to_right_swaps_axes() {
        let p = placer(LayoutDirection::LeftToRight, 1);
        let rect = p.rect(2, 0, 1);
        assert_eq!(rect.x, 2.0 * 130.0);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn anchors_follow_direction() {
        let p = placer(LayoutDirection::TopToBottom, 1);
        let rect = p.rect(0, 0, 1);
        assert_eq!(p.anchor(&rect, Side::Downstream), Point::new(50.0, 20.0));
        assert_eq!(p.anchor(&rect, Side::Upstream), Point::new(50.0, 0.0));

        let p = placer(LayoutDirection::LeftToRight, 1);
        assert_eq!(p.anchor(&rect, Side::Downstream), Point::new(100.0, 10.0));
    }

    #[test]
    fn sides_by_relative_slot() {
        assert_eq!(edge_sides((0, 0), (1, 0)), (Side::Downstream, Side::Upstream));
        assert_eq!(edge_sides((2, 0), (1, 3)), (Side::Upstream, Side::Downstream));
        assert_eq!(edge_sides((1, 0), (1, 2)), (Side::Trailing, Side::Leading));
        assert_eq!(edge_sides((1, 2), (1, 0)), (Side::Leading, Side::Trailing));
        assert_eq!(edge_sides((1, 1), (1, 1)), (Side::Trailing, Side::Trailing));
    }
}
