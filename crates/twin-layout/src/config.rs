//! Layout configuration

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};

/// Flow direction of the diagram
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Ranks grow downwards
    #[default]
    #[serde(rename = "TB", alias = "top-to-bottom")]
    TopToBottom,
    /// Ranks grow to the right
    #[serde(rename = "LR", alias = "left-to-right")]
    LeftToRight,
}

/// Geometry and effort parameters (layout units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub direction: LayoutDirection,
    /// Fixed node footprint width
    pub node_width: f64,
    /// Fixed node footprint height
    pub node_height: f64,
    /// Clear space between consecutive ranks
    pub rank_gap: f64,
    /// Clear space between neighbours within a rank
    pub node_gap: f64,
    /// Barycenter sweeps (one forward plus one backward each)
    pub ordering_passes: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::TopToBottom,
            node_width: 172.0,
            node_height: 36.0,
            rank_gap: 80.0,
            node_gap: 40.0,
            ordering_passes: 4,
        }
    }
}

impl LayoutConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With direction
    #[inline]
    #[must_use]
    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// With node footprint
    #[inline]
    #[must_use]
    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    /// With gaps between ranks and between nodes of a rank
    #[inline]
    #[must_use]
    pub fn with_gaps(mut self, rank_gap: f64, node_gap: f64) -> Self {
        self.rank_gap = rank_gap;
        self.node_gap = node_gap;
        self
    }

    /// Check the geometry can produce a non-overlapping layout
    ///
    /// # Errors
    /// `LayoutError::InvalidConfig` for non-finite values, non-positive node
    /// sizes or negative gaps.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let sizes = [("node_width", self.node_width), ("node_height", self.node_height)];
        for (name, value) in sizes {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        let gaps = [("rank_gap", self.rank_gap), ("node_gap", self.node_gap)];
        for (name, value) in gaps {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be zero or positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}
