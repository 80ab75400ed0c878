//! Strategic Twin data model
//!
//! Pure data types shared by every other crate in the workspace:
//! - [`StrategicArtifact`]: the validated output of one simulation request
//! - [`FlowGraph`]: the abstract implementation plan (nodes + directed edges)
//! - [`PositionedGraph`]: the flow graph with concrete 2-D coordinates
//!
//! Closed enumerations ([`Archetype`], [`ThreatLevel`], [`RiskLevel`],
//! [`NodeKind`]) implement [`ClosedSet`], which is the single authority for
//! their wire spellings. The prompt builder and the response validator both
//! read from it.
//!
//! None of these types implement `Deserialize`. The only way to obtain a
//! [`StrategicArtifact`] from model output is the response validator.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

#[macro_use]
mod closed;

mod artifact;
mod graph;
mod positioned;

pub use artifact::{
    Archetype, CompetitorProfile, RiskLevel, RiskMatrix, Scenario, StrategicArtifact,
    ThreatLevel,
};
pub use closed::ClosedSet;
pub use graph::{FlowEdge, FlowGraph, FlowNode, NodeKind};
pub use positioned::{Point, PositionedEdge, PositionedGraph, PositionedNode, Rect, Size};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
