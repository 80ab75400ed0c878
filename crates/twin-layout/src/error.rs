//! Layout errors
//!
//! A validated artifact never triggers the graph variants; they exist so
//! the engine refuses unresolved input instead of producing a partial
//! diagram or panicking.

/// Layout precondition violations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Two nodes share an id
    #[error("duplicate node id `{id}`")]
    DuplicateNode { id: String },

    /// An edge endpoint names no declared node
    #[error("edge {index} references undeclared node `{id}`")]
    UnresolvedEdge { index: usize, id: String },

    /// Geometry cannot produce a non-overlapping layout
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),
}
