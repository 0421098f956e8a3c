//! Errors raised while building or rendering a provenance graph

use super::Coordinate;
use thiserror::Error;

/// A defect in a graph declaration
///
/// These are always fatal to the current render: the declarations are
/// static, so a failure here means the builder itself is wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("{coordinate} is already declared with different content")]
    Conflict { coordinate: Coordinate },

    #[error("{coordinate} derives from {predecessor}, which is not in the graph")]
    UnknownPredecessor {
        coordinate: Coordinate,
        predecessor: Coordinate,
    },

    #[error("{coordinate} deriving from {predecessor} would create a cycle")]
    Cycle {
        coordinate: Coordinate,
        predecessor: Coordinate,
    },

    #[error("unknown provenance annotation: {0}")]
    UnknownAnnotation(String),
}

/// Failure to serialize a graph
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("edge from {predecessor} to {coordinate} references a node that is not in the graph")]
    DanglingEdge {
        coordinate: Coordinate,
        predecessor: Coordinate,
    },

    #[error("{first} and {second} both render as \"{label}\"")]
    LabelCollision {
        label: String,
        first: Coordinate,
        second: Coordinate,
    },

    #[error("failed to write DOT output")]
    Format(#[from] std::fmt::Error),
}
