//! credgraph library
//!
//! A small typed provenance graph describing how cluster configuration and
//! credentials flow into the kube-controller-manager pod, a DOT renderer for
//! it, and the metrics client factory used alongside it.

pub mod config;
pub mod graph;
pub mod kube;
pub mod metrics;
pub mod resources;

pub use graph::{
    Annotation, ConstructionError, Coordinate, DisplayKind, Graph, Node, NodeDraft, RenderError,
    render_dot,
};
