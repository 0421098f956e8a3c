//! Dependency-provenance graph
//!
//! Documents how configuration and credentials flow from upstream actors
//! through producing and synchronizing components into the artifacts that
//! consume them. A graph is built once from static declarations and
//! rendered once to DOT.
//!
//! Edges point from source to dependent: when B derives from A the rendered
//! statement is `A -> B`.

mod coordinate;
mod dot;
mod error;
mod node;
mod store;

pub use coordinate::Coordinate;
pub use dot::{quote, render_dot};
pub use error::{ConstructionError, RenderError};
pub use node::{Annotation, CONFIG_API_GROUP, DisplayKind, Node, NodeDraft};
pub use store::{Edge, Graph};
