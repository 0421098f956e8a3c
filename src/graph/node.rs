//! Graph nodes and the draft builder used to declare them
//!
//! A node is assembled as a [`NodeDraft`] (sources, annotation) and frozen
//! into an immutable [`Node`] when it is committed to a [`Graph`].

use super::{ConstructionError, Coordinate, Graph};
use std::fmt;
use std::str::FromStr;

/// API group of OpenShift cluster-scoped configuration and operator resources
pub const CONFIG_API_GROUP: &str = "config.openshift.io";

/// How a resource's value is produced or propagated
///
/// Documentation labels only: nothing here enforces the behavior they name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// Fixed at install time, never changes
    Static,
    /// Periodically regenerated by a controller
    Rotated,
    /// Copied verbatim from another namespace or location
    Synchronized,
    /// Derived by stripping or transforming a source secret
    Reduced,
    /// Combined from two or more sources
    Unioned,
    /// Computed or observed configuration
    Managed,
}

impl Annotation {
    pub const ALL: [Annotation; 6] = [
        Annotation::Static,
        Annotation::Rotated,
        Annotation::Synchronized,
        Annotation::Reduced,
        Annotation::Unioned,
        Annotation::Managed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Annotation::Static => "Static",
            Annotation::Rotated => "Rotated",
            Annotation::Synchronized => "Synchronized",
            Annotation::Reduced => "Reduced",
            Annotation::Unioned => "Unioned",
            Annotation::Managed => "Managed",
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Annotation {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Annotation::ALL
            .into_iter()
            .find(|annotation| annotation.as_str() == s)
            .ok_or_else(|| ConstructionError::UnknownAnnotation(s.to_string()))
    }
}

/// Rendered kind tag of a node
///
/// All variants behave identically; they differ only in the coordinate
/// defaults their constructors pick and in the label they render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayKind {
    Operator,
    Config,
    Secret,
    ConfigMap,
    GenericResource,
}

impl DisplayKind {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayKind::Operator => "Operator",
            DisplayKind::Config => "Config",
            DisplayKind::Secret => "Secret",
            DisplayKind::ConfigMap => "ConfigMap",
            DisplayKind::GenericResource => "Resource",
        }
    }
}

impl fmt::Display for DisplayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A committed vertex of the provenance graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) coordinate: Coordinate,
    pub(crate) kind: DisplayKind,
    pub(crate) annotation: Option<Annotation>,
    pub(crate) predecessors: Vec<Coordinate>,
}

impl Node {
    /// Start a draft for an arbitrary resource or actor
    pub fn resource(coordinate: Coordinate) -> NodeDraft {
        NodeDraft::new(coordinate, DisplayKind::GenericResource)
    }

    /// Start a draft for a cluster operator
    pub fn operator(name: &str) -> NodeDraft {
        NodeDraft::new(
            Coordinate::new(CONFIG_API_GROUP, "clusteroperators", "", name),
            DisplayKind::Operator,
        )
    }

    /// Start a draft for a cluster-scoped config singleton (always named `cluster`)
    pub fn config(resource: &str) -> NodeDraft {
        NodeDraft::new(
            Coordinate::new(CONFIG_API_GROUP, resource, "", "cluster"),
            DisplayKind::Config,
        )
    }

    pub fn secret(namespace: &str, name: &str) -> NodeDraft {
        NodeDraft::new(
            Coordinate::new("", "secrets", namespace, name),
            DisplayKind::Secret,
        )
    }

    pub fn config_map(namespace: &str, name: &str) -> NodeDraft {
        NodeDraft::new(
            Coordinate::new("", "configmaps", namespace, name),
            DisplayKind::ConfigMap,
        )
    }

    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    pub fn kind(&self) -> DisplayKind {
        self.kind
    }

    pub fn annotation(&self) -> Option<Annotation> {
        self.annotation
    }

    /// Sources this node derives from, in declaration order
    pub fn predecessors(&self) -> &[Coordinate] {
        &self.predecessors
    }

    /// Human-readable label: display kind, coordinate, then annotation if any
    pub fn label(&self) -> String {
        match self.annotation {
            Some(annotation) => format!("{} {} ({})", self.kind, self.coordinate, annotation),
            None => format!("{} {}", self.kind, self.coordinate),
        }
    }
}

/// Mutable declaration of a node that has not been committed yet
#[derive(Debug, Clone)]
#[must_use = "a draft does nothing until it is committed to a graph"]
pub struct NodeDraft {
    coordinate: Coordinate,
    kind: DisplayKind,
    annotation: Option<Annotation>,
    predecessors: Vec<Coordinate>,
}

impl NodeDraft {
    pub fn new(coordinate: Coordinate, kind: DisplayKind) -> Self {
        Self {
            coordinate,
            kind,
            annotation: None,
            predecessors: Vec::new(),
        }
    }

    /// Set the provenance annotation, replacing any previous one
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Record that this node's value is derived from `source`
    ///
    /// Call order becomes edge emission order. Naming the same source twice
    /// records it once.
    pub fn derives_from(mut self, source: &Node) -> Self {
        if !self.predecessors.contains(&source.coordinate) {
            self.predecessors.push(source.coordinate.clone());
        }
        self
    }

    /// Freeze the draft and register it in `graph`
    ///
    /// Returns the committed node so later drafts can derive from it.
    pub fn commit(self, graph: &mut Graph) -> Result<Node, ConstructionError> {
        graph.insert(Node {
            coordinate: self.coordinate,
            kind: self.kind,
            annotation: self.annotation,
            predecessors: self.predecessors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_parse_round_trip() {
        for annotation in Annotation::ALL {
            assert_eq!(annotation.as_str().parse::<Annotation>(), Ok(annotation));
        }
    }

    #[test]
    fn test_annotation_rejects_typo() {
        let err = "Rotatted".parse::<Annotation>().unwrap_err();
        assert_eq!(err, ConstructionError::UnknownAnnotation("Rotatted".into()));
    }

    #[test]
    fn test_constructor_defaults() {
        let mut graph = Graph::new();
        let operator = Node::operator("network").commit(&mut graph).unwrap();
        assert_eq!(operator.coordinate().api_group, CONFIG_API_GROUP);
        assert_eq!(operator.coordinate().kind, "clusteroperators");
        assert_eq!(operator.kind(), DisplayKind::Operator);

        let config = Node::config("proxies").commit(&mut graph).unwrap();
        assert_eq!(config.coordinate().kind, "proxies");
        assert_eq!(config.coordinate().name, "cluster");

        let secret = Node::secret("ns", "s").commit(&mut graph).unwrap();
        assert_eq!(secret.coordinate(), &Coordinate::new("", "secrets", "ns", "s"));
    }

    #[test]
    fn test_with_annotation_overwrites() {
        let mut graph = Graph::new();
        let node = Node::config_map("ns", "ca")
            .with_annotation(Annotation::Static)
            .with_annotation(Annotation::Rotated)
            .commit(&mut graph)
            .unwrap();
        assert_eq!(node.annotation(), Some(Annotation::Rotated));
    }

    #[test]
    fn test_derives_from_same_source_once() {
        let mut graph = Graph::new();
        let source = Node::secret("ns", "src").commit(&mut graph).unwrap();
        let node = Node::secret("ns", "dst")
            .derives_from(&source)
            .derives_from(&source)
            .commit(&mut graph)
            .unwrap();
        assert_eq!(node.predecessors(), &[source.coordinate().clone()]);
    }

    #[test]
    fn test_label() {
        let mut graph = Graph::new();
        let node = Node::secret("openshift-config", "key")
            .with_annotation(Annotation::Static)
            .commit(&mut graph)
            .unwrap();
        assert_eq!(node.label(), "Secret /secrets/openshift-config/key (Static)");

        let payload = Node::resource(Coordinate::new("", "Payload", "", "cluster"))
            .commit(&mut graph)
            .unwrap();
        assert_eq!(payload.label(), "Resource /Payload//cluster");
    }
}
