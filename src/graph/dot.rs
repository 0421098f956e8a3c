//! DOT serialization
//!
//! Output is meant to be committed and reviewed as a diff, so the layout is
//! fixed: vertex statements in commit order, then edge statements in node
//! order and source order, two-space indentation, no attributes.

use super::{Graph, RenderError};
use std::collections::HashMap;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Quote a string as a DOT identifier
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Render `graph` as a DOT digraph named `title`
///
/// Every edge is checked before anything is emitted: an edge to a
/// coordinate missing from the graph, or two nodes sharing a label, fails
/// the whole render.
pub fn render_dot(graph: &Graph, title: &str) -> Result<String, RenderError> {
    let mut labels = HashMap::with_capacity(graph.len());
    let mut owners = HashMap::with_capacity(graph.len());
    for node in graph.nodes() {
        let label = quote(&node.label());
        if let Some(first) = owners.insert(label.clone(), node.coordinate()) {
            return Err(RenderError::LabelCollision {
                label: node.label(),
                first: first.clone(),
                second: node.coordinate().clone(),
            });
        }
        labels.insert(node.coordinate(), label);
    }

    let mut edges = Vec::new();
    for edge in graph.edges() {
        let from = labels
            .get(edge.from)
            .ok_or_else(|| RenderError::DanglingEdge {
                coordinate: edge.to.clone(),
                predecessor: edge.from.clone(),
            })?;
        let to = &labels[edge.to];
        edges.push((from, to));
    }

    let mut out = String::new();
    writeln!(out, "digraph {} {{", quote(title))?;
    for node in graph.nodes() {
        writeln!(out, "{}{};", INDENT, labels[node.coordinate()])?;
    }
    for (from, to) in &edges {
        writeln!(out, "{}{} -> {};", INDENT, from, to)?;
    }
    writeln!(out, "}}")?;

    tracing::debug!(
        "Rendered {} node(s) and {} edge(s) for {}",
        graph.len(),
        edges.len(),
        title
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Coordinate, DisplayKind, Node};

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn test_dangling_edge_is_rejected() {
        let mut graph = Graph::new();
        let target = Coordinate::new("", "secrets", "ns", "target");
        let missing = Coordinate::new("", "secrets", "ns", "missing");
        graph.node_index.insert(target.clone(), 0);
        graph.nodes.push(Node {
            coordinate: target.clone(),
            kind: DisplayKind::Secret,
            annotation: None,
            predecessors: vec![missing.clone()],
        });

        let err = render_dot(&graph, "t").unwrap_err();
        match err {
            RenderError::DanglingEdge {
                coordinate,
                predecessor,
            } => {
                assert_eq!(coordinate, target);
                assert_eq!(predecessor, missing);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_similar_coordinates_render_apart() {
        let mut graph = Graph::new();
        Node::resource(Coordinate::new("", "Installer", "cluster", ""))
            .commit(&mut graph)
            .unwrap();
        Node::resource(Coordinate::new("", "Installer", "", "cluster"))
            .commit(&mut graph)
            .unwrap();
        Node::resource(Coordinate::new("a.b", "x", "", "n"))
            .commit(&mut graph)
            .unwrap();
        Node::resource(Coordinate::new("b", "x.a", "", "n"))
            .commit(&mut graph)
            .unwrap();

        let dot = render_dot(&graph, "t").unwrap();
        assert!(dot.contains("  \"Resource /Installer/cluster/\";\n"));
        assert!(dot.contains("  \"Resource /Installer//cluster\";\n"));
        assert!(dot.contains("  \"Resource a.b/x//n\";\n"));
        assert!(dot.contains("  \"Resource b/x.a//n\";\n"));
    }

    #[test]
    fn test_label_collision_is_rejected() {
        // Only reachable by bypassing insert, which keeps coordinates unique.
        let mut graph = Graph::new();
        let coordinate = Coordinate::new("", "secrets", "ns", "twice");
        for _ in 0..2 {
            graph.nodes.push(Node {
                coordinate: coordinate.clone(),
                kind: DisplayKind::Secret,
                annotation: None,
                predecessors: Vec::new(),
            });
        }
        graph.node_index.insert(coordinate, 1);

        let err = render_dot(&graph, "t").unwrap_err();
        assert!(matches!(err, RenderError::LabelCollision { .. }));
    }
}
