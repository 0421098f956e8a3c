//! The owning collection of committed nodes
//!
//! Nodes are kept in a vector in commit order, with a coordinate index on
//! the side. Enumeration never goes through the index, so node and edge
//! order is identical across runs.

use super::{ConstructionError, Coordinate, Node};
use std::collections::{HashMap, HashSet};

/// A directed derives-from relation, pointing from source to dependent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    /// The upstream node the value comes from
    pub from: &'a Coordinate,
    /// The node whose value is derived
    pub to: &'a Coordinate,
}

/// A provenance graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// All nodes in commit order
    pub(crate) nodes: Vec<Node>,
    /// Map from coordinate to index in nodes vector
    pub(crate) node_index: HashMap<Coordinate, usize>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in the order they were first committed
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, coordinate: &Coordinate) -> Option<&Node> {
        self.node_index.get(coordinate).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.node_index.contains_key(coordinate)
    }

    /// Every derives-from edge: node order first, then predecessor order
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.nodes.iter().flat_map(|node| {
            node.predecessors.iter().map(move |from| Edge {
                from,
                to: &node.coordinate,
            })
        })
    }

    /// Nodes that derive from nothing
    pub fn roots(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|node| node.predecessors.is_empty())
    }

    /// Nodes that list `coordinate` among their sources, in commit order
    pub fn dependents<'a>(
        &'a self,
        coordinate: &'a Coordinate,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes
            .iter()
            .filter(move |node| node.predecessors.contains(coordinate))
    }

    /// Indented tree from each root down through its dependents
    ///
    /// A node reachable along several paths appears once per path.
    pub fn dump(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for root in self.roots() {
            self.dump_into(root, 0, &mut lines);
        }
        lines
    }

    fn dump_into(&self, node: &Node, depth: usize, lines: &mut Vec<String>) {
        lines.push(format!("{}{}", "  ".repeat(depth), node.label()));
        for dependent in self.dependents(&node.coordinate) {
            self.dump_into(dependent, depth + 1, lines);
        }
    }

    /// Register a node, or merge it into an identical earlier declaration
    pub(crate) fn insert(&mut self, node: Node) -> Result<Node, ConstructionError> {
        for predecessor in &node.predecessors {
            if !self.contains(predecessor) {
                return Err(ConstructionError::UnknownPredecessor {
                    coordinate: node.coordinate.clone(),
                    predecessor: predecessor.clone(),
                });
            }
        }

        let Some(&idx) = self.node_index.get(&node.coordinate) else {
            tracing::debug!(
                "Committing {} with {} source(s)",
                node.coordinate,
                node.predecessors.len()
            );
            self.node_index
                .insert(node.coordinate.clone(), self.nodes.len());
            self.nodes.push(node.clone());
            return Ok(node);
        };

        let existing = &self.nodes[idx];
        if existing.kind != node.kind || existing.annotation != node.annotation {
            return Err(ConstructionError::Conflict {
                coordinate: node.coordinate,
            });
        }

        for predecessor in node.predecessors {
            if self.nodes[idx].predecessors.contains(&predecessor) {
                continue;
            }
            if predecessor == node.coordinate || self.has_ancestor(&predecessor, &node.coordinate)
            {
                return Err(ConstructionError::Cycle {
                    coordinate: node.coordinate,
                    predecessor,
                });
            }
            tracing::debug!("Merging source {} into {}", predecessor, node.coordinate);
            self.nodes[idx].predecessors.push(predecessor);
        }

        Ok(self.nodes[idx].clone())
    }

    /// Whether `ancestor` is reachable by walking sources upward from `start`
    fn has_ancestor(&self, start: &Coordinate, ancestor: &Coordinate) -> bool {
        let mut stack = vec![start];
        let mut visited = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(node) = self.node(current) {
                stack.extend(node.predecessors.iter());
            }
        }
        false
    }
}
