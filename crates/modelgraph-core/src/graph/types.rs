//! Types for materialized dependency graphs.

use std::fmt;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Which relation a walk follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// From a symbol to what it references.
    Dependencies,
    /// From a symbol to the definitions that reference it.
    Dependents,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Dependencies => f.write_str("dependencies"),
            Direction::Dependents => f.write_str("dependents"),
        }
    }
}

/// The subgraph reachable from one root symbol.
///
/// A fresh snapshot owned by the caller; edges go from the symbol being
/// expanded to each symbol found under the chosen [`Direction`].
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    root: Symbol,
    direction: Direction,
    graph: DiGraph<Symbol, Direction>,
    node_indices: FxHashMap<Symbol, NodeIndex>,
}

impl DependencyGraph {
    pub(crate) fn new(root: &str, direction: Direction) -> Self {
        Self {
            root: root.to_string(),
            direction,
            graph: DiGraph::new(),
            node_indices: FxHashMap::default(),
        }
    }

    pub(crate) fn add_edge(&mut self, from: &str, to: &str) {
        let from = self.node(from);
        let to = self.node(to);
        self.graph.update_edge(from, to, self.direction);
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_indices.insert(name.to_string(), idx);
        idx
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when the root had nothing to expand.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_indices.get(from), self.node_indices.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Node names, in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// `(from, to)` pairs, in discovery order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    /// The underlying petgraph graph, for callers that run their own algorithms.
    pub fn as_petgraph(&self) -> &DiGraph<Symbol, Direction> {
        &self.graph
    }

    /// Graphviz DOT text for external renderers.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    /// A plain snapshot suitable for JSON hand-off.
    pub fn export(&self) -> GraphExport {
        GraphExport {
            root: self.root.clone(),
            direction: self.direction,
            nodes: self.nodes().map(str::to_string).collect(),
            edges: self
                .edges()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

/// Serializable form of a [`DependencyGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub root: Symbol,
    pub direction: Direction,
    pub nodes: Vec<Symbol>,
    pub edges: Vec<(Symbol, Symbol)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_is_empty() {
        let graph = DependencyGraph::new("x", Direction::Dependencies);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.root(), "x");
    }

    #[test]
    fn test_add_edge_reuses_nodes() {
        let mut graph = DependencyGraph::new("a", Direction::Dependencies);
        graph.add_edge("a", "b");
        graph.add_edge("a", "c");
        graph.add_edge("b", "c");
        graph.add_edge("b", "c");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.contains_edge("b", "c"));
        assert!(!graph.contains_edge("c", "b"));
        assert!(!graph.contains_edge("a", "zzz"));
    }

    #[test]
    fn test_dot_output_lists_nodes() {
        let mut graph = DependencyGraph::new("g_Na", Direction::Dependents);
        graph.add_edge("g_Na", "i_Na");
        let dot = graph.to_dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("g_Na"));
        assert!(dot.contains("i_Na"));
        assert!(dot.contains("->"));
    }

    #[test]
    fn test_export_serializes() {
        let mut graph = DependencyGraph::new("a", Direction::Dependencies);
        graph.add_edge("a", "b");
        let json = serde_json::to_value(graph.export()).unwrap();
        assert_eq!(json["root"], "a");
        assert_eq!(json["direction"], "dependencies");
        assert_eq!(json["edges"][0][1], "b");
    }
}
