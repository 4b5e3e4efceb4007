//! Worklist walks over the direct relation.
//!
//! Both walks use an explicit stack and a visited set, so every symbol is
//! expanded at most once regardless of cycles or shared sub-dependencies,
//! and depth is bounded by the number of symbols rather than the call stack.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;

use super::types::{DependencyGraph, Direction};
use crate::index::DependencyIndex;
use crate::Symbol;

/// All symbols reachable from `root` under `direction`.
///
/// The root is never part of its own closure, even when it sits on a cycle.
/// Unknown roots yield an empty set.
pub fn closure<'a>(index: &'a DependencyIndex, root: &'a str, direction: Direction) -> BTreeSet<Symbol> {
    reach(root, |node| index.neighbors(node, direction))
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Depth-first reachability. `neighbors` is called once for the root and
/// once for every symbol reached, never more.
fn reach<'a, F>(root: &'a str, mut neighbors: F) -> FxHashSet<&'a str>
where
    F: FnMut(&'a str) -> &'a BTreeSet<Symbol>,
{
    let mut visited: FxHashSet<&'a str> = FxHashSet::default();
    let mut stack: Vec<&'a str> = neighbors(root).iter().map(String::as_str).collect();

    while let Some(node) = stack.pop() {
        if node == root || !visited.insert(node) {
            continue;
        }
        stack.extend(
            neighbors(node)
                .iter()
                .map(String::as_str)
                .filter(|next| !visited.contains(next)),
        );
    }

    visited
}

/// Materialize every edge traversed while walking from `root`.
///
/// Returns an empty graph (no nodes, no edges) when `root` has nothing under
/// `direction`.
pub fn build_graph<'a>(index: &'a DependencyIndex, root: &'a str, direction: Direction) -> DependencyGraph {
    let mut graph = DependencyGraph::new(root, direction);
    let mut expanded: FxHashSet<&'a str> = FxHashSet::default();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if !expanded.insert(node) {
            continue;
        }
        for next in index.neighbors(node, direction) {
            graph.add_edge(node, next);
            if !expanded.contains(next.as_str()) {
                stack.push(next);
            }
        }
    }

    tracing::debug!(
        "Built {} graph for '{}': {} nodes, {} edges",
        direction,
        root,
        graph.node_count(),
        graph.edge_count()
    );
    graph
}
