//! Graph walks over the dependency index.
//!
//! This module provides:
//! - Transitive closure of the dependency or dependent relation
//! - Materialized subgraphs rooted at one symbol, for rendering

mod builder;
mod types;

pub use builder::{build_graph, closure};
pub use types::{DependencyGraph, Direction, GraphExport};
