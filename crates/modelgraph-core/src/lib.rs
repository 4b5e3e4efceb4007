//! Dependency graph engine for equation-based models.
//!
//! This crate provides:
//! - Equation splitting for textual models, including multi-line expressions
//! - Symbol reference extraction from text or structured expressions
//! - A direct/inverse dependency index with transitive queries
//! - Materialized dependency graphs for rendering
//! - Topological ordering of equations with cycle detection

pub mod config;
pub mod equation;
pub mod error;
pub mod extract;
pub mod graph;
pub mod index;
pub mod model;
pub mod output;
pub mod sort;
pub mod source;

/// A symbol name.
pub type Symbol = String;

pub use config::{DuplicatePolicy, EngineConfig, OpaqueTermPolicy};
pub use equation::{Equation, EquationParser};
pub use error::{Error, Result};
pub use extract::ReferenceExtractor;
pub use graph::{DependencyGraph, Direction, GraphExport};
pub use index::{DependencyIndex, SymbolRole};
pub use model::{Definition, Model, SymbolKind, Term};
pub use output::{render_sorted, sort_file, sorted_path};
pub use sort::TopologicalSorter;
pub use source::{ModelSource, ReferenceSource, SymbolReferences, TextSource};
