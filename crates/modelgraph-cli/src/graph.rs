//! Graph command implementation.
//!
//! Hands the rooted subgraph to external renderers as DOT or JSON.

use std::fs;

use modelgraph_core::{DependencyIndex, Direction, EngineConfig};

use crate::GraphFormat;

pub fn execute(
    model_path: &str,
    symbol: &str,
    inverse: bool,
    format: GraphFormat,
    output: Option<&str>,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let index = DependencyIndex::from_file(model_path, config)?;
    let direction = if inverse {
        Direction::Dependents
    } else {
        Direction::Dependencies
    };

    let graph = index.dependency_graph(symbol, direction);
    if graph.is_empty() {
        tracing::warn!("'{}' has no {}; the graph is empty", symbol, direction);
    }

    let rendered = match format {
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Json => serde_json::to_string_pretty(&graph.export())?,
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            tracing::info!("Wrote {} graph for '{}' to {}", direction, symbol, path);
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
