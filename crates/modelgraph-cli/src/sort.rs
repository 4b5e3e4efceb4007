//! Sort command implementation.
//!
//! Rewrites a model file with its equations in evaluation order.

use std::path::Path;

use modelgraph_core::EngineConfig;

use crate::colors;

/// Sort `model_path` and report where the result went.
pub fn execute(model_path: &str, output: Option<&str>, config: &EngineConfig) -> anyhow::Result<()> {
    let written = modelgraph_core::sort_file(model_path, output.map(Path::new), config)?;

    println!(
        "{} {}",
        colors::paint(colors::GREEN, "Sorted model written to"),
        written.display()
    );
    Ok(())
}
