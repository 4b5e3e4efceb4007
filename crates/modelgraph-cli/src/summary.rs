//! Summary command implementation.

use modelgraph_core::{DependencyIndex, Direction, EngineConfig};

use crate::colors;

/// Print, for every defined symbol, how many symbols it reaches each way.
pub fn execute(model_path: &str, config: &EngineConfig) -> anyhow::Result<()> {
    let index = DependencyIndex::from_file(model_path, config)?;
    let roots = index.all_defined_names();

    let upstream = index.closures(&roots, Direction::Dependencies);
    let downstream = index.closures(&roots, Direction::Dependents);

    let width = roots.iter().map(|name| name.len()).max().unwrap_or(0).max(6);
    println!(
        "{}",
        colors::paint(
            colors::BOLD,
            &format!("{:<width$}  {:>12}  {:>10}", "symbol", "dependencies", "dependents")
        )
    );
    println!("{}", "─".repeat(width + 26));

    for ((name, deps), (_, users)) in upstream.iter().zip(&downstream) {
        println!(
            "{}  {:>12}  {:>10}",
            colors::paint(colors::CYAN, &format!("{name:<width$}")),
            deps.len(),
            users.len()
        );
    }

    println!("{}", "─".repeat(width + 26));
    println!(
        "{} defined, {} external",
        index.len(),
        index.external_names().len()
    );
    Ok(())
}
