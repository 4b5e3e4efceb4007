//! Symbol queries: dependencies, dependents and name listings.
//!
//! Results go to stdout one symbol per line, sorted, so they can be piped.

use std::collections::BTreeSet;

use modelgraph_core::{DependencyIndex, EngineConfig};

use crate::colors;

pub fn dependencies(
    model_path: &str,
    symbol: &str,
    transitive: bool,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let index = DependencyIndex::from_file(model_path, config)?;
    let found = if transitive {
        index.transitive_dependencies(symbol)
    } else {
        index.direct_dependencies(symbol).clone()
    };
    report(&index, symbol, &found);
    Ok(())
}

pub fn dependents(
    model_path: &str,
    symbol: &str,
    transitive: bool,
    config: &EngineConfig,
) -> anyhow::Result<()> {
    let index = DependencyIndex::from_file(model_path, config)?;
    let found = if transitive {
        index.transitive_dependents(symbol)
    } else {
        index.direct_dependents(symbol).clone()
    };
    report(&index, symbol, &found);
    Ok(())
}

pub fn names(model_path: &str, referenced: bool, config: &EngineConfig) -> anyhow::Result<()> {
    let index = DependencyIndex::from_file(model_path, config)?;
    let listed = if referenced {
        index.all_referenced_names()
    } else {
        index.all_defined_names()
    };
    for name in listed {
        println!("{name}");
    }
    Ok(())
}

fn report(index: &DependencyIndex, symbol: &str, found: &BTreeSet<String>) {
    if index.role(symbol).is_none() {
        tracing::warn!("'{}' does not appear in the model", symbol);
    }
    for name in found {
        if index.is_defined(name) {
            println!("{name}");
        } else {
            println!("{}", colors::paint(colors::DIM, name));
        }
    }
}
