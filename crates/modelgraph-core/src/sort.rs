//! Topological ordering of equations.
//!
//! Only dependencies on symbols defined in the same equation set constrain
//! the order; parameters, states and time are dropped before sorting.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::config::{DuplicatePolicy, EngineConfig};
use crate::equation::Equation;
use crate::error::{Error, Result};
use crate::extract::ReferenceExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Orders equations so that each one follows everything it depends on.
#[derive(Debug, Clone)]
pub struct TopologicalSorter {
    extractor: ReferenceExtractor,
    duplicates: DuplicatePolicy,
}

impl TopologicalSorter {
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            extractor: ReferenceExtractor::from_config(config),
            duplicates: config.duplicates,
        }
    }

    /// Sort `equations` into evaluation order.
    ///
    /// Top-level visitation follows input order and dependencies are visited
    /// in name order, so identical input always gives identical output. Under
    /// [`DuplicatePolicy::LastWins`] only the last definition of a name is
    /// emitted.
    ///
    /// # Errors
    /// Returns [`Error::CyclicDependency`] naming a symbol on the first cycle
    /// found, or [`Error::DuplicateDefinition`] under [`DuplicatePolicy::Reject`].
    /// No partial order is returned.
    pub fn sort<'e>(&self, equations: &'e [Equation]) -> Result<Vec<&'e Equation>> {
        let mut slots: IndexMap<&str, usize, FxBuildHasher> = IndexMap::default();
        for (pos, eq) in equations.iter().enumerate() {
            if let Some(previous) = slots.insert(eq.name(), pos) {
                match self.duplicates {
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateDefinition(eq.name().to_string()));
                    }
                    DuplicatePolicy::LastWins => {
                        tracing::warn!(
                            "'{}' is redefined (statements {} and {}); keeping the last",
                            eq.name(),
                            previous + 1,
                            pos + 1
                        );
                    }
                }
            }
        }

        // Dependencies restricted to defined symbols, as slot indices.
        let deps: Vec<Vec<usize>> = slots
            .values()
            .map(|&pos| {
                self.extractor
                    .equation_references(&equations[pos])
                    .iter()
                    .filter_map(|name| slots.get_index_of(name.as_str()))
                    .collect()
            })
            .collect();

        let mut marks = vec![Mark::Unvisited; slots.len()];
        let mut order = Vec::with_capacity(slots.len());
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for start in 0..slots.len() {
            if marks[start] != Mark::Unvisited {
                continue;
            }
            marks[start] = Mark::InProgress;
            stack.push((start, 0));

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                match deps[node].get(next) {
                    Some(&dep) => {
                        frame.1 += 1;
                        match marks[dep] {
                            Mark::Done => {}
                            Mark::InProgress => {
                                let name = slots
                                    .get_index(dep)
                                    .map(|(name, _)| name.to_string())
                                    .unwrap_or_default();
                                tracing::debug!("Back-edge {} -> {}", slot_name(&slots, node), name);
                                return Err(Error::CyclicDependency(name));
                            }
                            Mark::Unvisited => {
                                marks[dep] = Mark::InProgress;
                                stack.push((dep, 0));
                            }
                        }
                    }
                    None => {
                        marks[node] = Mark::Done;
                        order.push(&equations[slots[node]]);
                        stack.pop();
                    }
                }
            }
        }

        tracing::debug!("Sorted {} equations", order.len());
        Ok(order)
    }
}

impl Default for TopologicalSorter {
    fn default() -> Self {
        Self::new()
    }
}

fn slot_name<'a>(slots: &IndexMap<&'a str, usize, FxBuildHasher>, slot: usize) -> &'a str {
    slots.get_index(slot).map(|(name, _)| *name).unwrap_or_default()
}
