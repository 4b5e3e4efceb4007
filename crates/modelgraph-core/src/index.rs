//! The dependency index.
//!
//! Holds, for one loaded model, the direct dependency set of every defined
//! symbol and the inverse relation derived from it. Built once, then
//! read-only; it can be shared across threads for concurrent queries.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::config::{DuplicatePolicy, EngineConfig};
use crate::error::{Error, Result};
use crate::graph::{self, DependencyGraph, Direction};
use crate::model::{Model, SymbolKind};
use crate::source::{ModelSource, ReferenceSource, TextSource};
use crate::Symbol;

type SymbolMap = IndexMap<Symbol, BTreeSet<Symbol>, FxBuildHasher>;

static EMPTY: BTreeSet<Symbol> = BTreeSet::new();

/// Role of a symbol within the index, derived from the equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolRole {
    /// Left-hand side of an equation.
    Defined,
    /// Referenced but never defined (state, parameter, time, ...).
    External,
}

/// Direct and inverse dependency sets for a whole model.
///
/// Every query accepts names the index has never seen and answers with an
/// empty result instead of failing.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    /// Defined symbol -> what it references, in declaration order.
    direct: SymbolMap,
    /// Referenced symbol -> defined symbols that reference it.
    inverse: SymbolMap,
    /// Classification supplied by a structured loader.
    kinds: FxHashMap<Symbol, SymbolKind>,
}

impl DependencyIndex {
    /// Build the index from any input adapter.
    ///
    /// Under [`DuplicatePolicy::LastWins`] a redefinition replaces the earlier
    /// dependency set and keeps the earlier position in
    /// [`all_defined_names`](Self::all_defined_names).
    ///
    /// # Errors
    /// Returns [`Error::DuplicateDefinition`] under [`DuplicatePolicy::Reject`].
    pub fn build<S: ReferenceSource + ?Sized>(source: &S, config: &EngineConfig) -> Result<Self> {
        let mut index = Self::default();

        for def in source.definitions() {
            if let Some(previous) = index.direct.get(&def.name) {
                match config.duplicates {
                    DuplicatePolicy::Reject => return Err(Error::DuplicateDefinition(def.name)),
                    DuplicatePolicy::LastWins => {
                        tracing::warn!("'{}' is redefined; keeping the last definition", def.name);
                        let previous = previous.clone();
                        index.unlink(&def.name, &previous);
                    }
                }
            }

            for referenced in &def.references {
                index
                    .inverse
                    .entry(referenced.clone())
                    .or_default()
                    .insert(def.name.clone());
            }
            index.direct.insert(def.name, def.references);
        }

        // Unlinked entries stay in place until here so that a symbol that is
        // referenced again keeps its first-seen position.
        index.inverse.retain(|_, users| !users.is_empty());

        index.kinds = index
            .direct
            .keys()
            .chain(index.inverse.keys())
            .filter_map(|name| source.classify(name).map(|kind| (name.clone(), kind)))
            .collect();

        tracing::debug!(
            "Indexed {} definitions referencing {} symbols",
            index.direct.len(),
            index.inverse.len()
        );
        Ok(index)
    }

    /// Parse model text and build the index.
    pub fn from_text(source: &str, config: &EngineConfig) -> Result<Self> {
        Self::build(&TextSource::parse(source, config)?, config)
    }

    /// Read a model file and build the index.
    pub fn from_file(path: impl AsRef<Path>, config: &EngineConfig) -> Result<Self> {
        Self::build(&TextSource::from_file(path, config)?, config)
    }

    /// Build the index from a structured model.
    pub fn from_model<M: Model>(model: &M, config: &EngineConfig) -> Result<Self> {
        Self::build(&ModelSource::new(model, config), config)
    }

    fn unlink(&mut self, name: &str, references: &BTreeSet<Symbol>) {
        for referenced in references {
            if let Some(users) = self.inverse.get_mut(referenced) {
                users.remove(name);
            }
        }
    }

    /// What `name` references directly. Empty if unknown.
    pub fn direct_dependencies(&self, name: &str) -> &BTreeSet<Symbol> {
        self.direct.get(name).unwrap_or(&EMPTY)
    }

    /// Definitions that reference `name` directly. Empty if unknown.
    pub fn direct_dependents(&self, name: &str) -> &BTreeSet<Symbol> {
        self.inverse.get(name).unwrap_or(&EMPTY)
    }

    /// One step of the relation selected by `direction`.
    pub fn neighbors(&self, name: &str, direction: Direction) -> &BTreeSet<Symbol> {
        match direction {
            Direction::Dependencies => self.direct_dependencies(name),
            Direction::Dependents => self.direct_dependents(name),
        }
    }

    /// Everything `name` depends on, directly or not. Never contains `name`.
    pub fn transitive_dependencies(&self, name: &str) -> BTreeSet<Symbol> {
        graph::closure(self, name, Direction::Dependencies)
    }

    /// Everything that depends on `name`, directly or not. Never contains `name`.
    pub fn transitive_dependents(&self, name: &str) -> BTreeSet<Symbol> {
        graph::closure(self, name, Direction::Dependents)
    }

    /// Materialize the subgraph reachable from `root`.
    pub fn dependency_graph(&self, root: &str, direction: Direction) -> DependencyGraph {
        graph::build_graph(self, root, direction)
    }

    /// Closures for many roots at once, computed in parallel.
    ///
    /// Results come back in the order of `roots`.
    pub fn closures<S>(&self, roots: &[S], direction: Direction) -> Vec<(Symbol, BTreeSet<Symbol>)>
    where
        S: AsRef<str> + Sync,
    {
        roots
            .par_iter()
            .map(|root| {
                let root = root.as_ref();
                (root.to_string(), graph::closure(self, root, direction))
            })
            .collect()
    }

    /// Every left-hand side, in declaration order.
    pub fn all_defined_names(&self) -> Vec<&str> {
        self.direct.keys().map(String::as_str).collect()
    }

    /// Every symbol referenced by at least one equation, in first-seen order.
    ///
    /// Includes external symbols.
    pub fn all_referenced_names(&self) -> Vec<&str> {
        self.inverse.keys().map(String::as_str).collect()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.direct.contains_key(name)
    }

    /// `Defined`, `External`, or `None` if the name never appears.
    pub fn role(&self, name: &str) -> Option<SymbolRole> {
        if self.direct.contains_key(name) {
            Some(SymbolRole::Defined)
        } else if self.inverse.contains_key(name) {
            Some(SymbolRole::External)
        } else {
            None
        }
    }

    /// Loader-provided classification; only structured inputs supply one.
    pub fn kind(&self, name: &str) -> Option<SymbolKind> {
        self.kinds.get(name).copied()
    }

    /// Referenced symbols that are never defined.
    pub fn external_names(&self) -> Vec<&str> {
        self.inverse
            .keys()
            .filter(|name| !self.direct.contains_key(*name))
            .map(String::as_str)
            .collect()
    }

    /// Number of defined symbols.
    pub fn len(&self) -> usize {
        self.direct.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty()
    }
}
