//! Symbol reference extraction.
//!
//! Turns the right-hand side of a definition into the set of symbol names it
//! references. Text is tokenized with an identifier pattern; structured
//! terms are read directly.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{EngineConfig, OpaqueTermPolicy};
use crate::equation::Equation;
use crate::model::Term;
use crate::Symbol;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("identifier pattern is valid")
});

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("number pattern is valid"));

/// Extracts referenced symbol names from definitions.
#[derive(Debug, Clone)]
pub struct ReferenceExtractor {
    reserved: BTreeSet<String>,
    opaque_terms: OpaqueTermPolicy,
}

impl ReferenceExtractor {
    /// Create an extractor with the default reserved words.
    pub fn new() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            reserved: config.reserved_set(),
            opaque_terms: config.opaque_terms,
        }
    }

    /// Whether `word` can never be a symbol reference.
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.contains(word)
    }

    /// References of a full `name = expression` statement.
    ///
    /// A statement without `=` references nothing. The defined name itself
    /// is never part of the result.
    pub fn references(&self, statement: &str) -> BTreeSet<Symbol> {
        match statement.split_once('=') {
            Some((lhs, rhs)) => {
                let mut refs = self.rhs_references(rhs);
                refs.remove(lhs.trim());
                refs
            }
            None => BTreeSet::new(),
        }
    }

    /// References of an already split [`Equation`].
    pub fn equation_references(&self, equation: &Equation) -> BTreeSet<Symbol> {
        let mut refs = self.rhs_references(equation.rhs());
        refs.remove(equation.name());
        refs
    }

    /// Identifiers in an expression, minus numeric literals and reserved words.
    pub fn rhs_references(&self, rhs: &str) -> BTreeSet<Symbol> {
        IDENTIFIER
            .find_iter(rhs)
            .map(|m| m.as_str())
            .filter(|token| !NUMBER.is_match(token) && !self.is_reserved(token))
            .map(str::to_string)
            .collect()
    }

    /// References of a structured definition.
    ///
    /// Opaque sub-terms contribute their type name as a placeholder tag under
    /// [`OpaqueTermPolicy::Tag`], and nothing under [`OpaqueTermPolicy::Skip`].
    pub fn term_references<'a, I>(&self, name: &str, terms: I) -> BTreeSet<Symbol>
    where
        I: IntoIterator<Item = &'a Term>,
    {
        let mut refs = BTreeSet::new();
        for term in terms {
            match term {
                Term::Symbol(symbol) => {
                    refs.insert(symbol.clone());
                }
                Term::Opaque(type_name) => match self.opaque_terms {
                    OpaqueTermPolicy::Tag => {
                        tracing::warn!(
                            "'{}' references a non-symbol term; recording it as '{}'",
                            name,
                            type_name
                        );
                        refs.insert(type_name.clone());
                    }
                    OpaqueTermPolicy::Skip => {
                        tracing::debug!("Skipping non-symbol term '{}' in '{}'", type_name, name);
                    }
                },
            }
        }
        refs.remove(name);
        refs
    }
}

impl Default for ReferenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}
