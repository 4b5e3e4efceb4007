//! Input adapters for the dependency index.
//!
//! Both input shapes reduce to the same thing: a sequence of defined symbols,
//! each with the set of symbols it references.
//!
//! ```text
//! model text ──► EquationParser ──► ReferenceExtractor ──┐
//!                                                        ├──► ReferenceSource ──► DependencyIndex
//! structured Model ──► free_terms() ──► ReferenceExtractor ┘
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::EngineConfig;
use crate::equation::{Equation, EquationParser};
use crate::error::Result;
use crate::extract::ReferenceExtractor;
use crate::model::{Definition, Model, SymbolKind};
use crate::Symbol;

/// A defined symbol and what its right-hand side references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolReferences {
    pub name: Symbol,
    pub references: BTreeSet<Symbol>,
}

/// Anything the dependency index can be built from.
pub trait ReferenceSource {
    /// Every definition, in declaration order.
    fn definitions(&self) -> Vec<SymbolReferences>;

    /// Loader-provided classification of a symbol, if any.
    fn classify(&self, _name: &str) -> Option<SymbolKind> {
        None
    }
}

/// Equations read from text.
#[derive(Debug, Clone)]
pub struct TextSource {
    equations: Vec<Equation>,
    extractor: ReferenceExtractor,
}

impl TextSource {
    pub fn new(equations: Vec<Equation>, extractor: ReferenceExtractor) -> Self {
        Self {
            equations,
            extractor,
        }
    }

    /// Parse model text.
    ///
    /// Statements without `=` (declarations such as `states(V)`) define
    /// nothing and reference nothing, so they are skipped.
    ///
    /// # Errors
    /// Fails if the text has an unterminated expression or an empty
    /// left-hand side; no partial source is returned.
    pub fn parse(source: &str, config: &EngineConfig) -> Result<Self> {
        let mut equations = Vec::new();
        for statement in EquationParser::from_config(config).parse_str(source)? {
            if !statement.contains('=') {
                tracing::debug!("Skipping statement without '=': `{}`", statement);
                continue;
            }
            equations.push(Equation::parse(statement)?);
        }
        Ok(Self::new(equations, ReferenceExtractor::from_config(config)))
    }

    /// Read and parse a model file.
    pub fn from_file(path: impl AsRef<Path>, config: &EngineConfig) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&source, config)
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn into_equations(self) -> Vec<Equation> {
        self.equations
    }
}

impl ReferenceSource for TextSource {
    fn definitions(&self) -> Vec<SymbolReferences> {
        self.equations
            .iter()
            .map(|eq| SymbolReferences {
                name: eq.name().to_string(),
                references: self.extractor.equation_references(eq),
            })
            .collect()
    }
}

/// A structured model from an external loader.
pub struct ModelSource<'a, M: Model> {
    model: &'a M,
    extractor: ReferenceExtractor,
}

impl<'a, M: Model> ModelSource<'a, M> {
    pub fn new(model: &'a M, config: &EngineConfig) -> Self {
        Self {
            model,
            extractor: ReferenceExtractor::from_config(config),
        }
    }
}

impl<M: Model> ReferenceSource for ModelSource<'_, M> {
    fn definitions(&self) -> Vec<SymbolReferences> {
        self.model
            .intermediates()
            .iter()
            .chain(self.model.state_derivatives())
            .map(|def| SymbolReferences {
                name: def.name().to_string(),
                references: self.extractor.term_references(def.name(), &def.free_terms()),
            })
            .collect()
    }

    fn classify(&self, name: &str) -> Option<SymbolKind> {
        self.model.classify(name)
    }
}
