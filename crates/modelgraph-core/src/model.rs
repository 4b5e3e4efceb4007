//! Boundary types for structured (already parsed) models.
//!
//! A model loader only has to expose its intermediate and state-derivative
//! definitions, each with a name and the terms it depends on.

/// One free term of a structured expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A plain symbol reference.
    Symbol(String),
    /// A sub-expression with no symbol identity, identified by its type name.
    Opaque(String),
}

impl Term {
    pub fn symbol(name: impl Into<String>) -> Self {
        Term::Symbol(name.into())
    }

    pub fn opaque(type_name: impl Into<String>) -> Self {
        Term::Opaque(type_name.into())
    }
}

/// Classification a model loader may know about a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    State,
    Parameter,
    Time,
    Intermediate,
    StateDerivative,
}

/// A named definition inside a structured model.
pub trait Definition {
    /// The defined symbol.
    fn name(&self) -> &str;

    /// The free terms of the right-hand side.
    fn free_terms(&self) -> Vec<Term>;
}

/// A structured model, as produced by an external loader.
pub trait Model {
    type Def: Definition;

    /// Intermediate definitions, in declaration order.
    fn intermediates(&self) -> &[Self::Def];

    /// State-derivative definitions, in declaration order.
    fn state_derivatives(&self) -> &[Self::Def];

    /// Richer classification, if the loader has it.
    fn classify(&self, _name: &str) -> Option<SymbolKind> {
        None
    }
}
