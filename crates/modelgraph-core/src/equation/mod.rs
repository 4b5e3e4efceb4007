//! Textual equations.
//!
//! This module provides:
//! - Splitting raw model text into equation records, across multi-line expressions
//! - The [`Equation`] record (left-hand side plus full source)

mod parser;

pub use parser::EquationParser;

use crate::error::{Error, Result};
use crate::Symbol;

/// One `name = expression` statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    name: Symbol,
    source: String,
    /// Byte offset of the `=` in `source`.
    split: usize,
}

impl Equation {
    /// Build an equation record from its source text.
    ///
    /// The left-hand side is everything before the first `=`, trimmed.
    ///
    /// # Errors
    /// Returns [`Error::MalformedEquation`] when there is no `=` or the
    /// left-hand side is empty.
    pub fn parse(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let Some(split) = source.find('=') else {
            return Err(Error::MalformedEquation(format!("no '=' in `{}`", source)));
        };
        let name = source[..split].trim();
        if name.is_empty() {
            return Err(Error::MalformedEquation(format!(
                "empty left-hand side in `{}`",
                source
            )));
        }

        Ok(Self {
            name: name.to_string(),
            source,
            split,
        })
    }

    /// The defined symbol.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The complete statement as it appeared in the input.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Everything after the first `=`.
    pub fn rhs(&self) -> &str {
        &self.source[self.split + 1..]
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_on_first_equals() {
        let eq = Equation::parse("flag = a == b").unwrap();
        assert_eq!(eq.name(), "flag");
        assert_eq!(eq.rhs(), " a == b");
        assert_eq!(eq.source(), "flag = a == b");
    }

    #[test]
    fn test_missing_equals_is_malformed() {
        let err = Equation::parse("expressions(\"membrane\")").unwrap_err();
        assert!(matches!(err, Error::MalformedEquation(_)));
    }

    #[test]
    fn test_empty_lhs_is_malformed() {
        assert!(Equation::parse("  = 3").is_err());
    }
}
