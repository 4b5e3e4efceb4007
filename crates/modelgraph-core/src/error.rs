//! Error types for modelgraph-core.

use thiserror::Error;

/// Result type for modelgraph-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in modelgraph-core.
///
/// Queries on names the index has never seen are not errors: they return
/// empty sets. Only building and sorting can fail.
#[derive(Debug, Error)]
pub enum Error {
    /// Unbalanced parentheses at end of input, or a record without `=`.
    #[error("malformed equation: {0}")]
    MalformedEquation(String),

    /// A back-edge was found while sorting. Names one symbol on the cycle.
    #[error("cyclic dependency detected at '{0}'")]
    CyclicDependency(String),

    /// The same left-hand side appears in more than one equation.
    #[error("symbol '{0}' is defined more than once")]
    DuplicateDefinition(String),

    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Render the error together with a short recovery hint.
    pub fn with_hint(&self) -> String {
        let hint = match self {
            Error::MalformedEquation(_) => {
                "check for a missing ')' or a statement without '='"
            }
            Error::CyclicDependency(_) => {
                "break the cycle by turning one of the symbols into a parameter"
            }
            Error::DuplicateDefinition(_) => {
                "remove the extra definition or set `duplicates` to \"last_wins\""
            }
            Error::InvalidConfig(_) => "the config file must be a JSON object",
            Error::Io(_) => return self.to_string(),
        };
        format!("{self}\n  hint: {hint}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_names_symbol() {
        let err = Error::CyclicDependency("x".to_string());
        assert_eq!(err.to_string(), "cyclic dependency detected at 'x'");
        assert!(err.with_hint().contains("hint:"));
    }

    #[test]
    fn test_io_has_no_hint() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!err.with_hint().contains("hint:"));
    }
}
