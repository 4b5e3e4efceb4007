//! Engine configuration.
//!
//! Every knob has a default, so `EngineConfig::default()` reproduces the
//! plain text semantics. A JSON file can override any subset of fields:
//!
//! ```json
//! { "ignore_math_functions": true, "duplicates": "last_wins" }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Words that are never symbol references, whatever the configuration.
pub const RESERVED_WORDS: &[&str] = &["if", "else", "for", "while", "return", "and", "or", "not"];

/// Function names treated as reserved when `ignore_math_functions` is set.
///
/// Includes the piecewise helpers used by gotran `.ode` files.
pub const MATH_FUNCTIONS: &[&str] = &[
    "exp", "log", "ln", "sqrt", "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh",
    "tanh", "abs", "pow", "min", "max", "floor", "ceil", "Conditional", "And", "Or", "Not", "Ge",
    "Gt", "Le", "Lt", "Eq", "Ne",
];

/// What to do when a left-hand side is defined more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`Error::DuplicateDefinition`].
    #[default]
    Reject,
    /// Keep the last definition and log a warning.
    LastWins,
}

/// What to do with structured sub-terms that are not plain symbols.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpaqueTermPolicy {
    /// Record the sub-term's type name as a placeholder dependency.
    #[default]
    Tag,
    /// Drop the sub-term.
    Skip,
}

/// Configuration shared by the extractor, the index and the sorter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Extra reserved words, on top of [`RESERVED_WORDS`].
    pub reserved_words: BTreeSet<String>,
    /// Treat [`MATH_FUNCTIONS`] as reserved.
    pub ignore_math_functions: bool,
    /// Lines starting with this prefix are comments.
    pub comment_prefix: String,
    pub duplicates: DuplicatePolicy,
    pub opaque_terms: OpaqueTermPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reserved_words: BTreeSet::new(),
            ignore_math_functions: false,
            comment_prefix: "#".to_string(),
            duplicates: DuplicatePolicy::default(),
            opaque_terms: OpaqueTermPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::InvalidConfig`] if it is not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Add reserved words.
    pub fn with_reserved<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_math_functions(mut self) -> Self {
        self.ignore_math_functions = true;
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn with_opaque_terms(mut self, policy: OpaqueTermPolicy) -> Self {
        self.opaque_terms = policy;
        self
    }

    /// The complete reserved set in effect.
    pub fn reserved_set(&self) -> BTreeSet<String> {
        let mut words: BTreeSet<String> = RESERVED_WORDS.iter().map(|w| w.to_string()).collect();
        if self.ignore_math_functions {
            words.extend(MATH_FUNCTIONS.iter().map(|w| w.to_string()));
        }
        words.extend(self.reserved_words.iter().cloned());
        words
    }
}
