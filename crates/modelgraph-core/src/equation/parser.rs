//! Line-based equation splitter.
//!
//! Statements may span several lines as long as a parenthesis is left open:
//!
//! ```text
//! alpha_m = -0.1*(V + 50)/(
//!     exp(-(V + 50)/10) - 1)
//! ```

use std::fs;
use std::path::Path;

use super::Equation;
use crate::config::EngineConfig;
use crate::error::{Error, Result};

/// Splits model text into equation source strings, in input order.
#[derive(Debug, Clone)]
pub struct EquationParser {
    comment_prefix: String,
}

impl EquationParser {
    /// Create a parser using `#` comments.
    pub fn new() -> Self {
        Self {
            comment_prefix: "#".to_string(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            comment_prefix: config.comment_prefix.clone(),
        }
    }

    /// Read a file and split it into statements.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let source = fs::read_to_string(path.as_ref())?;
        self.parse_str(&source)
    }

    /// Split text into statements.
    ///
    /// Blank and comment lines are skipped, even inside a multi-line
    /// statement. Lines accumulate while the running `(` minus `)` count is
    /// nonzero.
    ///
    /// # Errors
    /// Returns [`Error::MalformedEquation`] if the input ends while the
    /// count is still nonzero.
    pub fn parse_str(&self, source: &str) -> Result<Vec<String>> {
        let mut statements = Vec::new();
        let mut buffer: Vec<&str> = Vec::new();
        let mut depth: i64 = 0;

        for line in source.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || self.is_comment(trimmed) {
                continue;
            }

            depth += paren_balance(trimmed);
            buffer.push(line);

            if depth == 0 {
                statements.push(buffer.join("\n").trim().to_string());
                buffer.clear();
            }
        }

        if !buffer.is_empty() {
            return Err(Error::MalformedEquation(format!(
                "unterminated expression ({} unmatched parenthesis): `{}`",
                depth,
                buffer.join("\n").trim()
            )));
        }

        tracing::debug!("Split source into {} statements", statements.len());
        Ok(statements)
    }

    /// Split text and turn every statement into an [`Equation`].
    pub fn parse_equations(&self, source: &str) -> Result<Vec<Equation>> {
        self.parse_str(source)?
            .into_iter()
            .map(Equation::parse)
            .collect()
    }

    fn is_comment(&self, trimmed: &str) -> bool {
        !self.comment_prefix.is_empty() && trimmed.starts_with(self.comment_prefix.as_str())
    }
}

impl Default for EquationParser {
    fn default() -> Self {
        Self::new()
    }
}

fn paren_balance(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '(' => acc + 1,
        ')' => acc - 1,
        _ => acc,
    })
}
