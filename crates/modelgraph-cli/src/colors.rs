//! Terminal color constants for CLI output.

use std::io::IsTerminal;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const CYAN: &str = "\x1b[36m";

/// Wrap `text` in `color` when stdout is a terminal and `NO_COLOR` is unset.
pub fn paint(color: &str, text: &str) -> String {
    if std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal() {
        format!("{color}{text}{RESET}")
    } else {
        text.to_string()
    }
}
