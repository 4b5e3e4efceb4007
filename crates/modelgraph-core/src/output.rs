//! Writing dependency-ordered model files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::equation::{Equation, EquationParser};
use crate::error::Result;
use crate::sort::TopologicalSorter;

/// Suffix of model files recognised by [`sorted_path`].
pub const MODEL_SUFFIX: &str = ".ode";

/// Default output path for a sorted copy of `path`.
///
/// `model.ode` becomes `model_sorted.ode`; any other extension gets
/// `_sorted` inserted before it, and a bare name gets it appended.
pub fn sorted_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let sorted_name = if let Some(stem) = file_name.strip_suffix(MODEL_SUFFIX) {
        format!("{stem}_sorted{MODEL_SUFFIX}")
    } else {
        match (path.file_stem(), path.extension()) {
            (Some(stem), Some(ext)) => format!(
                "{}_sorted.{}",
                stem.to_string_lossy(),
                ext.to_string_lossy()
            ),
            _ => format!("{file_name}_sorted"),
        }
    };

    path.with_file_name(sorted_name)
}

/// Render equations one per block, each followed by a blank line.
pub fn render_sorted(equations: &[&Equation]) -> String {
    let mut out = String::new();
    for eq in equations {
        out.push_str(eq.source());
        out.push_str("\n\n");
    }
    out
}

/// Sort the equations of `input` and write them to `output`.
///
/// When `output` is `None` the path comes from [`sorted_path`]. Parsing and
/// sorting finish before anything is written, so a failure leaves no file.
/// Returns the path written.
pub fn sort_file(input: impl AsRef<Path>, output: Option<&Path>, config: &EngineConfig) -> Result<PathBuf> {
    let input = input.as_ref();
    let source = fs::read_to_string(input)?;
    let equations = EquationParser::from_config(config).parse_equations(&source)?;
    let sorted = TopologicalSorter::from_config(config).sort(&equations)?;

    let out_path = output.map(Path::to_path_buf).unwrap_or_else(|| sorted_path(input));
    fs::write(&out_path, render_sorted(&sorted))?;

    tracing::info!(
        "Sorted {} → {} ({} equations)",
        input.display(),
        out_path.display(),
        sorted.len()
    );
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_sorted_path() {
        assert_eq!(sorted_path("model.ode"), PathBuf::from("model_sorted.ode"));
        assert_eq!(
            sorted_path("/path/to/hh.ode"),
            PathBuf::from("/path/to/hh_sorted.ode")
        );
        assert_eq!(sorted_path("eqs.txt"), PathBuf::from("eqs_sorted.txt"));
        assert_eq!(sorted_path("equations"), PathBuf::from("equations_sorted"));
    }

    #[test]
    fn test_render_sorted() {
        let a = Equation::parse("a = 1").unwrap();
        let b = Equation::parse("b = a").unwrap();
        assert_eq!(render_sorted(&[&a, &b]), "a = 1\n\nb = a\n\n");
    }

    #[test]
    fn test_sort_file_writes_default_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.ode");
        fs::write(&input, "# model\na = b + c\n\nb = (2 +\n  c)\nc = 3\n").unwrap();

        let written = sort_file(&input, None, &EngineConfig::default()).unwrap();
        assert_eq!(written, dir.path().join("model_sorted.ode"));

        let text = fs::read_to_string(&written).unwrap();
        assert_eq!(text, "c = 3\n\nb = (2 +\n  c)\n\na = b + c\n\n");
    }

    #[test]
    fn test_sort_file_cycle_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cycle.ode");
        fs::write(&input, "x = y\ny = x\n").unwrap();

        let err = sort_file(&input, None, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, Error::CyclicDependency(_)));
        assert!(!dir.path().join("cycle_sorted.ode").exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sort_file(dir.path().join("missing.ode"), None, &EngineConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
