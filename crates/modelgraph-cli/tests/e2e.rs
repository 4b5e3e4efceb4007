//! End-to-end tests for modelgraph CLI commands.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin for tests

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// A temporary directory holding one model file.
struct TestModel {
    temp_dir: TempDir,
    model_path: PathBuf,
}

impl TestModel {
    fn new(filename: &str, source: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let model_path = temp_dir.path().join(filename);
        fs::write(&model_path, source).expect("Failed to write model");

        Self {
            temp_dir,
            model_path,
        }
    }

    fn path(&self) -> &str {
        self.model_path.to_str().expect("temp path is UTF-8")
    }

    fn sibling(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

fn gating_model() -> &'static str {
    r#"# Gating variable model
dV_dt = -(i_ion - i_app)/Cm

i_ion = g*m*(V - E)

E = E_R + 12

dm_dt = (m_inf - m)/tau_m
m_inf = 1/(1 + exp(-(V - V_half)/
    k))
"#
}

fn modelgraph() -> Command {
    let mut cmd = Command::cargo_bin("modelgraph").expect("binary is built");
    cmd.env("NO_COLOR", "1");
    cmd
}

// =============================================================================
// sort
// =============================================================================

#[test]
fn test_sort_writes_sorted_file() {
    let model = TestModel::new("gating.ode", gating_model());

    modelgraph()
        .args(["sort", model.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("gating_sorted.ode"));

    let sorted = fs::read_to_string(model.sibling("gating_sorted.ode")).unwrap();
    let pos = |needle: &str| sorted.find(needle).unwrap();
    assert!(pos("E = E_R") < pos("i_ion ="));
    assert!(pos("i_ion =") < pos("dV_dt ="));
    assert!(pos("m_inf =") < pos("dm_dt ="));
    assert!(sorted.ends_with("\n\n"));
    assert!(!sorted.contains("# Gating"));
}

#[test]
fn test_sort_explicit_output() {
    let model = TestModel::new("gating.ode", gating_model());
    let out = model.sibling("ordered.txt");

    modelgraph()
        .args(["sort", model.path(), "-o", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(out.exists());
    assert!(!model.sibling("gating_sorted.ode").exists());
}

#[test]
fn test_sort_cycle_fails_with_hint() {
    let model = TestModel::new("cycle.ode", "x = y + 1\ny = 2*x\n");

    modelgraph()
        .args(["sort", model.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cyclic dependency"))
        .stderr(predicate::str::contains("hint:"));

    assert!(!model.sibling("cycle_sorted.ode").exists());
}

#[test]
fn test_unterminated_expression_fails() {
    let model = TestModel::new("broken.ode", "a = (b +\n  c\n");

    modelgraph()
        .args(["sort", model.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed equation"));
}

// =============================================================================
// queries
// =============================================================================

#[test]
fn test_direct_dependencies() {
    let model = TestModel::new("gating.ode", gating_model());

    modelgraph()
        .args(["deps", model.path(), "i_ion"])
        .assert()
        .success()
        .stdout("E\nV\ng\nm\n");
}

#[test]
fn test_queries_skip_declaration_lines() {
    let model = TestModel::new(
        "membrane.ode",
        "states(V)\nexpressions(\"Membrane\")\ni_L = g_L*(V - E_L)\n",
    );

    modelgraph()
        .args(["deps", model.path(), "i_L"])
        .assert()
        .success()
        .stdout("E_L\nV\ng_L\n");

    modelgraph()
        .args(["names", model.path()])
        .assert()
        .success()
        .stdout("i_L\n");
}

#[test]
fn test_transitive_dependencies_with_math_functions() {
    let model = TestModel::new("gating.ode", gating_model());

    modelgraph()
        .args(["--math-functions", "deps", model.path(), "dm_dt", "--transitive"])
        .assert()
        .success()
        .stdout("V\nV_half\nk\nm\nm_inf\ntau_m\n");
}

#[test]
fn test_dependents_of_parameter() {
    let model = TestModel::new("gating.ode", gating_model());

    modelgraph()
        .args(["dependents", model.path(), "E_R", "-t"])
        .assert()
        .success()
        .stdout("E\ndV_dt\ni_ion\n");
}

#[test]
fn test_unknown_symbol_is_empty() {
    let model = TestModel::new("gating.ode", gating_model());

    modelgraph()
        .args(["deps", model.path(), "nothing_here"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_names() {
    let model = TestModel::new("gating.ode", gating_model());

    modelgraph()
        .args(["names", model.path()])
        .assert()
        .success()
        .stdout("dV_dt\ni_ion\nE\ndm_dt\nm_inf\n");

    modelgraph()
        .args(["names", model.path(), "--referenced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("E_R"))
        .stdout(predicate::str::contains("dV_dt").not());
}

// =============================================================================
// graph
// =============================================================================

#[test]
fn test_graph_dot() {
    let model = TestModel::new("gating.ode", gating_model());

    modelgraph()
        .args(["graph", model.path(), "E_R", "--inverse"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"))
        .stdout(predicate::str::contains("i_ion"));
}

#[test]
fn test_graph_json_to_file() {
    let model = TestModel::new("gating.ode", gating_model());
    let out = model.sibling("graph.json");

    modelgraph()
        .args([
            "graph",
            model.path(),
            "i_ion",
            "--format",
            "json",
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["root"], "i_ion");
    assert_eq!(json["direction"], "dependencies");
    let edges = json["edges"].as_array().unwrap();
    assert!(edges.iter().any(|e| e[0] == "E" && e[1] == "E_R"));
    assert_eq!(edges.len(), 5);
}

// =============================================================================
// summary and config
// =============================================================================

#[test]
fn test_summary() {
    let model = TestModel::new("gating.ode", gating_model());

    modelgraph()
        .args(["summary", model.path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("dependencies"))
        .stdout(predicate::str::contains("5 defined"));
}

#[test]
fn test_config_file_duplicates() {
    let model = TestModel::new("dup.ode", "a = 1\nb = a\na = 2\n");

    modelgraph()
        .args(["sort", model.path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("defined more than once"));

    let config = model.sibling("modelgraph.json");
    fs::write(&config, r#"{ "duplicates": "last_wins" }"#).unwrap();

    modelgraph()
        .args(["--config", config.to_str().unwrap(), "sort", model.path()])
        .assert()
        .success();

    let sorted = fs::read_to_string(model.sibling("dup_sorted.ode")).unwrap();
    assert_eq!(sorted, "a = 2\n\nb = a\n\n");
}
