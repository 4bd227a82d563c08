//! E2E tests for the `cleave` binary on the seven-node reference graph.
//!
//! Each test runs in its own temp dir with the user config directory
//! pointed inside it, so no ambient `cleave.toml` leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const REFERENCE: &str = "\
# reference graph
A\tB
A\tC
B\tC
B\tD
D\tE
D\tF
D\tG
E\tF
G\tF
";

fn cleave_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cleave"));
    cmd.current_dir(dir);
    cmd.env("CLEAVE_LOG", "error");
    cmd.env_remove("CLEAVE_FORMAT");
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd
}

fn write_reference(dir: &Path) -> PathBuf {
    let path = dir.join("edges.tsv");
    fs::write(&path, REFERENCE).expect("write edge list");
    path
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = cleave_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("cleave should not crash");
    assert!(
        output.status.success(),
        "{args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

#[test]
fn stats_reports_counts() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    let json = run_json(dir.path(), &["stats", "edges.tsv"]);
    assert_eq!(json["node_count"], 7);
    assert_eq!(json["edge_count"], 9);
    assert_eq!(json["component_count"], 1);
    assert!(json["content_hash"].as_str().expect("hash").starts_with("blake3:"));
}

#[test]
fn stats_text_output() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    cleave_cmd(dir.path())
        .args(["stats", "edges.tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes:").and(predicate::str::contains("9")));
}

#[test]
fn stats_text_notes_a_graph_without_edges() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("empty.tsv"), "# nothing yet\n").expect("write");

    cleave_cmd(dir.path())
        .args(["stats", "empty.tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("note: graph has no edges"));
}

#[test]
fn stats_text_omits_the_note_when_edges_exist() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    cleave_cmd(dir.path())
        .args(["stats", "edges.tsv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no edges").not());
}

// ---------------------------------------------------------------------------
// betweenness / partition / sweep
// ---------------------------------------------------------------------------

#[test]
fn betweenness_puts_bridge_first() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    let json = run_json(
        dir.path(),
        &["betweenness", "edges.tsv", "--max-depth", "2", "--top", "3"],
    );
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["source"], "B");
    assert_eq!(rows[0]["target"], "D");
    assert_eq!(rows[0]["score"], 6.0);
}

#[test]
fn partition_finds_two_communities() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    let json = run_json(dir.path(), &["partition", "edges.tsv", "--max-depth", "5"]);
    let components = json["components"].as_array().expect("array");
    assert_eq!(components.len(), 2);
    assert_eq!(components[0]["nodes"], serde_json::json!(["A", "B", "C"]));
    assert_eq!(components[1]["nodes"], serde_json::json!(["D", "E", "F", "G"]));
    assert_eq!(json["removed_edges"], serde_json::json!(["(B, D)"]));
    let nc = json["norm_cut"].as_f64().expect("norm cut");
    assert!((nc - (1.0 / 4.0 + 1.0 / 6.0)).abs() < 1e-9);
}

#[test]
fn partition_parallel_matches() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    let seq = run_json(dir.path(), &["partition", "edges.tsv", "--max-depth", "5"]);
    let par = run_json(
        dir.path(),
        &["partition", "edges.tsv", "--max-depth", "5", "--parallel"],
    );
    assert_eq!(seq["components"], par["components"]);
}

#[test]
fn sweep_reports_each_depth() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    let json = run_json(dir.path(), &["sweep", "edges.tsv", "--depths", "2,5"]);
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["max_depth"], 2);
    assert_eq!(rows[1]["max_depth"], 5);
}

#[test]
fn sweep_that_cannot_split_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    cleave_cmd(dir.path())
        .args(["sweep", "edges.tsv", "--depths", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("E2004").and(predicate::str::contains("--depths")));
}

// ---------------------------------------------------------------------------
// predict
// ---------------------------------------------------------------------------

#[test]
fn predict_jaccard_recovers_half() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    let json = run_json(
        dir.path(),
        &[
            "predict", "edges.tsv", "--node", "D", "--held-out", "2", "-k", "2", "--method",
            "jaccard",
        ],
    );
    assert_eq!(
        json["held_out"],
        serde_json::json!([
            { "source": "D", "target": "B" },
            { "source": "D", "target": "E" }
        ])
    );
    let result = &json["results"][0];
    assert_eq!(result["method"], "jaccard");
    assert_eq!(result["predictions"][0]["edge"]["target"], "E");
    assert_eq!(result["predictions"][0]["score"], 0.5);
    assert_eq!(result["predictions"][1]["edge"]["target"], "A");
    assert_eq!(result["accuracy"], 0.5);
}

#[test]
fn predict_both_runs_two_scorers() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    let json = run_json(
        dir.path(),
        &["predict", "edges.tsv", "--node", "D", "--held-out", "2", "-k", "2"],
    );
    let results = json["results"].as_array().expect("array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[1]["method"], "path");
}

#[test]
fn predict_unknown_node_reports_code_and_hint() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    cleave_cmd(dir.path())
        .args(["predict", "edges.tsv", "--node", "Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E1001").and(predicate::str::contains("hint:")));
}

#[test]
fn predict_error_as_json() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());

    let output = cleave_cmd(dir.path())
        .args(["predict", "edges.tsv", "--node", "A", "--held-out", "5", "--json"])
        .output()
        .expect("cleave should not crash");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("JSON error on stderr");
    assert_eq!(json["error"]["error_code"], "E1002");
}

// ---------------------------------------------------------------------------
// config and input errors
// ---------------------------------------------------------------------------

#[test]
fn project_config_sets_defaults_and_output() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());
    fs::write(
        dir.path().join("cleave.toml"),
        "output = \"json\"\n\n[community]\nmax_depth = 2\nmin_degree = 0\n",
    )
    .expect("write config");

    let output = cleave_cmd(dir.path())
        .args(["betweenness", "edges.tsv", "--top", "1"])
        .output()
        .expect("cleave should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("config selects JSON");
    assert_eq!(json[0]["score"], 6.0);
}

#[test]
fn malformed_config_fails() {
    let dir = TempDir::new().expect("tempdir");
    write_reference(dir.path());
    fs::write(dir.path().join("cleave.toml"), "[community\n").expect("write config");

    cleave_cmd(dir.path())
        .args(["stats", "edges.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn malformed_edge_list_reports_line() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("bad.tsv"), "A\tB\nlonely\n").expect("write edges");

    cleave_cmd(dir.path())
        .args(["stats", "bad.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E5001").and(predicate::str::contains("line 2")));
}

#[test]
fn missing_edge_list_is_unreadable() {
    let dir = TempDir::new().expect("tempdir");

    cleave_cmd(dir.path())
        .args(["stats", "nope.tsv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E5002"));
}
