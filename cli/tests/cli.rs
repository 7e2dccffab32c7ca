//! End-to-end tests for the neuronet binary.

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

fn edge_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write edges");
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_neuronet"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute neuronet")
}

fn json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "neuronet failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_help() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("bfs"));
}

#[test]
fn test_stats_json() {
    let file = edge_file("# comment\n0 1\n1 2\n2 0\nbad line\n");
    let path = file.path().to_str().unwrap();
    let v = json(&run(&["--json", "stats", path]));
    assert_eq!(v["nodes"], 3);
    assert_eq!(v["edges"], 3);
    assert_eq!(v["skipped_lines"], 1);
    assert_eq!(v["comment_lines"], 1);
}

#[test]
fn test_degree_and_neighbors() {
    let file = edge_file("0 1\n0 2\n0 3\n1 2\n");
    let path = file.path().to_str().unwrap();

    let v = json(&run(&["--json", "degree", path, "0"]));
    assert_eq!(v["degree"], 3);

    let v = json(&run(&["--json", "neighbors", path, "0", "--limit", "2"]));
    assert_eq!(v["degree"], 3);
    assert_eq!(v["neighbors"], serde_json::json!([1, 2]));
    assert_eq!(v["truncated"], true);
}

#[test]
fn test_max_degree_and_top() {
    let file = edge_file("2 0\n2 1\n1 0\n3 0\n3 1\n");
    let path = file.path().to_str().unwrap();

    let v = json(&run(&["--json", "max-degree", path]));
    assert_eq!(v["node"], 2);
    assert_eq!(v["degree"], 2);

    let v = json(&run(&["--json", "top", path, "--count", "3"]));
    let nodes: Vec<u64> = v["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"].as_u64().unwrap())
        .collect();
    assert_eq!(nodes, vec![2, 3, 1]);
}

#[test]
fn test_bfs_json() {
    let file = edge_file("0 1\n1 2\n2 3\n3 0\n");
    let path = file.path().to_str().unwrap();
    let v = json(&run(&["--json", "bfs", path, "0", "--depth", "2"]));
    assert_eq!(v["nodes"], serde_json::json!([0, 1, 2]));
    assert_eq!(v["edges"], serde_json::json!([[0, 1], [1, 2]]));
    assert_eq!(v["depth_reached"], 2);
}

#[test]
fn test_out_of_range_fails_cleanly() {
    let file = edge_file("0 1\n");
    let path = file.path().to_str().unwrap();
    let output = run(&["degree", path, "2"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range"));
}

#[test]
fn test_empty_graph_max_degree_fails() {
    let file = edge_file("");
    let path = file.path().to_str().unwrap();
    let output = run(&["max-degree", path]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("empty"));
}

#[test]
fn test_missing_file_fails() {
    let output = run(&["stats", "/no/such/edges.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
