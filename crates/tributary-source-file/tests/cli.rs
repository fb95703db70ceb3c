//! End-to-end tests of the connector binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use predicates::str::contains;
use serde_json::json;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let root = tempfile::tempdir().expect("create temp dir");
    let data = root.path().join("data");
    fs::create_dir(&data).expect("create data dir");
    fs::write(
        data.join("users.json"),
        json!([{"id": 1}, {"id": 2}]).to_string(),
    )
    .expect("write stream");
    write_config(root.path(), &data);
    root
}

fn write_config(root: &Path, directory: &Path) {
    let config = json!({"directory": directory.display().to_string()});
    fs::write(root.join("config.json"), config.to_string()).expect("write config");
}

fn arg(root: &TempDir, name: &str) -> String {
    root.path().join(name).display().to_string()
}

#[test]
fn spec_prints_one_specification_line() {
    let mut command = cargo_bin_cmd!("tributary-source-file");
    command
        .arg("spec")
        .assert()
        .success()
        .stdout(contains("\"type\":\"SPEC\"").and(contains("directory")));
}

#[test]
fn check_reports_failure_with_zero_exit() {
    let root = workspace();
    write_config(root.path(), &root.path().join("missing"));

    let mut command = cargo_bin_cmd!("tributary-source-file");
    command
        .args(["check", "--config", &arg(&root, "config.json")])
        .assert()
        .success()
        .stdout(contains("\"status\":\"FAILED\""));
}

#[test]
fn discover_failure_exits_non_zero_without_output() {
    let root = workspace();

    let mut command = cargo_bin_cmd!("tributary-source-file");
    command
        .args(["discover", "--config", &arg(&root, "absent.json")])
        .env("TRIBUTARY_LOG_FORMAT", "compact")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(contains("discover failed"));
}

#[test]
fn read_streams_records_and_state() {
    let root = workspace();
    fs::write(
        root.path().join("catalog.json"),
        json!({"streams": [{"stream": {"name": "users", "json_schema": {}}, "sync_mode": "incremental"}]})
            .to_string(),
    )
    .expect("write catalog");
    fs::write(root.path().join("state.json"), json!({"streams": {"users": 1}}).to_string())
        .expect("write state");

    let mut command = cargo_bin_cmd!("tributary-source-file");
    let assert = command
        .args([
            "read",
            "--config",
            &arg(&root, "config.json"),
            "--catalog",
            &arg(&root, "catalog.json"),
            "--state",
            &arg(&root, "state.json"),
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected output: {stdout}");
    assert!(lines.first().is_some_and(|line| line.contains("\"id\":2")));
    assert!(lines.last().is_some_and(|line| line.contains("\"users\":2")));
}

#[test]
fn source_rejects_write_as_usage_error() {
    let mut command = cargo_bin_cmd!("tributary-source-file");
    command
        .args(["write", "--config", "c.json", "--catalog", "k.json"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());
}
