//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn schematica_cli() -> Command {
    Command::cargo_bin("schematica-cli").expect("binary should build")
}

/// Path to schematica library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("schematica")
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_cli_help() {
    let mut cmd = schematica_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Circuit design assistant"));
}

#[test]
fn test_cli_version() {
    let mut cmd = schematica_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_validate_human_summary() {
    let mut cmd = schematica_cli();

    cmd.arg("validate").arg(fixtures_dir().join("blink_led.json"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("LED intermitente con 555"))
        .stdout(predicate::str::contains("8 component(s), 9 connection(s)"));
}

#[test]
fn test_validate_json_round_trips() {
    let mut cmd = schematica_cli();

    cmd.arg("validate")
        .arg(fixtures_dir().join("blink_led.json"))
        .arg("--format")
        .arg("json");
    let assert = cmd.assert().success();

    let output = assert.get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["circuit"]["components"].as_array().unwrap().len(), 8);
}

#[test]
fn test_validate_stdin() {
    let mut cmd = schematica_cli();

    cmd.arg("validate")
        .arg("-")
        .write_stdin(r#"{"response":"ok","circuit":{}}"#);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Esquema propuesto"));
}

#[test]
fn test_validate_rejects_garbage() {
    let mut cmd = schematica_cli();

    cmd.arg("validate").arg("-").write_stdin("not json");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_layout_json_output() {
    let mut cmd = schematica_cli();

    cmd.arg("layout")
        .arg(fixtures_dir().join("fenced_design.txt"))
        .arg("--format")
        .arg("json");
    let assert = cmd.assert().success();

    let output = assert.get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(value["positions"].as_object().unwrap().len(), 4);
    assert!(value["width"].as_f64().unwrap() >= 640.0);
}

#[test]
fn test_render_writes_svg() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("design.svg");

    let mut cmd = schematica_cli();
    cmd.arg("render")
        .arg(fixtures_dir().join("blink_led.json"))
        .arg("--output")
        .arg(&out);
    cmd.assert().success();

    let svg = std::fs::read_to_string(&out).expect("svg written");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("schematic-node"));
}

#[test]
fn test_design_help_lists_provider_flags() {
    let mut cmd = schematica_cli();

    cmd.arg("design").arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--temperature"))
        .stdout(predicate::str::contains("--max-retries"))
        .stdout(predicate::str::contains("gpt-4o-mini"));
}

#[test]
fn test_design_requires_api_key() {
    let mut cmd = schematica_cli();

    cmd.arg("design").arg("un led intermitente");
    cmd.env_remove("OPENAI_API_KEY");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no API key"));
}
