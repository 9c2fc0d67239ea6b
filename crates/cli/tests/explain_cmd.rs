//! CLI tests for the `stepopt explain` subcommand.

use std::process::Command;

use assert_cmd::cargo;

fn stepopt_cmd() -> Command {
    Command::new(cargo::cargo_bin!("stepopt"))
}

#[test]
fn explain_known_code_json_returns_explanation() {
    let output = stepopt_cmd()
        .args(["explain", "OPT1002", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["id"], "OPT1002");
    assert!(
        json["explanation"]
            .as_str()
            .is_some_and(|t| t.contains("table order")),
        "unexpected explanation: {}",
        json["explanation"]
    );
}

#[test]
fn explain_unknown_code_json_returns_null_explanation() {
    let output = stepopt_cmd()
        .args(["explain", "OPT9999", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(json["id"], "OPT9999");
    assert!(json["explanation"].is_null());
}

#[test]
fn explain_without_id_lists_every_code() {
    let output = stepopt_cmd()
        .args(["explain", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    let entries = json.as_array().expect("array of explanations");
    assert_eq!(entries.len(), 7);
    assert!(entries.iter().all(|e| e["explanation"].is_string()));
    assert_eq!(entries[0]["id"], "OPT0001");
}

#[test]
fn explain_pretty_shows_human_readable_text() {
    let output = stepopt_cmd()
        .args(["explain", "OPT1001", "--output", "pretty"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("OPT1001") && stdout.contains("marker"),
        "unexpected output: {stdout}"
    );
}
