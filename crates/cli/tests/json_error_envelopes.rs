//! Failure output: the JSON error envelope and pretty diagnostics.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn woodtag_cmd() -> Command {
    Command::new(cargo::cargo_bin!("woodtag"))
}

fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path.to_string_lossy().to_string())
}

fn assert_envelope(output: &std::process::Output) -> String {
    assert_eq!(output.status.code(), Some(1), "{output:?}");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "command_failed");
    json["message"].as_str().unwrap().to_string()
}

#[test]
fn missing_item_file_json_envelope() {
    let output = woodtag_cmd()
        .args(["compose", "/nonexistent/item.json", "--output", "json"])
        .output()
        .unwrap();
    let message = assert_envelope(&output);
    assert!(message.contains("failed to read item record"), "{message}");
}

#[test]
fn malformed_item_json_envelope() {
    let (_dir, path) = write_temp("item.json", "{\n  \"id\": 7,\n  \"weight\": ,\n}");
    let output = woodtag_cmd()
        .args(["compose", &path, "--output", "json"])
        .output()
        .unwrap();
    let message = assert_envelope(&output);
    assert!(message.contains("invalid item record"), "{message}");
    assert!(message.contains("line 3"), "{message}");
}

#[test]
fn malformed_item_pretty_shows_source_snippet() {
    let (_dir, path) = write_temp("item.json", "{\n  \"id\": 7,\n  \"weight\": ,\n}");
    let output = woodtag_cmd()
        .args(["compose", &path, "--output", "pretty"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid item record"), "{stderr}");
    assert!(stderr.contains("\"weight\": ,"), "{stderr}");
    assert!(!stderr.contains('\x1b'), "colour codes on a redirected stderr: {stderr}");
    assert!(stderr.contains("error:"), "{stderr}");
}

#[test]
fn blank_id_is_rejected() {
    let (_dir, path) = write_temp("item.json", r#"{"id": "  ", "length": 4}"#);
    let output = woodtag_cmd()
        .args(["compose", &path, "--output", "json"])
        .output()
        .unwrap();
    let message = assert_envelope(&output);
    assert!(message.contains("empty id"), "{message}");
}

#[test]
fn unknown_config_key_is_rejected() {
    let (dir, item) = write_temp("item.json", r#"{"id": 1}"#);
    let config = dir.path().join("woodtag.json");
    fs::write(&config, r#"{"label": {"dpi": 300}}"#).unwrap();

    let output = woodtag_cmd()
        .args([
            "compose",
            &item,
            "--config",
            &config.to_string_lossy(),
            "--output",
            "json",
        ])
        .output()
        .unwrap();
    let message = assert_envelope(&output);
    assert!(message.contains("unknown field `dpi`"), "{message}");
}

#[test]
fn oversized_style_fails_layout() {
    let (dir, item) = write_temp("item.json", r#"{"id": 1}"#);
    let config = dir.path().join("woodtag.json");
    fs::write(
        &config,
        r#"{"layout": {"qr": {"magnification": 11}, "item_url": "https://example.org/{id}"}}"#,
    )
    .unwrap();

    let output = woodtag_cmd()
        .args([
            "compose",
            &item,
            "--config",
            &config.to_string_lossy(),
            "--output",
            "json",
        ])
        .output()
        .unwrap();
    let message = assert_envelope(&output);
    assert!(message.contains("cannot lay out tag for item 1"), "{message}");
}
