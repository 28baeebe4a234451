//! CLI tests for `woodtag compose` and `woodtag preview`.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use assert_cmd::cargo;

const ITEM: &str = r#"{
    "id": 1042,
    "length": 120, "width": 45, "height": 18,
    "weight": 310,
    "density": 0.52,
    "type": "oak",
    "storage_location": "Rack B-3"
}"#;

fn woodtag_cmd() -> Command {
    Command::new(cargo::cargo_bin!("woodtag"))
}

fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path.to_string_lossy().to_string())
}

fn run_with_stdin(args: &[&str], stdin_body: &str) -> Output {
    let mut child = woodtag_cmd()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn woodtag");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(stdin_body.as_bytes())
        .expect("write stdin body");
    child.wait_with_output().expect("wait for output")
}

#[test]
fn compose_writes_markup_to_stdout() {
    let (_dir, path) = write_temp("item.json", ITEM);
    let output = woodtag_cmd()
        .args(["compose", &path, "--output", "pretty"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let zpl = String::from_utf8(output.stdout).unwrap();
    assert!(zpl.starts_with("^XA\n"), "{zpl}");
    assert!(zpl.ends_with("^XZ\n"), "{zpl}");
    assert!(zpl.contains("^PW456\n^LL204\n"), "{zpl}");
    for field in [
        "^FDLocation: Rack B-3^FS",
        "^FDLxWxH: 120X45X18^FS",
        "^FDWeight (grams): 310^FS",
        "^FDDensity: 0.52g/cm3^FS",
        "^FO36,144^A0N,60,36^FB300,1,0,L,0^FD1042^FS",
        "^FO240,84^BXN,10,200^FD1042^FS",
    ] {
        assert!(zpl.contains(field), "missing {field} in {zpl}");
    }
    assert_eq!(zpl.matches("^FO").count(), 6);
    assert_eq!(zpl.matches("^FS").count(), 6);
}

#[test]
fn compose_is_deterministic() {
    let (_dir, path) = write_temp("item.json", ITEM);
    let first = woodtag_cmd().args(["compose", &path]).output().unwrap();
    let second = woodtag_cmd().args(["compose", &path]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn compose_reads_item_from_stdin() {
    let output = run_with_stdin(&["compose", "-"], r#"{"id": "W-7"}"#);
    assert!(output.status.success(), "{output:?}");
    let zpl = String::from_utf8_lossy(&output.stdout);
    assert!(zpl.contains("^FDW-7^FS"), "{zpl}");
    assert!(zpl.contains("^FDLxWxH: XX^FS"), "{zpl}");
}

#[test]
fn compose_to_file_reports_json_status() {
    let (dir, path) = write_temp("item.json", ITEM);
    let out = dir.path().join("tag.zpl");
    let output = woodtag_cmd()
        .args(["compose", &path, "--out", &out.to_string_lossy(), "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["id"], "1042");
    assert_eq!(json["elements"], 6);

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(json["bytes"], written.len());
    assert!(written.starts_with("^XA"));
}

#[test]
fn item_url_template_adds_qr_code() {
    let (dir, item) = write_temp("item.json", ITEM);
    let config = dir.path().join("woodtag.json");
    fs::write(
        &config,
        r#"{"layout": {"item_url": "https://example.org/wood/{id}"}}"#,
    )
    .unwrap();

    let output = woodtag_cmd()
        .args(["compose", &item, "--config", &config.to_string_lossy()])
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let zpl = String::from_utf8_lossy(&output.stdout);
    assert!(
        zpl.contains("^FO360,24^BQN,2,2,Q,7^FDQA,https://example.org/wood/1042^FS"),
        "{zpl}"
    );
}

#[test]
fn config_resolution_scales_the_page() {
    let (dir, item) = write_temp("item.json", ITEM);
    let config = dir.path().join("woodtag.json");
    fs::write(&config, r#"{"label": {"dpmm": 8}}"#).unwrap();

    let output = woodtag_cmd()
        .args(["compose", &item, "--config", &config.to_string_lossy()])
        .output()
        .unwrap();
    let zpl = String::from_utf8_lossy(&output.stdout);
    assert!(zpl.contains("^PW304\n^LL136\n"), "{zpl}");
}

#[test]
fn preview_writes_png() {
    let (dir, item) = write_temp("item.json", ITEM);
    let png = dir.path().join("tag.png");
    let output = woodtag_cmd()
        .args([
            "preview",
            &item,
            "--out",
            &png.to_string_lossy(),
            "--output",
            "json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["width"], 456);
    assert_eq!(json["height"], 204);

    let bytes = fs::read(&png).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn logo_from_config_is_printed_as_graphic() {
    let (dir, item) = write_temp("item.json", ITEM);
    image::GrayImage::from_fn(16, 2, |x, _| image::Luma([if x < 8 { 0 } else { 255 }]))
        .save(dir.path().join("logo.png"))
        .unwrap();
    let config = dir.path().join("woodtag.json");
    fs::write(&config, r#"{"layout": {"logo": "logo.png"}}"#).unwrap();

    let output = woodtag_cmd()
        .args(["compose", &item, "--config", &config.to_string_lossy()])
        .output()
        .unwrap();

    assert!(output.status.success(), "{output:?}");
    let zpl = String::from_utf8_lossy(&output.stdout);
    assert!(zpl.contains("^FO360,24^GFA,4,4,2,FF00FF00^FS"), "{zpl}");
}

#[test]
fn unreadable_logo_fails_compose() {
    let (dir, item) = write_temp("item.json", ITEM);
    let config = dir.path().join("woodtag.json");
    fs::write(&config, r#"{"layout": {"logo": "missing.png"}}"#).unwrap();

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

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("failed to read logo"), "{message}");
}
