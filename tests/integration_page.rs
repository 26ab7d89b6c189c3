use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn receipt_view(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("receipt-view").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

const PAGE_ARGS: [&str; 9] = [
    "page",
    "--receipt",
    "abc123",
    "--keydate",
    "2021-03-01T10:00:00Z",
    "--now",
    "2021-03-04T10:00:00Z",
    "--utc-offset",
    "UTC",
];

#[test]
fn test_page_writes_html_file() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("receipt.html");

    receipt_view(&dir)
        .args(PAGE_ARGS)
        .args(["--output", output_path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote"));

    let html = fs::read_to_string(&output_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<svg"));
    assert!(html.contains(r#"class="yellow-square""#));
    assert!(html.contains(r#"<span id="keydate">March 01, 2021, 10:00 AM UTC</span>"#));
    assert!(html.contains(r#"<span id="now">March 04, 2021, 10:00 AM UTC</span>"#));
    assert!(html.contains("Toggle 12 or 24 hour"));
    assert!(html.contains("\"hour24\":{\"keydate\":\"March 01, 2021, 10:00 UTC\""));
}

#[test]
fn test_page_to_stdout() {
    let dir = TempDir::new().unwrap();

    receipt_view(&dir)
        .args(PAGE_ARGS)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<!DOCTYPE html>"))
        .stdout(predicate::str::contains(r#"<p id="receipt">abc123</p>"#));
}

#[test]
fn test_page_without_footer_has_no_button() {
    let dir = TempDir::new().unwrap();

    receipt_view(&dir)
        .args(PAGE_ARGS)
        .arg("--no-footer")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<div id="jsfooter"></div>"#))
        .stdout(predicate::str::contains("Toggle 12 or 24 hour").not());
}

#[test]
fn test_page_qr_size_from_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".receipt-view.toml"), "[qr]\nsize = 240\n").unwrap();

    receipt_view(&dir)
        .args(PAGE_ARGS)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"width="240" height="240" viewBox="#))
        .stdout(predicate::str::contains("<?xml").not());
}
