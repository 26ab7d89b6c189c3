use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const KEYDATE: &str = "2021-03-01T10:00:00Z";

fn receipt_view(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("receipt-view").unwrap();
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    cmd
}

fn view_args<'a>(now: &'a str, extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec![
        "view",
        "--receipt",
        "abc123",
        "--keydate",
        KEYDATE,
        "--now",
        now,
        "--utc-offset",
        "UTC",
    ];
    args.extend_from_slice(extra);
    args
}

fn view_json(dir: &TempDir, now: &str, extra: &[&str]) -> serde_json::Value {
    let mut args = vec!["--format", "json"];
    args.extend(view_args(now, extra));
    let output = receipt_view(dir).args(&args).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_view_same_instant_is_today() {
    let dir = TempDir::new().unwrap();

    receipt_view(&dir)
        .args(view_args("2021-03-01T10:00:00Z", &[]))
        .assert()
        .success()
        .stdout(predicate::str::contains("abc123"))
        .stdout(predicate::str::contains("Today"))
        .stdout(predicate::str::contains(
            "Receipt: March 01, 2021, 10:00 AM UTC",
        ))
        .stdout(predicate::str::contains("Now:     March 01, 2021, 10:00 AM UTC"));
}

#[test]
fn test_view_json_buckets_by_age() {
    let dir = TempDir::new().unwrap();
    let cases = [
        ("2021-02-28T10:00:00Z", "future", "grey-square"),
        ("2021-03-02T09:59:59Z", "today", "blue-square"),
        ("2021-03-02T10:00:00Z", "this-week", "yellow-square"),
        ("2021-03-08T10:00:00Z", "older", "red-square"),
    ];
    for (now, bucket, class) in cases {
        let json = view_json(&dir, now, &[]);
        assert_eq!(json["state"]["age_bucket"], bucket, "now = {now}");
        assert_eq!(json["status_class"], class, "now = {now}");
    }
}

#[test]
fn test_view_hour24_flag() {
    let dir = TempDir::new().unwrap();
    let json = view_json(&dir, "2021-03-01T18:30:00Z", &["--hour24"]);
    assert_eq!(json["state"]["hour12"], false);
    assert_eq!(json["state"]["now_time"], "March 01, 2021, 18:30 UTC");
}

#[test]
fn test_view_odd_toggle_flips_and_even_restores() {
    let dir = TempDir::new().unwrap();
    let original = view_json(&dir, "2021-03-01T18:30:00Z", &[]);
    let once = view_json(&dir, "2021-03-01T18:30:00Z", &["--toggle", "1"]);
    let twice = view_json(&dir, "2021-03-01T18:30:00Z", &["--toggle", "2"]);

    assert_eq!(original["state"]["now_time"], "March 01, 2021, 6:30 PM UTC");
    assert_eq!(once["state"]["now_time"], "March 01, 2021, 18:30 UTC");
    assert_eq!(once["state"]["receipt_time"], "March 01, 2021, 10:00 UTC");
    assert_eq!(twice["state"], original["state"]);
}

#[test]
fn test_view_unparseable_keydate_is_invalid_date() {
    let dir = TempDir::new().unwrap();

    receipt_view(&dir)
        .args([
            "--format",
            "json",
            "view",
            "--receipt",
            "abc123",
            "--keydate",
            "last tuesday",
            "--now",
            "2021-03-01T10:00:00Z",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"receipt_time\": \"Invalid Date\""))
        .stdout(predicate::str::contains("\"age_bucket\": \"unknown\""))
        .stdout(predicate::str::contains("red-square"));
}

#[test]
fn test_view_displays_in_configured_offset() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".receipt-view.toml"),
        "[display]\nutc_offset = \"+02:00\"\nhour12 = false\n",
    )
    .unwrap();

    receipt_view(&dir)
        .args([
            "view",
            "--receipt",
            "abc123",
            "--keydate",
            KEYDATE,
            "--now",
            KEYDATE,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("March 01, 2021, 12:00 GMT+2"));
}

#[test]
fn test_view_rejects_bad_now() {
    let dir = TempDir::new().unwrap();

    receipt_view(&dir)
        .args(view_args("soon", &[]))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid --now"));
}

#[test]
fn test_view_rejects_bad_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".receipt-view.toml"), "[display\n").unwrap();

    receipt_view(&dir)
        .args(view_args(KEYDATE, &[]))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
}
