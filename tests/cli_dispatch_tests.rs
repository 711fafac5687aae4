use std::fs;
use std::path::Path;
use std::process::Command;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_dns_records")
}

fn base_with_a_records() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    let records = dir.path().join("records");
    fs::create_dir_all(&records).expect("records dir");
    fs::copy(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/records/a_records.csv"),
        records.join("a_records.csv"),
    )
    .expect("fixture should be copied");
    dir
}

#[test]
fn bare_invocation_converts_from_env_base_dir() {
    let dir = base_with_a_records();
    let output = Command::new(bin())
        .env("DNS_RECORDS_BASE_DIR", dir.path())
        .output()
        .expect("convert should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("convert should emit json");
    assert_eq!(payload["a_records"].as_array().map(Vec::len), Some(2));
    assert!(dir.path().join("parse_dns_csvs.log").exists());
    assert!(dir.path().join(".gitignore").exists());
}

#[test]
fn piped_stdout_carries_only_json() {
    let dir = base_with_a_records();
    let output = Command::new(bin())
        .args(["convert", "--base-dir"])
        .arg(dir.path())
        .output()
        .expect("convert should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(!stdout.contains("Script started."));
}

#[test]
fn pretty_flag_indents_output() {
    let dir = base_with_a_records();
    let output = Command::new(bin())
        .args(["convert", "--pretty", "--base-dir"])
        .arg(dir.path())
        .output()
        .expect("convert should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().count() > 1);
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(payload["a_records"][1]["record_name"], "baz.example.com");
}

#[test]
fn empty_base_dir_emits_empty_object() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(bin())
        .args(["--base-dir"])
        .arg(dir.path())
        .output()
        .expect("convert should run");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "{}");
}

#[test]
fn parse_failure_exits_non_zero_without_json() {
    let dir = base_with_a_records();
    fs::write(
        dir.path().join("records/mx_records.csv"),
        b"enabled,record_name\nyes,\xfe\n",
    )
    .expect("fixture should be written");

    let output = Command::new(bin())
        .args(["convert", "--base-dir"])
        .arg(dir.path())
        .output()
        .expect("convert should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("conversion failed"));
    assert!(stderr.contains("mx_records.csv"));
}

#[test]
fn unwritable_log_warns_on_stderr_and_still_emits_json() {
    let dir = base_with_a_records();
    fs::create_dir(dir.path().join("parse_dns_csvs.log")).expect("blocking dir");

    let output = Command::new(bin())
        .args(["convert", "--base-dir"])
        .arg(dir.path())
        .output()
        .expect("convert should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("convert should emit json");
    assert_eq!(payload["a_records"].as_array().map(Vec::len), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let warning = format!(
        "Warning: Could not write to log file {}: ",
        dir.path().join("parse_dns_csvs.log").display()
    );
    assert!(stderr.contains(&warning), "stderr was: {stderr}");
    assert_eq!(stderr.matches("Warning: Could not write to log file").count(), 16);
}

#[test]
fn types_command_lists_registry() {
    let output = Command::new(bin())
        .arg("types")
        .output()
        .expect("types should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "a_records\ta_records.csv");
    assert_eq!(lines[11], "a_alias_records\ta_alias_records.csv");
}

#[test]
fn unknown_command_returns_usage() {
    let output = Command::new(bin())
        .arg("serve")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: dns_records"));
}

#[test]
fn unknown_flag_returns_usage() {
    let output = Command::new(bin())
        .args(["convert", "--verbose"])
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}
