//! CLI integration tests for the appboot binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build an `assert_cmd::Command` pointing at the `appboot` binary,
/// with its working directory set to `dir`.
fn appboot_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("appboot");
    cmd.current_dir(dir)
        .env_remove("NUMBER1")
        .env_remove("NUMBER2")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_add_reads_numbers_from_env_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), "NUMBER1=15\nNUMBER2=25\n").unwrap();

    appboot_cmd(temp_dir.path())
        .arg("add")
        .assert()
        .success()
        .stdout(predicate::str::contains("15 + 25 = 40"));

    let log_dir = temp_dir.path().join("logs");
    let log_file = fs::read_dir(&log_dir)
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| path.extension().is_some_and(|ext| ext == "log"))
        .expect("log file should exist");
    let log = fs::read_to_string(log_file).unwrap();
    assert!(log.contains("INFO - The result of adding 15 and 25 is 40"));
}

#[test]
fn test_add_uses_defaults_without_env_file() {
    let temp_dir = TempDir::new().unwrap();

    appboot_cmd(temp_dir.path())
        .args(["add", "--env-file", "absent.env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 + 5 = 15"));
}

#[test]
fn test_unreadable_env_file_exits_with_failure() {
    let temp_dir = TempDir::new().unwrap();
    let bad_source = temp_dir.path().join("directory.env");
    fs::create_dir(&bad_source).unwrap();
    let bad_source = bad_source.display().to_string();

    appboot_cmd(temp_dir.path())
        .args(["--env-file", &bad_source, "add"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(format!(
            "Error: Failed to load environment variables from {bad_source}"
        )));
}

#[test]
fn test_unreadable_env_file_json_names_source_path() {
    let temp_dir = TempDir::new().unwrap();
    let bad_source = temp_dir.path().join("directory.env");
    fs::create_dir(&bad_source).unwrap();
    let bad_source = bad_source.display().to_string();

    let output = appboot_cmd(temp_dir.path())
        .args(["--json", "--env-file", &bad_source, "add"])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();

    // console log records precede the JSON body on stderr
    let stderr = String::from_utf8(output).unwrap();
    let body_start = stderr.find('{').expect("stderr should contain a JSON body");
    let body: Value = serde_json::from_str(&stderr[body_start..]).unwrap();

    assert_eq!(body["success"], false);
    assert_eq!(body["source_path"], Value::String(bad_source));
}

#[test]
fn test_get_prints_default_when_unset() {
    let temp_dir = TempDir::new().unwrap();

    appboot_cmd(temp_dir.path())
        .args(["get", "APPBOOT_CLI_UNSET", "--default", "fallback"])
        .env_remove("APPBOOT_CLI_UNSET")
        .assert()
        .success()
        .stdout(predicate::str::contains("fallback"));
}
