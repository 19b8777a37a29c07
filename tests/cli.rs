//! Command line tests that exit before the terminal UI starts

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("idpc-autocomplete").unwrap();
    cmd.env_remove("IDPC_API_KEY");
    cmd
}

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_help_lists_options() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--api-key"))
        .stdout(predicate::str::contains("--postcode-outward"))
        .stdout(predicate::str::contains("--check-key"));
}

#[test]
fn test_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_config_file_fails() {
    cmd()
        .args(["--config", "/nonexistent/idpc/config.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_missing_api_key_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key configured"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "debounce_ms = \"soon\"");

    cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_unknown_output_attribute_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        r##"
api_key = "iddqd"

[output_fields]
line_9 = "#line_9"
"##,
    );

    cmd()
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line_9"));
}

#[test]
fn test_api_key_flag_does_not_rescue_bad_attribute() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "[output_fields]\nflat = \"#flat\"\n");

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["--api-key", "iddqd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown address attribute"));
}
