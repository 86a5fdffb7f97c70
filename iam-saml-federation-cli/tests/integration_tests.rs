//! Integration tests for the IAM SAML Federation CLI binary.
//!
//! These tests cover argument parsing, input validation and JSON output for
//! paths that are decided before any request reaches IAM, plus the failure
//! path when the IAM endpoint cannot be reached.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Helper function to get the CLI binary command
fn cli_command() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("iam-saml-federation"))
}

/// Parse the JSON result printed on stdout
fn stdout_json(output: &std::process::Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(stdout.trim()).expect("Invalid JSON output")
}

#[test]
fn test_cli_help() {
    cli_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Maintains an IAM SAML identity federation provider",
        ))
        .stdout(predicate::str::contains("--saml-metadata-document"))
        .stdout(predicate::str::contains("--saml-metadata-file"))
        .stdout(predicate::str::contains("--check"));
}

#[test]
fn test_cli_version() {
    cli_command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_requires_name() {
    cli_command()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--name <NAME>"));
}

#[test]
fn test_present_without_metadata_is_rejected() {
    let output = cli_command()
        .args(["--name", "example1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "saml_metadata_document must be defined for present state",
        ))
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["changed"], false);
    assert_eq!(json["failed"], true);
    assert_eq!(
        json["msg"],
        "saml_metadata_document must be defined for present state"
    );
    assert!(json.get("provider_arn").is_none());
}

#[test]
fn test_blank_metadata_is_rejected() {
    cli_command()
        .args(["--name", "example1", "--saml-metadata-document", "   "])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"failed\":true"));
}

#[test]
fn test_invalid_name_is_rejected() {
    let output = cli_command()
        .args(["--name", "bad name", "--state", "absent"])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert!(json["msg"]
        .as_str()
        .unwrap()
        .contains("may only contain letters, digits"));
}

#[test]
fn test_metadata_sources_conflict() {
    cli_command()
        .args([
            "--name",
            "example1",
            "--saml-metadata-document",
            "<xml/>",
            "--saml-metadata-file",
            "metadata.xml",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_missing_metadata_file() {
    cli_command()
        .args([
            "--name",
            "example1",
            "--saml-metadata-file",
            "/nonexistent/metadata.xml",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read SAML metadata file"));
}

#[test]
fn test_blank_metadata_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let metadata_path = temp_dir.path().join("metadata.xml");
    fs::write(&metadata_path, "\n\n").unwrap();

    cli_command()
        .args(["--name", "example1", "--saml-metadata-file"])
        .arg(&metadata_path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "saml_metadata_document must be defined for present state",
        ));
}

#[test]
fn test_invalid_state_value() {
    cli_command()
        .args(["--name", "example1", "--state", "gone"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid value 'gone'"));
}

#[test]
fn test_access_key_requires_secret_key() {
    cli_command()
        .args(["--name", "example1", "--state", "absent", "--access-key", "AKIDEXAMPLE"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--secret-key"));
}

#[test]
fn test_unreachable_endpoint_reports_remote_failure() {
    let temp_dir = TempDir::new().unwrap();
    let metadata_path = temp_dir.path().join("metadata.xml");
    fs::write(&metadata_path, "<md:EntityDescriptor/>\n").unwrap();

    let output = cli_command()
        .args([
            "--name",
            "example1",
            "--region",
            "us-east-1",
            "--endpoint-url",
            "http://127.0.0.1:1",
            "--access-key",
            "AKIDEXAMPLE",
            "--secret-key",
            "wJalrXUtnFEMI/K7MDENG",
            "--saml-metadata-file",
        ])
        .arg(&metadata_path)
        .assert()
        .failure()
        .code(2)
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["changed"], false);
    assert_eq!(json["failed"], true);
    assert!(json["msg"].as_str().unwrap().starts_with("Unknown: "));
    assert_eq!(json["debug"], serde_json::json!(["example1"]));
}
