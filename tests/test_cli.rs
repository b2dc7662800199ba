//! Integration tests for the command-line entry points

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn fund_me() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fund-me"))
}

/// Temporary working directory whose .env lacks CONTRACT_ADDRESS.
fn incomplete_env_dir() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    fs::write(
        temp_dir.path().join(".env"),
        "# Test Environment Variables\nRPC_URL=http://127.0.0.1:8545\n",
    )
    .expect("Failed to write test .env file");
    temp_dir
}

#[test]
fn test_help_binary() {
    let output = Command::new(env!("CARGO_BIN_EXE_help"))
        .output()
        .expect("Failed to execute help binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("FUND ME CLIENT"));
    assert!(stdout.contains("CONTRACT_ADDRESS"));
}

#[test]
fn test_no_command_prints_usage() {
    let output = fund_me().output().expect("Failed to execute fund-me");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("withdraw"));
}

#[test]
fn test_unknown_command_is_rejected() {
    let output = fund_me()
        .arg("steal")
        .output()
        .expect("Failed to execute fund-me");

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown command: steal"));
}

#[test]
fn test_missing_configuration_fails() {
    let dir = incomplete_env_dir();
    let output = fund_me()
        .arg("balance")
        .env_clear()
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute fund-me");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CONTRACT_ADDRESS"));
}
