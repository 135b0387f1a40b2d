//! Smoke tests running the bitpay-demo binary.
//!
//! Only commands that need no network are exercised here.

use std::process::Command;
use tempfile::TempDir;

fn run_cli(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_bitpay-demo"))
        .args(args)
        .env_remove("BITPAY_PRIVATE_KEY")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_help() {
    let (stdout, _, success) = run_cli(&["--help"]);
    assert!(success);
    assert!(stdout.contains("keygen"));
    assert!(stdout.contains("invoice"));
}

#[test]
fn test_keygen_then_identity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let key_path = temp_dir.path().join("bitpay.key");
    let key_path = key_path.to_str().expect("utf8 path");

    let (stdout, stderr, success) = run_cli(&["keygen", "--output", key_path, "--secret", "s3cret"]);
    assert!(success, "keygen failed: {}{}", stdout, stderr);
    assert!(stdout.contains("Public Key"));

    let (stdout, stderr, success) = run_cli(&["identity", key_path, "--secret", "s3cret"]);
    assert!(success, "identity failed: {}{}", stdout, stderr);

    let (_, _, success) = run_cli(&["identity", key_path, "--secret", "wrong"]);
    assert!(!success);
}

#[test]
fn test_keygen_refuses_existing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let key_path = temp_dir.path().join("bitpay.key");
    let key_path = key_path.to_str().expect("utf8 path");

    assert!(run_cli(&["keygen", "--output", key_path]).2);
    let (_, stderr, success) = run_cli(&["keygen", "--output", key_path]);
    assert!(!success);
    assert!(stderr.contains("already exists"));
}

#[test]
fn test_missing_config_file() {
    let (_, stderr, success) = run_cli(&["--config", "/nonexistent/bitpay.json", "rates"]);
    assert!(!success);
    assert!(stderr.contains("/nonexistent/bitpay.json"));
}
