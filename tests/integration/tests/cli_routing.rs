//! CLI binary integration tests.
//!
//! These run the compiled `grantlens` binary to check command routing,
//! help text and exit codes.

use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Locate the compiled `grantlens` binary in the workspace target directory.
///
/// `cargo test` at the workspace root builds it; with `-p` run
/// `cargo build -p grantlens-cli` first.
fn grantlens_bin() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    // tests/integration -> workspace root
    let workspace_root = manifest_dir
        .parent()
        .expect("tests/ parent")
        .parent()
        .expect("workspace root");
    let bin = workspace_root.join("target").join("debug").join("grantlens");
    assert!(
        bin.exists(),
        "grantlens binary not found at {}; run `cargo build -p grantlens-cli` first",
        bin.display()
    );
    bin
}

/// A command isolated from the caller's home directory and environment.
fn grantlens_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::new(grantlens_bin());
    cmd.env("GRANTLENS_HOME", home.path())
        .env_remove("GRANTLENS_CONFIG")
        .env_remove("GRANTLENS_FILENAME")
        .env_remove("GRANTLENS_LOG");
    cmd
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    let mut cmd = grantlens_cmd(&home);
    let output = cmd.arg("version").output().expect("failed to run grantlens");
    assert!(output.status.success(), "version should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("grantlens "),
        "version output should name the binary, got: {}",
        stdout
    );
}

#[test]
fn test_cli_help_lists_commands() {
    let home = TempDir::new().unwrap();
    let mut cmd = grantlens_cmd(&home);
    let output = cmd.arg("--help").output().expect("failed to run grantlens");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("kms"), "help should mention 'kms', got: {}", stdout);
    assert!(stdout.contains("config"), "help should mention 'config', got: {}", stdout);
}

#[test]
fn test_cli_unknown_command() {
    let home = TempDir::new().unwrap();
    let mut cmd = grantlens_cmd(&home);
    let output = cmd.arg("nonexistent-command").output().expect("failed to run grantlens");
    assert!(
        !output.status.success(),
        "unknown command should return non-zero exit code"
    );
}

#[test]
fn test_cli_grants_list_requires_name() {
    let home = TempDir::new().unwrap();
    let mut cmd = grantlens_cmd(&home);
    let output = cmd
        .args(["kms", "grants", "list"])
        .output()
        .expect("failed to run grantlens");
    assert!(!output.status.success(), "missing secret name should be a usage error");
}

#[test]
fn test_cli_config_path_honors_home() {
    let home = TempDir::new().unwrap();
    let mut cmd = grantlens_cmd(&home);
    let output = cmd.args(["config", "path"]).output().expect("failed to run grantlens");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = home.path().join("grantlens.json5");
    assert_eq!(stdout.trim(), expected.display().to_string());
}
