//! CLI integration tests.
//!
//! These tests exercise the non-interactive commands end-to-end.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

fn optin(project: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_optin"))
        .args(args)
        .arg("--project")
        .arg(project.path())
        .arg("--user-settings")
        .arg(project.path().join("user-settings.json"))
        .env_remove("OPTIN_THEME")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_help_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_optin"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("research"));
    assert!(stdout.contains("show"));
}

#[test]
fn test_version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_optin"))
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("optin"));
}

#[test]
fn test_show_without_settings() {
    let project = TempDir::new().unwrap();
    let output = optin(&project, &["show"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("null"));
    assert!(stdout.contains("Sources: none"));
}

#[test]
fn test_show_reads_workspace_settings() {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join(".optin")).unwrap();
    fs::write(
        project.path().join(".optin/settings.json"),
        r#"{
            // opted in for this project
            "researchOptIn": { "enabled": true, "email": "a@b.com", "allowUserResearch": true }
        }"#,
    )
    .unwrap();

    let output = optin(&project, &["show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#""email": "a@b.com""#));
    assert!(stdout.contains(r#""allowUserResearch": true"#));
    assert!(stdout.contains("Workspace Settings:"));
}

#[test]
fn test_show_rejects_malformed_settings() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join("user-settings.json"), "{ not json").unwrap();

    let output = optin(&project, &["show"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid settings"));
}
