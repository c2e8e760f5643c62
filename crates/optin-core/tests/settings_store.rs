//! Settings store integration tests.
//!
//! Tests for loading, merging, and writing scoped settings files.

use optin_core::{
    LoadedSettings, ResearchOptInSettings, SettingScope, SettingsStore, RESEARCH_OPT_IN_KEY,
};
use std::fs;
use tempfile::TempDir;

fn write(path: &std::path::Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).expect("Failed to create dir");
    fs::write(path, content).expect("Failed to write settings");
}

/// Test that JSONC comments are handled in both scopes.
#[test]
fn test_load_jsonc_from_both_scopes() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let user_path = temp.path().join("home").join("settings.json");
    write(
        &user_path,
        r#"{
            // user defaults
            "theme": "light",
            "researchOptIn": { "enabled": false }
        }"#,
    );
    write(
        &LoadedSettings::workspace_path(temp.path()),
        r#"{
            /* project opted in */
            "researchOptIn": { "enabled": true, "email": "team@example.com" }
        }"#,
    );

    let settings =
        LoadedSettings::load(temp.path(), Some(&user_path)).expect("Failed to load settings");

    let research = settings.research_opt_in().expect("research settings present");
    assert!(research.enabled);
    assert_eq!(research.email, "team@example.com");
    assert_eq!(
        settings.merged().get("theme"),
        Some(&serde_json::json!("light"))
    );
}

/// Test that missing files give an empty store.
#[test]
fn test_missing_files_are_empty() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let user_path = temp.path().join("nothing.json");

    let settings =
        LoadedSettings::load(temp.path(), Some(&user_path)).expect("Failed to load settings");

    assert!(settings.merged().is_empty());
    assert!(settings.research_opt_in().is_none());
    assert!(settings.sources(RESEARCH_OPT_IN_KEY).is_empty());
}

/// Test that malformed files are reported with their path.
#[test]
fn test_malformed_file_is_an_error() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let user_path = temp.path().join("settings.json");
    write(&user_path, "{ not json");

    let err = LoadedSettings::load(temp.path(), Some(&user_path)).unwrap_err();
    assert!(err.to_string().contains("settings.json"));
}

/// Test that a write lands in the chosen scope and survives a reload.
#[test]
fn test_set_value_persists_and_reloads() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let user_path = temp.path().join("user").join("settings.json");
    write(&user_path, r#"{ "theme": "dark" }"#);

    let mut settings =
        LoadedSettings::load(temp.path(), Some(&user_path)).expect("Failed to load settings");

    let value = ResearchOptInSettings {
        enabled: true,
        email: "a@b.com".to_string(),
        allow_user_research: true,
        allow_feedback_collection: false,
    };
    settings
        .set_value(
            SettingScope::User,
            RESEARCH_OPT_IN_KEY,
            serde_json::to_value(&value).unwrap(),
        )
        .expect("Failed to set value");

    let reloaded =
        LoadedSettings::load(temp.path(), Some(&user_path)).expect("Failed to reload settings");
    assert_eq!(reloaded.research_opt_in(), Some(value));
    // Existing keys are preserved.
    assert_eq!(
        reloaded.merged().get("theme"),
        Some(&serde_json::json!("dark"))
    );
    assert!(!LoadedSettings::workspace_path(temp.path()).exists());
}

/// Test that a write to an unwritable location fails.
#[test]
fn test_set_value_failure_propagates() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    // A regular file where a directory is expected.
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "").unwrap();
    let user_path = blocker.join("settings.json");

    let mut settings = LoadedSettings::from_paths(&user_path, temp.path().join("w.json"))
        .expect("Failed to load settings");
    let result = settings.set_value(
        SettingScope::User,
        RESEARCH_OPT_IN_KEY,
        serde_json::json!({"enabled": false}),
    );
    assert!(result.is_err());
    assert!(!settings.file(SettingScope::User).contains(RESEARCH_OPT_IN_KEY));
    assert!(settings.research_opt_in().is_none());
}
