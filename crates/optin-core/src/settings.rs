//! Scoped settings persistence.
//!
//! Settings live in two JSON files:
//! 1. User settings: `<config dir>/optin/settings.json`
//! 2. Workspace settings: `<project>/.optin/settings.json`
//!
//! Workspace values override user values key by key. Both files may
//! contain `//` and `/* */` comments.

use crate::error::{ConfigError, CoreResult};
use crate::research::{ResearchOptInSettings, RESEARCH_OPT_IN_KEY};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// File name used for both scopes.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Directory inside a project that holds workspace settings.
pub const WORKSPACE_DIR_NAME: &str = ".optin";

/// Where a setting is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SettingScope {
    /// Per-user settings shared by every project.
    #[default]
    User,
    /// Settings for the current project only.
    Workspace,
}

impl SettingScope {
    /// Get all scopes in display order.
    pub fn all() -> &'static [SettingScope] {
        &[SettingScope::User, SettingScope::Workspace]
    }

    /// Get the display name for this scope.
    pub fn name(&self) -> &'static str {
        match self {
            SettingScope::User => "User Settings",
            SettingScope::Workspace => "Workspace Settings",
        }
    }
}

/// A settings store that accepts scoped writes.
pub trait SettingsStore {
    /// Write `value` under `key` in the given scope.
    fn set_value(&mut self, scope: SettingScope, key: &str, value: Value) -> CoreResult<()>;
}

/// One settings file and its parsed contents.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    settings: Map<String, Value>,
}

impl SettingsFile {
    /// An empty settings file that will be created at `path` on first save.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings: Map::new(),
        }
    }

    /// Load a settings file. A missing file yields an empty map.
    pub fn load(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self::empty(path));
        }

        let content = std::fs::read_to_string(&path)?;
        let settings = parse_jsonc(&content, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), keys = settings.len(), "Loaded settings file");
        Ok(Self { path, settings })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parsed top-level settings.
    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// Whether the file defines `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    /// Set a key in memory without saving.
    pub fn set(&mut self, key: &str, value: Value) {
        self.settings.insert(key.to_string(), value);
    }

    /// Write the settings to disk as pretty JSON.
    pub fn save(&self) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            ConfigError::InvalidJson {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        std::fs::write(&self.path, content)?;
        tracing::info!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// User and workspace settings with a merged view.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    user: SettingsFile,
    workspace: SettingsFile,
    merged: Map<String, Value>,
}

impl LoadedSettings {
    /// Load settings for a project.
    ///
    /// `user_path` overrides the default user settings location.
    pub fn load(project_dir: &Path, user_path: Option<&Path>) -> CoreResult<Self> {
        let user_path = match user_path {
            Some(path) => path.to_path_buf(),
            None => Self::default_user_path().ok_or_else(|| {
                ConfigError::InvalidPath("Could not determine config directory".to_string())
            })?,
        };
        let workspace_path = Self::workspace_path(project_dir);
        Self::from_paths(user_path, workspace_path)
    }

    /// Load settings from explicit file paths.
    pub fn from_paths(user_path: impl Into<PathBuf>, workspace_path: impl Into<PathBuf>) -> CoreResult<Self> {
        let user = SettingsFile::load(user_path)?;
        let workspace = SettingsFile::load(workspace_path)?;
        Ok(Self::from_files(user, workspace))
    }

    /// Build from already loaded files.
    pub fn from_files(user: SettingsFile, workspace: SettingsFile) -> Self {
        let mut loaded = Self {
            user,
            workspace,
            merged: Map::new(),
        };
        loaded.recompute();
        loaded
    }

    /// Default location of the user settings file.
    pub fn default_user_path() -> Option<PathBuf> {
        optin_util::config_dir().map(|dir| dir.join(SETTINGS_FILE_NAME))
    }

    /// Location of the workspace settings file for a project.
    pub fn workspace_path(project_dir: &Path) -> PathBuf {
        project_dir.join(WORKSPACE_DIR_NAME).join(SETTINGS_FILE_NAME)
    }

    /// The file backing a scope.
    pub fn file(&self, scope: SettingScope) -> &SettingsFile {
        match scope {
            SettingScope::User => &self.user,
            SettingScope::Workspace => &self.workspace,
        }
    }

    fn file_mut(&mut self, scope: SettingScope) -> &mut SettingsFile {
        match scope {
            SettingScope::User => &mut self.user,
            SettingScope::Workspace => &mut self.workspace,
        }
    }

    /// The merged view (workspace wins).
    pub fn merged(&self) -> &Map<String, Value> {
        &self.merged
    }

    /// Decode a merged value. Undecodable values are treated as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.merged.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring undecodable setting");
                None
            }
        }
    }

    /// The merged research opt-in settings, if any scope defines them.
    pub fn research_opt_in(&self) -> Option<ResearchOptInSettings> {
        self.get(RESEARCH_OPT_IN_KEY)
    }

    /// Scopes that define `key`, in merge order.
    pub fn sources(&self, key: &str) -> Vec<SettingScope> {
        SettingScope::all()
            .iter()
            .copied()
            .filter(|scope| self.file(*scope).contains(key))
            .collect()
    }

    fn recompute(&mut self) {
        let mut merged = self.user.settings.clone();
        for (key, value) in &self.workspace.settings {
            merged.insert(key.clone(), value.clone());
        }
        self.merged = merged;
    }
}

impl SettingsStore for LoadedSettings {
    fn set_value(&mut self, scope: SettingScope, key: &str, value: Value) -> CoreResult<()> {
        let file = self.file_mut(scope);
        let previous = file.settings.insert(key.to_string(), value);
        if let Err(e) = file.save() {
            // Keep memory in step with what is on disk.
            match previous {
                Some(previous) => file.settings.insert(key.to_string(), previous),
                None => file.settings.remove(key),
            };
            return Err(e);
        }
        self.recompute();
        tracing::info!(?scope, key, "Setting updated");
        Ok(())
    }
}

/// Parse JSONC into a top-level object.
fn parse_jsonc(content: &str, source: &str) -> CoreResult<Map<String, Value>> {
    let stripped = strip_comments(content);
    if stripped.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_str(&stripped).map_err(|e| ConfigError::InvalidJson {
        path: source.to_string(),
        message: e.to_string(),
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::InvalidJson {
            path: source.to_string(),
            message: format!("expected an object, found {}", json_type_name(&other)),
        }
        .into()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Strip `//` and `/* */` comments that appear outside string literals.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                // Keep the newline so line numbers in errors stay right.
                for next in chars.by_ref() {
                    if next == '\n' {
                        result.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if next == '\n' {
                        result.push('\n');
                    }
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_comments() {
        let input = r#"{
            // Line comment
            "key": "value", // trailing comment
            /* block comment */
            "key2": "val/*not a comment*/ue",
            "url": "https://example.com"
        }"#;

        let result = strip_comments(input);
        assert!(!result.contains("Line comment"));
        assert!(!result.contains("trailing comment"));
        assert!(!result.contains("block comment"));
        assert!(result.contains("val/*not a comment*/ue"));
        assert!(result.contains("https://example.com"));
    }

    #[test]
    fn test_strip_comments_escaped_quote() {
        let input = r#"{"key": "say \"hi\" // not a comment"}"#;
        assert_eq!(strip_comments(input), input);
    }

    #[test]
    fn test_parse_jsonc_rejects_non_object() {
        let err = parse_jsonc("[1, 2]", "test").unwrap_err();
        assert!(err.to_string().contains("expected an object"));
    }

    #[test]
    fn test_parse_jsonc_empty_is_empty_map() {
        let map = parse_jsonc("  // nothing here\n", "test").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_workspace_overrides_user() {
        let mut user = SettingsFile::empty("/tmp/user.json");
        user.set("theme", json!("light"));
        user.set("researchOptIn", json!({"enabled": false}));
        let mut workspace = SettingsFile::empty("/tmp/workspace.json");
        workspace.set("researchOptIn", json!({"enabled": true, "email": "a@b.com"}));

        let loaded = LoadedSettings::from_files(user, workspace);
        assert_eq!(loaded.merged().get("theme"), Some(&json!("light")));

        let research = loaded.research_opt_in().unwrap();
        assert!(research.enabled);
        assert_eq!(research.email, "a@b.com");
        assert_eq!(
            loaded.sources(RESEARCH_OPT_IN_KEY),
            vec![SettingScope::User, SettingScope::Workspace]
        );
    }

    #[test]
    fn test_undecodable_value_is_absent() {
        let mut user = SettingsFile::empty("/tmp/user.json");
        user.set("researchOptIn", json!("yes please"));
        let loaded = LoadedSettings::from_files(user, SettingsFile::empty("/tmp/w.json"));
        assert!(loaded.research_opt_in().is_none());
    }

    #[test]
    fn test_set_value_writes_scope_file() {
        let dir = tempfile::tempdir().unwrap();
        let user_path = dir.path().join("user").join("settings.json");
        let workspace_path = LoadedSettings::workspace_path(dir.path());

        let mut loaded = LoadedSettings::from_paths(&user_path, &workspace_path).unwrap();
        loaded
            .set_value(SettingScope::Workspace, "researchOptIn", json!({"enabled": true}))
            .unwrap();

        assert!(workspace_path.exists());
        assert!(!user_path.exists());
        assert!(loaded.research_opt_in().unwrap().enabled);

        let reloaded = SettingsFile::load(&workspace_path).unwrap();
        assert_eq!(
            reloaded.settings().get("researchOptIn"),
            Some(&json!({"enabled": true}))
        );
    }

    #[test]
    fn test_scope_names() {
        assert_eq!(SettingScope::User.name(), "User Settings");
        assert_eq!(SettingScope::Workspace.name(), "Workspace Settings");
        assert_eq!(SettingScope::default(), SettingScope::User);
    }
}
