//! Platform directories used by optin.

use std::path::PathBuf;

/// Directory name used under every platform root.
pub const APP_NAME: &str = "optin";

/// Get the user-level config directory.
///
/// On Unix, `~/.config/optin` wins when it already exists. Otherwise the
/// platform config directory is used.
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        if let Some(home) = dirs::home_dir() {
            let xdg_config = home.join(".config").join(APP_NAME);
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }
    }

    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the log directory path.
pub fn log_dir() -> PathBuf {
    // macOS: ~/Library/Logs/optin
    // Linux: ~/.local/state/optin/logs
    // Windows: %LOCALAPPDATA%/optin/logs

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = dirs::home_dir() {
            return home.join("Library/Logs").join(APP_NAME);
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(state_dir) = dirs::state_dir() {
            return state_dir.join(APP_NAME).join("logs");
        }
        if let Some(home) = dirs::home_dir() {
            return home.join(".local/state").join(APP_NAME).join("logs");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(local_app) = dirs::data_local_dir() {
            return local_app.join(APP_NAME).join("logs");
        }
    }

    PathBuf::from(format!(".{APP_NAME}/logs"))
}
