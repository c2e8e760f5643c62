//! Logging setup using tracing.
//!
//! The interactive modes own the terminal, so their logs go to a file.
//! Non-interactive commands may log to stderr instead.

use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parse a log level from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Where log output is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    /// Filter is installed but nothing is printed.
    #[default]
    Discard,
    /// Plain text on stderr.
    Stderr,
    /// Append to the given file, creating parent directories.
    File(PathBuf),
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Log level used when `RUST_LOG` is not set.
    pub level: LogLevel,
    /// Output destination.
    pub target: LogTarget,
    /// Whether to include file/line info in logs.
    pub include_location: bool,
}

impl LogConfig {
    /// Directives applied to optin's own crates at the configured level.
    pub fn directives(&self) -> String {
        let level = self.level.as_str();
        [
            "optin",
            "optin_core",
            "optin_tui",
            "optin_tui_core",
            "optin_tui_dialog",
        ]
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
    }
}

/// Initialize logging with the given configuration.
///
/// Call once at startup. Returns the log file path when logging to a file.
/// If a global subscriber is already installed the call is a no-op.
pub fn init(config: LogConfig) -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.directives()));

    match config.target {
        LogTarget::Discard => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::sink)
                .try_init();
            None
        }
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(std::io::stderr)
                .try_init();
            None
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Warning: Could not create log directory: {e}");
                    return None;
                }
            }

            let file = match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file: {e}");
                    return None;
                }
            };

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(Mutex::new(file))
                .try_init();
            Some(path)
        }
    }
}

/// Get the default log file path.
pub fn default_log_path() -> PathBuf {
    crate::path::log_dir().join(format!("{}.log", crate::path::APP_NAME))
}
