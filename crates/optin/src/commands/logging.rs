//! Logging initialization for the CLI.
//!
//! Interactive modes own the terminal, so they always log to a file in the
//! platform log directory. `show` logs to stderr only when verbose.

use optin_util::{LogConfig, LogLevel, LogTarget};
use std::path::PathBuf;

/// Build the logging configuration for a run.
pub fn log_config(verbose: bool, interactive: bool) -> LogConfig {
    let level = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    let target = if interactive {
        LogTarget::File(optin_util::log::default_log_path())
    } else if verbose {
        LogTarget::Stderr
    } else {
        LogTarget::Discard
    };
    LogConfig {
        level,
        target,
        include_location: verbose,
    }
}

/// Initialize logging. Returns the log file path if logging to file.
pub fn init_logging(verbose: bool, interactive: bool) -> Option<PathBuf> {
    optin_util::log::init(log_config(verbose, interactive))
}
