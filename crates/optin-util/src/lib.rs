//! Shared utilities for optin.
//!
//! - Logging setup with tracing
//! - Platform directories for settings and logs

pub mod log;
pub mod path;

pub use log::{LogConfig, LogLevel, LogTarget};
pub use path::{config_dir, log_dir, APP_NAME};
