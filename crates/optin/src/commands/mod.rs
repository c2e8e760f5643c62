//! Command handlers for the CLI.

pub mod logging;
pub mod show;
