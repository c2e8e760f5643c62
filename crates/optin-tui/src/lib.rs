//! Terminal UI for optin.
//!
//! Built with ratatui: a history panel, a prompt line that accepts slash
//! commands, and the research opt-in dialog drawn on top.

pub mod app;

pub use app::{install_panic_hook, restore_terminal, App, AppMode, AppState};
