//! Core types for optin.
//!
//! This crate provides the pieces the terminal front end builds on:
//! - The research opt-in data model
//! - Scoped settings persistence (user and workspace files, JSONC)
//! - The history log that collects notifications
//! - Built-in slash commands

pub mod command;
pub mod error;
pub mod history;
pub mod research;
pub mod settings;

pub use command::{CommandAction, CommandKind, CommandRegistry, DialogKind, SlashCommand};
pub use error::{ConfigError, CoreError, CoreResult};
pub use history::{History, HistoryItem, HistoryItemKind, HistorySink, TimedItem};
pub use research::{OptInState, ResearchOptInSettings, ResearchPreferences, RESEARCH_OPT_IN_KEY};
pub use settings::{LoadedSettings, SettingScope, SettingsFile, SettingsStore};
