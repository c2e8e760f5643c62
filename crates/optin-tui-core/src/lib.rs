//! Core types and utilities for optin TUI.
//!
//! This crate provides foundational types shared across the TUI crates:
//! - Theme system with color definitions
//! - Terminal event source
//! - Key predicates for the keyboard contract

pub mod event;
pub mod theme;

pub use event::{
    is_backspace, is_delete, is_enter, is_escape, is_quit, is_tab, printable_char, Event,
    EventHandler, EventLoopHandle,
};
pub use theme::Theme;
