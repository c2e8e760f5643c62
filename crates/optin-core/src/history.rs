//! Session history log.
//!
//! The history collects notifications and command echoes shown above the
//! prompt. It is a write-mostly sink: components append, the shell renders.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Kind of history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryItemKind {
    /// Informational notification.
    Info,
    /// Something went wrong.
    Error,
    /// Echo of what the user typed.
    Command,
}

/// A history entry as produced by a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(rename = "type")]
    pub kind: HistoryItemKind,
    pub text: String,
}

impl HistoryItem {
    /// Create an info entry.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: HistoryItemKind::Info,
            text: text.into(),
        }
    }

    /// Create an error entry.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: HistoryItemKind::Error,
            text: text.into(),
        }
    }

    /// Create a command echo entry.
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            kind: HistoryItemKind::Command,
            text: text.into(),
        }
    }
}

/// Receives history entries.
pub trait HistorySink {
    /// Append an entry stamped with `timestamp_ms` (milliseconds since the epoch).
    fn add_item(&mut self, item: HistoryItem, timestamp_ms: i64);
}

/// A history entry with its timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedItem {
    #[serde(flatten)]
    pub item: HistoryItem,
    pub timestamp_ms: i64,
}

/// Bounded in-memory history.
#[derive(Debug, Clone)]
pub struct History {
    items: VecDeque<TimedItem>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Maximum number of entries kept by default.
    pub const DEFAULT_CAPACITY: usize = 500;

    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an empty history that keeps at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Entries, oldest first.
    pub fn items(&self) -> impl DoubleEndedIterator<Item = &TimedItem> + ExactSizeIterator {
        self.items.iter()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&TimedItem> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl HistorySink for History {
    fn add_item(&mut self, item: HistoryItem, timestamp_ms: i64) {
        tracing::debug!(kind = ?item.kind, text = %item.text, "History item added");
        self.items.push_back(TimedItem { item, timestamp_ms });
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
    }
}
