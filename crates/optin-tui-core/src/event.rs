//! Event handling for the TUI.
//!
//! Terminal input is polled on a background task and delivered in order
//! over an unbounded channel, so the UI loop handles one event at a time.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// A tick event for periodic updates.
    Tick,
    /// Text was pasted (from bracketed paste mode).
    Paste(String),
}

/// Handles events from the terminal.
pub struct EventHandler {
    /// Sender for events.
    sender: mpsc::UnboundedSender<Event>,
    /// Receiver for events.
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Get a sender for injecting events.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Start polling the terminal.
    pub fn start(&self) -> EventLoopHandle {
        let sender = self.sender.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let tick_rate = Duration::from_millis(250);

            loop {
                if sender.is_closed() {
                    break;
                }

                if event::poll(tick_rate).unwrap_or(false) {
                    let forwarded = match event::read() {
                        // Release/repeat events would double every keystroke on
                        // terminals that report them.
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            sender.send(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => sender.send(Event::Resize(w, h)),
                        Ok(CrosstermEvent::Paste(text)) => {
                            tracing::debug!("Paste received: {} bytes", text.len());
                            sender.send(Event::Paste(text))
                        }
                        Ok(_) => Ok(()),
                        Err(e) => {
                            tracing::warn!("Error reading event: {}", e);
                            Ok(())
                        }
                    };
                    if forwarded.is_err() {
                        break;
                    }
                } else if sender.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        EventLoopHandle { handle }
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the event loop task.
pub struct EventLoopHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Abort the event loop.
    pub fn abort(self) {
        self.handle.abort();
    }
}

/// Check if a key event is Ctrl+C.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Check if a key event is Escape.
pub fn is_escape(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

/// Check if a key event is Enter.
pub fn is_enter(key: &KeyEvent) -> bool {
    key.code == KeyCode::Enter
}

/// Check if a key event is Backspace.
pub fn is_backspace(key: &KeyEvent) -> bool {
    key.code == KeyCode::Backspace
}

/// Check if a key event is Delete.
pub fn is_delete(key: &KeyEvent) -> bool {
    key.code == KeyCode::Delete
}

/// Check if a key event is the next-focus signal.
///
/// Shift+Tab arrives as `BackTab` and is not a next-focus signal.
pub fn is_tab(key: &KeyEvent) -> bool {
    key.code == KeyCode::Tab
}

/// The character a key event types, if it types one.
///
/// Control and meta chords do not type anything. Shift does.
pub fn printable_char(key: &KeyEvent) -> Option<char> {
    let chord = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::META | KeyModifiers::SUPER;
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(chord) && !c.is_control() => Some(c),
        _ => None,
    }
}
