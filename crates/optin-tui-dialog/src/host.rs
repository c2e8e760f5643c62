//! Lifecycle of the research dialog and delivery of its commits.

use chrono::Utc;
use crossterm::event::KeyEvent;
use optin_core::{
    CoreResult, HistoryItem, HistorySink, ResearchOptInSettings, SettingScope, SettingsStore,
    RESEARCH_OPT_IN_KEY,
};
use optin_tui_core::Theme;
use ratatui::{layout::Rect, Frame};
use tracing::{debug, info};

use crate::research::{DialogEvent, ResearchOptInDialog};

/// Notification appended after an enabled commit.
pub const SAVED_MESSAGE: &str =
    "Research opt-in settings saved. Thank you for helping improve Gemini CLI!";

/// Notification appended after a disabled commit.
pub const DISABLED_MESSAGE: &str = "Research opt-in disabled.";

/// Owns the research dialog while it is open.
///
/// Every commit the dialog produces is written to the settings store
/// before the next event is handled; a notification follows each write.
#[derive(Debug, Default)]
pub struct ResearchDialogHost {
    dialog: Option<ResearchOptInDialog>,
    error: Option<String>,
}

impl ResearchDialogHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog seeded from the last persisted settings.
    pub fn open(&mut self, seed: Option<&ResearchOptInSettings>) {
        debug!(seeded = seed.is_some(), "research dialog opened");
        self.dialog = Some(ResearchOptInDialog::new(seed));
        self.error = None;
    }

    /// Close the dialog, discarding its session.
    pub fn close(&mut self) {
        if self.dialog.take().is_some() {
            debug!("research dialog closed");
        }
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    /// The open dialog.
    pub fn dialog(&self) -> Option<&ResearchOptInDialog> {
        self.dialog.as_ref()
    }

    /// Show an error line in the dialog.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Handle a key event while open.
    ///
    /// A store failure is returned before any notification is appended;
    /// the dialog stays open.
    pub fn handle_key(
        &mut self,
        key: &KeyEvent,
        store: &mut dyn SettingsStore,
        sink: &mut dyn HistorySink,
    ) -> CoreResult<()> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Ok(());
        };
        let event = dialog.handle_key(key);
        self.dispatch(event, store, sink)
    }

    /// Handle pasted text while open.
    pub fn handle_paste(
        &mut self,
        text: &str,
        store: &mut dyn SettingsStore,
        sink: &mut dyn HistorySink,
    ) -> CoreResult<()> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Ok(());
        };
        let event = dialog.handle_paste(text);
        self.dispatch(event, store, sink)
    }

    fn dispatch(
        &mut self,
        event: DialogEvent,
        store: &mut dyn SettingsStore,
        sink: &mut dyn HistorySink,
    ) -> CoreResult<()> {
        match event {
            DialogEvent::None => Ok(()),
            DialogEvent::Exit => {
                self.close();
                Ok(())
            }
            DialogEvent::Commit { settings, scope } => persist(&settings, scope, store, sink),
        }
    }

    /// Render the dialog if open.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(dialog) = &self.dialog {
            dialog.render(frame, area, theme, self.error.as_deref());
        }
    }
}

fn persist(
    settings: &ResearchOptInSettings,
    scope: SettingScope,
    store: &mut dyn SettingsStore,
    sink: &mut dyn HistorySink,
) -> CoreResult<()> {
    let value = serde_json::to_value(settings)?;
    store.set_value(scope, RESEARCH_OPT_IN_KEY, value)?;
    info!(?scope, enabled = settings.enabled, "research opt-in committed");

    let text = if settings.enabled {
        SAVED_MESSAGE
    } else {
        DISABLED_MESSAGE
    };
    sink.add_item(HistoryItem::info(text), Utc::now().timestamp_millis());
    Ok(())
}
