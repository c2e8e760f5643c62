//! Focus cycling between the input zones of a dialog.
//!
//! The coordinator owns the active zone. Widgets never read it; they are
//! handed an [`ActiveToken`] when, and only when, their zone is active.

use crossterm::event::KeyEvent;
use optin_tui_core::{is_escape, is_tab};
use tracing::trace;

/// An input region of the research dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusZone {
    /// The opt-in yes/no choice.
    #[default]
    OptIn,
    /// The contact details (email and sub-permissions).
    Email,
    /// The persistence scope choice.
    Scope,
}

impl FocusZone {
    /// Get all zones in cycle order.
    pub fn all() -> &'static [FocusZone] {
        &[FocusZone::OptIn, FocusZone::Email, FocusZone::Scope]
    }

    /// The zone after this one in the cycle.
    pub fn next(self) -> Self {
        match self {
            FocusZone::OptIn => FocusZone::Email,
            FocusZone::Email => FocusZone::Scope,
            FocusZone::Scope => FocusZone::OptIn,
        }
    }
}

/// Proof that the holder's zone is the active one.
///
/// Only [`FocusCoordinator::token`] creates these.
#[derive(Debug, PartialEq, Eq)]
pub struct ActiveToken {
    zone: FocusZone,
}

impl ActiveToken {
    /// The zone this token was issued for.
    pub fn zone(&self) -> FocusZone {
        self.zone
    }
}

/// Outcome of routing a key through the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSignal {
    /// Focus moved to this zone; the key is consumed.
    Advanced(FocusZone),
    /// The session should end.
    Exit,
    /// Not a focus key; the active zone should handle it.
    Unhandled,
}

/// Focus state machine over [`FocusZone`].
#[derive(Debug, Clone, Default)]
pub struct FocusCoordinator {
    zone: FocusZone,
}

impl FocusCoordinator {
    /// Create a coordinator starting at [`FocusZone::OptIn`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The active zone.
    pub fn active(&self) -> FocusZone {
        self.zone
    }

    /// Check whether `zone` is the active zone.
    pub fn is_active(&self, zone: FocusZone) -> bool {
        self.zone == zone
    }

    /// Issue a token for `zone` if it is the active zone.
    pub fn token(&self, zone: FocusZone) -> Option<ActiveToken> {
        self.is_active(zone).then_some(ActiveToken { zone })
    }

    /// Route a key event.
    ///
    /// Tab advances the cycle, skipping [`FocusZone::Email`] when the
    /// details are not mounted. Escape ends the session from any zone.
    pub fn route(&mut self, key: &KeyEvent, details_mounted: bool) -> FocusSignal {
        if is_escape(key) {
            return FocusSignal::Exit;
        }
        if is_tab(key) {
            let mut next = self.zone.next();
            if next == FocusZone::Email && !details_mounted {
                next = next.next();
            }
            trace!(from = ?self.zone, to = ?next, "focus advanced");
            self.zone = next;
            return FocusSignal::Advanced(next);
        }
        FocusSignal::Unhandled
    }

    /// Return focus to the first zone.
    pub fn reset(&mut self) {
        self.zone = FocusZone::OptIn;
    }
}
