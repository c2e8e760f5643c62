//! Dialog widgets for modal interfaces.
//!
//! This crate provides the research opt-in dialog and the widgets it is
//! built from:
//! - [`TextInput`] - Single-line text field
//! - [`RadioSelect`] - Single-choice selector
//! - [`FocusCoordinator`] - Focus cycling between dialog zones
//! - [`ResearchForm`] - Draft opt-in state and commit rules
//! - [`ResearchOptInDialog`] - The research communication opt-in dialog
//! - [`ResearchDialogHost`] - Open/close lifecycle and persistence

mod common;
mod focus;
mod host;
mod research;
mod select;
mod text_input;

// Re-export all public types
pub use common::centered_rect;
pub use focus::{ActiveToken, FocusCoordinator, FocusSignal, FocusZone};
pub use host::{ResearchDialogHost, DISABLED_MESSAGE, SAVED_MESSAGE};
pub use research::{DetailRow, DialogEvent, ResearchForm, ResearchOptInDialog};
pub use select::{Orientation, RadioItem, RadioSelect};
pub use text_input::TextInput;
