//! Research communication opt-in dialog.

mod dialog;
mod form;

pub use dialog::{DetailRow, DialogEvent, ResearchOptInDialog};
pub use form::ResearchForm;
