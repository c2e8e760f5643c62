//! Draft opt-in state and the rules for when it is committed.

use optin_core::{OptInState, ResearchOptInSettings, ResearchPreferences};

/// Draft research settings edited by the dialog.
///
/// Every method that changes the draft returns the snapshot to persist,
/// or `None` when the change does not produce a commit.
#[derive(Debug, Clone, Default)]
pub struct ResearchForm {
    state: OptInState,
    /// Last snapshot committed, or the seed before the first commit.
    committed: ResearchOptInSettings,
}

impl ResearchForm {
    /// Create a form seeded from previously persisted settings.
    pub fn new(seed: Option<&ResearchOptInSettings>) -> Self {
        let state = seed.map(OptInState::from).unwrap_or_default();
        let committed = state.to_settings();
        Self { state, committed }
    }

    /// Current draft.
    pub fn state(&self) -> &OptInState {
        &self.state
    }

    pub fn is_accepted(&self) -> bool {
        self.state.is_accepted()
    }

    /// The draft flattened into the persisted shape.
    pub fn snapshot(&self) -> ResearchOptInSettings {
        self.state.to_settings()
    }

    /// The last committed snapshot.
    pub fn last_committed(&self) -> &ResearchOptInSettings {
        &self.committed
    }

    /// Apply the opt-in choice. Always commits.
    ///
    /// Accepting keeps existing preferences or starts from empty ones.
    /// Declining drops all preferences.
    pub fn select_opt_in(&mut self, accept: bool) -> ResearchOptInSettings {
        if !accept {
            self.state = OptInState::Declined;
        } else if !self.state.is_accepted() {
            self.state = OptInState::Accepted(ResearchPreferences::default());
        }
        self.commit()
    }

    pub fn set_email(&mut self, email: String) -> Option<ResearchOptInSettings> {
        self.edit(|prefs| prefs.email = email)
    }

    pub fn set_allow_user_research(&mut self, allow: bool) -> Option<ResearchOptInSettings> {
        self.edit(|prefs| prefs.allow_user_research = allow)
    }

    pub fn set_allow_feedback_collection(&mut self, allow: bool) -> Option<ResearchOptInSettings> {
        self.edit(|prefs| prefs.allow_feedback_collection = allow)
    }

    /// Edits only apply while accepted and only commit once an enabled
    /// snapshot has been committed.
    fn edit(&mut self, apply: impl FnOnce(&mut ResearchPreferences)) -> Option<ResearchOptInSettings> {
        let prefs = self.state.preferences_mut()?;
        apply(prefs);
        if self.committed.enabled {
            Some(self.commit())
        } else {
            None
        }
    }

    fn commit(&mut self) -> ResearchOptInSettings {
        let snapshot = self.state.to_settings();
        self.committed = snapshot.clone();
        snapshot
    }
}
