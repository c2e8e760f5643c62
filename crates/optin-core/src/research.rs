//! Research communication opt-in data model.
//!
//! [`ResearchOptInSettings`] is the flat shape written to the settings
//! files. [`OptInState`] is the shape the form edits: the contact fields
//! only exist once the user has accepted, so a declined value can never
//! carry stale contact data.

use serde::{Deserialize, Serialize};

/// Settings key the opt-in value is stored under.
pub const RESEARCH_OPT_IN_KEY: &str = "researchOptIn";

/// Persisted research opt-in settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResearchOptInSettings {
    /// Master opt-in flag.
    pub enabled: bool,
    /// Contact address for research follow-ups.
    pub email: String,
    /// Whether the user may be contacted for user research.
    pub allow_user_research: bool,
    /// Whether feedback may be collected.
    pub allow_feedback_collection: bool,
}

impl ResearchOptInSettings {
    /// The snapshot committed when the user declines.
    pub fn declined() -> Self {
        Self::default()
    }
}

/// Contact preferences that only exist while opted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResearchPreferences {
    pub email: String,
    pub allow_user_research: bool,
    pub allow_feedback_collection: bool,
}

/// Draft opt-in state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OptInState {
    /// The user has not opted in.
    #[default]
    Declined,
    /// The user opted in with these preferences.
    Accepted(ResearchPreferences),
}

impl OptInState {
    /// Whether the user has opted in.
    pub fn is_accepted(&self) -> bool {
        matches!(self, OptInState::Accepted(_))
    }

    /// Contact preferences, if opted in.
    pub fn preferences(&self) -> Option<&ResearchPreferences> {
        match self {
            OptInState::Accepted(prefs) => Some(prefs),
            OptInState::Declined => None,
        }
    }

    /// Mutable contact preferences, if opted in.
    pub fn preferences_mut(&mut self) -> Option<&mut ResearchPreferences> {
        match self {
            OptInState::Accepted(prefs) => Some(prefs),
            OptInState::Declined => None,
        }
    }

    /// Flatten into the persisted shape.
    pub fn to_settings(&self) -> ResearchOptInSettings {
        match self {
            OptInState::Declined => ResearchOptInSettings::declined(),
            OptInState::Accepted(prefs) => ResearchOptInSettings {
                enabled: true,
                email: prefs.email.clone(),
                allow_user_research: prefs.allow_user_research,
                allow_feedback_collection: prefs.allow_feedback_collection,
            },
        }
    }
}

impl From<&ResearchOptInSettings> for OptInState {
    fn from(settings: &ResearchOptInSettings) -> Self {
        if settings.enabled {
            OptInState::Accepted(ResearchPreferences {
                email: settings.email.clone(),
                allow_user_research: settings.allow_user_research,
                allow_feedback_collection: settings.allow_feedback_collection,
            })
        } else {
            // Contact fields stored next to a disabled flag are discarded.
            OptInState::Declined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_camel_case() {
        let settings = ResearchOptInSettings {
            enabled: true,
            email: "a@b.com".to_string(),
            allow_user_research: true,
            allow_feedback_collection: false,
        };
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "enabled": true,
                "email": "a@b.com",
                "allowUserResearch": true,
                "allowFeedbackCollection": false
            })
        );
    }

    #[test]
    fn test_deserialize_missing_fields_default() {
        let settings: ResearchOptInSettings =
            serde_json::from_str(r#"{"enabled": true}"#).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.email, "");
        assert!(!settings.allow_user_research);
        assert!(!settings.allow_feedback_collection);
    }

    #[test]
    fn test_disabled_settings_drop_stale_fields() {
        let stale = ResearchOptInSettings {
            enabled: false,
            email: "old@example.com".to_string(),
            allow_user_research: true,
            allow_feedback_collection: true,
        };
        let state = OptInState::from(&stale);
        assert_eq!(state, OptInState::Declined);
        assert_eq!(state.to_settings(), ResearchOptInSettings::declined());
    }

    #[test]
    fn test_accepted_state_round_trips_preferences() {
        let settings = ResearchOptInSettings {
            enabled: true,
            email: "a@b.com".to_string(),
            allow_user_research: false,
            allow_feedback_collection: true,
        };
        let state = OptInState::from(&settings);
        assert!(state.is_accepted());
        assert_eq!(state.preferences().map(|p| p.email.as_str()), Some("a@b.com"));
        assert_eq!(state.to_settings(), settings);
    }
}
