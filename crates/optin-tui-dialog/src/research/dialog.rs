//! Research opt-in dialog widget.

use crossterm::event::{KeyCode, KeyEvent};
use optin_core::{ResearchOptInSettings, ResearchPreferences, SettingScope};
use optin_tui_core::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use super::form::ResearchForm;
use crate::common::centered_rect;
use crate::focus::{FocusCoordinator, FocusSignal, FocusZone};
use crate::select::{Orientation, RadioItem, RadioSelect};
use crate::text_input::TextInput;

const TITLE: &str = "Research Communication Opt-In";
const INTRO: &str = "Help us improve Gemini CLI by participating in user research and providing \
                     feedback. Your participation is completely voluntary and you can change \
                     these settings at any time.";
const PRIVACY_NOTICE: &str =
    "Privacy Notice: https://github.com/google-gemini/gemini-cli/blob/main/docs/tos-privacy.md";
const EMAIL_PLACEHOLDER: &str = "your.email@example.com";

/// Outcome of a key event in the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// Nothing to do.
    None,
    /// Persist these settings in this scope.
    Commit {
        settings: ResearchOptInSettings,
        scope: SettingScope,
    },
    /// Close the dialog.
    Exit,
}

/// A row of the contact details zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailRow {
    /// Email text field.
    #[default]
    Email,
    /// User research contact choice.
    UserResearch,
    /// Feedback collection choice.
    Feedback,
}

impl DetailRow {
    fn next(self) -> Self {
        match self {
            DetailRow::Email => DetailRow::UserResearch,
            DetailRow::UserResearch | DetailRow::Feedback => DetailRow::Feedback,
        }
    }

    fn prev(self) -> Self {
        match self {
            DetailRow::Email | DetailRow::UserResearch => DetailRow::Email,
            DetailRow::Feedback => DetailRow::UserResearch,
        }
    }
}

/// Widgets of the contact details zone. Only exists while opted in.
#[derive(Debug, Clone)]
struct DetailFields {
    email: TextInput,
    user_research: RadioSelect<bool>,
    feedback: RadioSelect<bool>,
    row: DetailRow,
}

impl DetailFields {
    fn mount(prefs: &ResearchPreferences) -> Self {
        Self {
            email: TextInput::new(prefs.email.as_str()).with_placeholder(EMAIL_PLACEHOLDER),
            user_research: RadioSelect::new(
                vec![
                    RadioItem::new("Yes, allow user research contact", true),
                    RadioItem::new("No, do not contact me for research", false),
                ],
                Orientation::Horizontal,
            )
            .with_value(prefs.allow_user_research),
            feedback: RadioSelect::new(
                vec![
                    RadioItem::new("Yes, allow feedback collection", true),
                    RadioItem::new("No, do not collect feedback", false),
                ],
                Orientation::Horizontal,
            )
            .with_value(prefs.allow_feedback_collection),
            row: DetailRow::Email,
        }
    }
}

/// Multi-section dialog collecting research opt-in settings.
#[derive(Debug, Clone)]
pub struct ResearchOptInDialog {
    focus: FocusCoordinator,
    form: ResearchForm,
    scope: SettingScope,
    opt_in: RadioSelect<bool>,
    scope_select: RadioSelect<SettingScope>,
    details: Option<DetailFields>,
}

impl Default for ResearchOptInDialog {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ResearchOptInDialog {
    /// Create a dialog seeded from previously persisted settings.
    pub fn new(seed: Option<&ResearchOptInSettings>) -> Self {
        let form = ResearchForm::new(seed);
        let scope = SettingScope::default();
        let opt_in = RadioSelect::new(
            vec![
                RadioItem::new("Yes, I want to participate in research", true),
                RadioItem::new("No, I do not want to participate", false),
            ],
            Orientation::Vertical,
        )
        .with_value(form.is_accepted());
        let scope_select = RadioSelect::new(
            SettingScope::all()
                .iter()
                .map(|scope| RadioItem::new(scope.name(), *scope))
                .collect(),
            Orientation::Vertical,
        )
        .with_value(scope);
        let details = form.state().preferences().map(DetailFields::mount);

        Self {
            focus: FocusCoordinator::new(),
            form,
            scope,
            opt_in,
            scope_select,
            details,
        }
    }

    /// The active focus zone.
    pub fn focus(&self) -> FocusZone {
        self.focus.active()
    }

    pub fn form(&self) -> &ResearchForm {
        &self.form
    }

    /// Scope later commits are written to.
    pub fn scope(&self) -> SettingScope {
        self.scope
    }

    /// Whether the contact details are shown.
    pub fn details_mounted(&self) -> bool {
        self.details.is_some()
    }

    /// Active row of the details zone, if mounted.
    pub fn detail_row(&self) -> Option<DetailRow> {
        self.details.as_ref().map(|d| d.row)
    }

    /// Email field contents, if mounted.
    pub fn email(&self) -> Option<&str> {
        self.details.as_ref().map(|d| d.email.value())
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: &KeyEvent) -> DialogEvent {
        match self.focus.route(key, self.details.is_some()) {
            FocusSignal::Exit => return DialogEvent::Exit,
            FocusSignal::Advanced(_) => return DialogEvent::None,
            FocusSignal::Unhandled => {}
        }

        match self.focus.active() {
            FocusZone::OptIn => {
                let token = self.focus.token(FocusZone::OptIn);
                match self.opt_in.handle_key(key, token.as_ref()) {
                    Some(accept) => {
                        let settings = self.form.select_opt_in(accept);
                        self.sync_details();
                        self.commit(settings)
                    }
                    None => DialogEvent::None,
                }
            }
            FocusZone::Email => self.handle_details_key(key),
            FocusZone::Scope => {
                let token = self.focus.token(FocusZone::Scope);
                if let Some(scope) = self.scope_select.handle_key(key, token.as_ref()) {
                    debug!(?scope, "research scope selected");
                    self.scope = scope;
                }
                DialogEvent::None
            }
        }
    }

    /// Handle pasted text. Only the email field accepts it.
    pub fn handle_paste(&mut self, text: &str) -> DialogEvent {
        let Some(details) = self.details.as_mut() else {
            return DialogEvent::None;
        };
        if details.row != DetailRow::Email {
            return DialogEvent::None;
        }
        let token = self.focus.token(FocusZone::Email);
        let settings = details
            .email
            .handle_paste(text, token.as_ref())
            .and_then(|email| self.form.set_email(email));
        match settings {
            Some(settings) => self.commit(settings),
            None => DialogEvent::None,
        }
    }

    fn handle_details_key(&mut self, key: &KeyEvent) -> DialogEvent {
        let Some(details) = self.details.as_mut() else {
            return DialogEvent::None;
        };
        match key.code {
            KeyCode::Up => {
                details.row = details.row.prev();
                return DialogEvent::None;
            }
            KeyCode::Down => {
                details.row = details.row.next();
                return DialogEvent::None;
            }
            _ => {}
        }

        let token = self.focus.token(FocusZone::Email);
        let token = token.as_ref();
        let settings = match details.row {
            DetailRow::Email => details
                .email
                .handle_key(key, token)
                .and_then(|email| self.form.set_email(email)),
            DetailRow::UserResearch => details
                .user_research
                .handle_key(key, token)
                .and_then(|allow| self.form.set_allow_user_research(allow)),
            DetailRow::Feedback => details
                .feedback
                .handle_key(key, token)
                .and_then(|allow| self.form.set_allow_feedback_collection(allow)),
        };
        match settings {
            Some(settings) => self.commit(settings),
            None => DialogEvent::None,
        }
    }

    /// Mount or unmount the details to match the draft.
    fn sync_details(&mut self) {
        match self.form.state().preferences() {
            Some(prefs) if self.details.is_none() => {
                self.details = Some(DetailFields::mount(prefs));
            }
            Some(_) => {}
            None => self.details = None,
        }
    }

    fn commit(&self, settings: ResearchOptInSettings) -> DialogEvent {
        DialogEvent::Commit {
            settings,
            scope: self.scope,
        }
    }

    /// Render the dialog, with an optional error line.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, error: Option<&str>) {
        let mut rows: Vec<(u16, Section)> = vec![
            (1, Section::Title),
            (1, Section::Gap),
            (3, Section::Intro),
            (1, Section::Gap),
            (1, Section::Heading("Scope:")),
            (self.scope_select.height(), Section::Scope),
            (1, Section::Gap),
            (1, Section::Heading("Would you like to participate in Gemini CLI research?")),
            (self.opt_in.height(), Section::OptIn),
        ];
        if let Some(details) = &self.details {
            rows.extend([
                (1, Section::Gap),
                (1, Section::Heading("Email address (for research contact):")),
                (1, Section::Email),
                (1, Section::Gap),
                (1, Section::Heading("User Research Contact:")),
                (details.user_research.height(), Section::UserResearch),
                (1, Section::Gap),
                (1, Section::Heading("Feedback Collection:")),
                (details.feedback.height(), Section::Feedback),
            ]);
        }
        rows.extend([
            (1, Section::Gap),
            (1, Section::Help),
            (1, Section::Gap),
            (2, Section::Privacy),
        ]);
        if error.is_some() {
            rows.push((1, Section::Error));
        }

        let content_height: u16 = rows.iter().map(|(h, _)| *h).sum();
        let dialog_width = 84.min(area.width.saturating_sub(4));
        let dialog_height = (content_height + 4).min(area.height);
        let dialog_area = centered_rect(dialog_width, dialog_height, area);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .padding(Padding::uniform(1));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(rows.iter().map(|(h, _)| Constraint::Length(*h)))
            .split(inner);

        for ((_, section), chunk) in rows.iter().zip(chunks.iter()) {
            self.render_section(frame, *chunk, theme, *section, error);
        }
    }

    fn render_section(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        section: Section,
        error: Option<&str>,
    ) {
        let details_row = |row: DetailRow| {
            self.focus.is_active(FocusZone::Email) && self.detail_row() == Some(row)
        };
        match section {
            Section::Gap => {}
            Section::Title => {
                frame.render_widget(Paragraph::new(Span::styled(TITLE, theme.bold())), area);
            }
            Section::Intro => {
                let intro = Paragraph::new(Span::styled(INTRO, theme.text_style()))
                    .wrap(Wrap { trim: true });
                frame.render_widget(intro, area);
            }
            Section::Heading(text) => {
                frame.render_widget(Paragraph::new(Span::styled(text, theme.bold())), area);
            }
            Section::Scope => {
                self.scope_select
                    .render(frame, area, theme, self.focus.is_active(FocusZone::Scope));
            }
            Section::OptIn => {
                self.opt_in
                    .render(frame, area, theme, self.focus.is_active(FocusZone::OptIn));
            }
            Section::Email => {
                if let Some(details) = &self.details {
                    details
                        .email
                        .render(frame, area, theme, details_row(DetailRow::Email));
                }
            }
            Section::UserResearch => {
                if let Some(details) = &self.details {
                    details.user_research.render(
                        frame,
                        area,
                        theme,
                        details_row(DetailRow::UserResearch),
                    );
                }
            }
            Section::Feedback => {
                if let Some(details) = &self.details {
                    details
                        .feedback
                        .render(frame, area, theme, details_row(DetailRow::Feedback));
                }
            }
            Section::Help => {
                let help = Line::from(vec![Span::styled(
                    "(Use Tab to navigate, Enter to select, Esc to exit)",
                    theme.dim_style(),
                )]);
                frame.render_widget(Paragraph::new(help), area);
            }
            Section::Privacy => {
                let notice = Paragraph::new(Span::styled(PRIVACY_NOTICE, theme.info_style()))
                    .wrap(Wrap { trim: true });
                frame.render_widget(notice, area);
            }
            Section::Error => {
                if let Some(error) = error {
                    let line = Span::styled(format!("Error: {error}"), theme.error_style());
                    frame.render_widget(Paragraph::new(line), area);
                }
            }
        }
    }
}

/// A vertical slice of the dialog.
#[derive(Debug, Clone, Copy)]
enum Section {
    Gap,
    Title,
    Intro,
    Heading(&'static str),
    Scope,
    OptIn,
    Email,
    UserResearch,
    Feedback,
    Help,
    Privacy,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn committed(event: DialogEvent) -> ResearchOptInSettings {
        match event {
            DialogEvent::Commit { settings, .. } => settings,
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_state() {
        let dialog = ResearchOptInDialog::new(None);
        assert_eq!(dialog.focus(), FocusZone::OptIn);
        assert_eq!(dialog.scope(), SettingScope::User);
        assert!(!dialog.details_mounted());
        assert_eq!(dialog.opt_in.highlighted_value(), Some(false));
    }

    #[test]
    fn test_accept_mounts_details() {
        let mut dialog = ResearchOptInDialog::new(None);
        dialog.handle_key(&key(KeyCode::Up));
        let settings = committed(dialog.handle_key(&key(KeyCode::Enter)));
        assert!(settings.enabled);
        assert!(dialog.details_mounted());
        assert_eq!(dialog.detail_row(), Some(DetailRow::Email));
        assert_eq!(dialog.email(), Some(""));
    }

    #[test]
    fn test_detail_rows_clamp() {
        let seed = ResearchOptInSettings {
            enabled: true,
            ..Default::default()
        };
        let mut dialog = ResearchOptInDialog::new(Some(&seed));
        dialog.handle_key(&key(KeyCode::Tab));
        dialog.handle_key(&key(KeyCode::Up));
        assert_eq!(dialog.detail_row(), Some(DetailRow::Email));
        for _ in 0..3 {
            dialog.handle_key(&key(KeyCode::Down));
        }
        assert_eq!(dialog.detail_row(), Some(DetailRow::Feedback));
    }

    #[test]
    fn test_scope_selection_does_not_commit() {
        let mut dialog = ResearchOptInDialog::new(None);
        dialog.handle_key(&key(KeyCode::Tab));
        assert_eq!(dialog.focus(), FocusZone::Scope);
        dialog.handle_key(&key(KeyCode::Down));
        assert_eq!(dialog.handle_key(&key(KeyCode::Enter)), DialogEvent::None);
        assert_eq!(dialog.scope(), SettingScope::Workspace);
        assert_eq!(dialog.focus(), FocusZone::Scope);
    }

    #[test]
    fn test_paste_outside_email_is_ignored() {
        let mut dialog = ResearchOptInDialog::new(None);
        assert_eq!(dialog.handle_paste("a@b.com"), DialogEvent::None);
    }
}
