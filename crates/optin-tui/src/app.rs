//! Main application state and logic.

use chrono::Utc;
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use optin_core::{
    CommandAction, CommandRegistry, DialogKind, History, HistoryItem, HistoryItemKind,
    HistorySink, LoadedSettings,
};
use optin_tui_core::{
    is_backspace, is_enter, is_escape, is_quit, printable_char, Event, EventHandler, Theme,
};
use optin_tui_dialog::ResearchDialogHost;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Write};
use tracing::{debug, error, info};

/// Restore terminal to normal state.
///
/// This should be called on panic or normal exit to ensure the terminal
/// is left in a usable state (not in raw mode, not in alternate screen).
pub fn restore_terminal() {
    // Best effort - ignore errors since we may be in a panic
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        crossterm::cursor::Show
    );
    let _ = io::stdout().flush();
}

/// Install a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Running,
    Quit,
}

/// What the application shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// History panel and prompt.
    #[default]
    Shell,
    /// Only the research dialog; quits when it closes.
    ResearchOnly,
}

/// Main application.
pub struct App {
    theme: Theme,
    settings: LoadedSettings,
    history: History,
    registry: CommandRegistry,
    research: ResearchDialogHost,
    /// Prompt line contents.
    input: String,
    state: AppState,
    mode: AppMode,
    events: EventHandler,
}

impl App {
    /// Create a new application in shell mode.
    pub fn new(settings: LoadedSettings, theme: Theme) -> Self {
        Self {
            theme,
            settings,
            history: History::new(),
            registry: CommandRegistry::builtin(),
            research: ResearchDialogHost::new(),
            input: String::new(),
            state: AppState::Running,
            mode: AppMode::Shell,
            events: EventHandler::new(),
        }
    }

    /// Create an application that only shows the research dialog.
    pub fn research_only(settings: LoadedSettings, theme: Theme) -> Self {
        let mut app = Self::new(settings, theme);
        app.mode = AppMode::ResearchOnly;
        app.open_dialog(DialogKind::Research);
        app
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn settings(&self) -> &LoadedSettings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn research(&self) -> &ResearchDialogHost {
        &self.research
    }

    /// Current prompt contents.
    pub fn input(&self) -> &str {
        &self.input
    }

    fn notify(&mut self, item: HistoryItem) {
        self.history.add_item(item, Utc::now().timestamp_millis());
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => self.handle_paste(&text),
            Event::Resize(_, _) | Event::Tick => {}
        }
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.research.is_open() {
            let result = self
                .research
                .handle_key(&key, &mut self.settings, &mut self.history);
            if let Err(e) = result {
                error!(error = %e, "Failed to save research opt-in settings");
                self.research.set_error(e.to_string());
            }
            self.after_dialog_event();
            return;
        }

        if is_quit(&key) || is_escape(&key) {
            if self.input.is_empty() {
                self.state = AppState::Quit;
            } else {
                self.input.clear();
            }
            return;
        }

        if is_enter(&key) {
            self.submit();
        } else if is_backspace(&key) {
            self.input.pop();
        } else if let Some(c) = printable_char(&key) {
            self.input.push(c);
        }
    }

    /// Handle pasted text.
    pub fn handle_paste(&mut self, text: &str) {
        if self.research.is_open() {
            let result = self
                .research
                .handle_paste(text, &mut self.settings, &mut self.history);
            if let Err(e) = result {
                error!(error = %e, "Failed to save research opt-in settings");
                self.research.set_error(e.to_string());
            }
            self.after_dialog_event();
            return;
        }
        self.input
            .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    fn after_dialog_event(&mut self) {
        if self.mode == AppMode::ResearchOnly && !self.research.is_open() {
            self.state = AppState::Quit;
        }
    }

    /// Submit the prompt line.
    fn submit(&mut self) {
        let input = std::mem::take(&mut self.input);
        let text = input.trim();
        if text.is_empty() {
            return;
        }

        match CommandRegistry::parse(text) {
            Some((name, _args)) => self.run_command(name),
            None => self.notify(HistoryItem::command(text)),
        }
    }

    /// Run a slash command by name or alias.
    pub fn run_command(&mut self, name: &str) {
        let Some(action) = self.registry.get(name).map(|c| c.action) else {
            debug!(name, "Unknown slash command");
            self.notify(HistoryItem::error(format!("Unknown command: /{name}")));
            return;
        };

        info!(name, ?action, "Running slash command");
        match action {
            CommandAction::OpenDialog(kind) => self.open_dialog(kind),
            CommandAction::Help => {
                let lines: Vec<String> = self
                    .registry
                    .commands()
                    .iter()
                    .map(|cmd| {
                        let mut line = format!("/{} - {}", cmd.name, cmd.description);
                        if !cmd.aliases.is_empty() {
                            line.push_str(&format!(" (alias: {})", cmd.aliases.join(", ")));
                        }
                        line
                    })
                    .collect();
                for line in lines {
                    self.notify(HistoryItem::info(line));
                }
            }
            CommandAction::Quit => self.state = AppState::Quit,
        }
    }

    fn open_dialog(&mut self, kind: DialogKind) {
        match kind {
            DialogKind::Research => {
                let seed = self.settings.research_opt_in();
                self.research.open(seed.as_ref());
            }
        }
    }

    /// Run the TUI.
    pub async fn run(&mut self) -> io::Result<()> {
        install_panic_hook();

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let event_loop = self.events.start();
        let mut needs_redraw = true;

        while self.state != AppState::Quit {
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                needs_redraw = false;
            }

            // One event is handled to completion before the next is read
            let Some(event) = self.events.next().await else {
                break;
            };
            // Tick events don't change anything on screen
            needs_redraw = !matches!(event, Event::Tick);
            self.handle_event(event);
        }

        event_loop.abort();
        restore_terminal();

        Ok(())
    }

    /// Draw the UI.
    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();

        if self.mode == AppMode::Shell {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),    // History
                    Constraint::Length(3), // Prompt
                    Constraint::Length(1), // Footer
                ])
                .split(area);

            self.draw_history(frame, chunks[0]);
            self.draw_prompt(frame, chunks[1]);
            self.draw_footer(frame, chunks[2]);
        }

        // Draw active dialog on top
        self.research.render(frame, area, &self.theme);
    }

    fn draw_history(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height as usize;
        let skip = self.history.len().saturating_sub(visible);
        let lines: Vec<Line> = self
            .history
            .items()
            .skip(skip)
            .map(|timed| {
                let item = &timed.item;
                match item.kind {
                    HistoryItemKind::Info => {
                        Line::from(Span::styled(item.text.as_str(), self.theme.info_style()))
                    }
                    HistoryItemKind::Error => {
                        Line::from(Span::styled(item.text.as_str(), self.theme.error_style()))
                    }
                    HistoryItemKind::Command => Line::from(vec![
                        Span::styled("> ", self.theme.dim_style()),
                        Span::styled(item.text.as_str(), self.theme.text_style()),
                    ]),
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.research.is_open() {
                self.theme.border_style()
            } else {
                self.theme.border_active_style()
            });
        let line = Line::from(vec![
            Span::styled("> ", self.theme.primary_style()),
            Span::styled(self.input.as_str(), self.theme.text_style()),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let footer = Line::from(vec![
            Span::styled("/research", self.theme.highlight_style()),
            Span::styled(" opt-in settings  ", self.theme.dim_style()),
            Span::styled("/help", self.theme.highlight_style()),
            Span::styled(" commands  ", self.theme.dim_style()),
            Span::styled("Esc", self.theme.highlight_style()),
            Span::styled(" quit", self.theme.dim_style()),
        ]);
        frame.render_widget(Paragraph::new(footer), area);
    }
}
