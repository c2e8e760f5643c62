//! Color themes for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name.
    pub name: String,

    // Background hierarchy
    /// Base background - darkest.
    pub background: Color,
    /// Panel background (dialogs).
    pub background_panel: Color,
    /// Element background (inputs).
    pub background_element: Color,

    // Text colors
    /// Primary text color.
    pub text: Color,
    /// Muted/secondary text.
    pub text_muted: Color,

    // Accent colors
    /// Primary accent.
    pub primary: Color,
    /// Secondary accent.
    pub secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Border colors
    /// Default border.
    pub border: Color,
    /// Active/focused border.
    pub border_active: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::optin()
    }
}

impl Theme {
    /// Get a theme by name. Unknown names fall back to the default theme.
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::optin(),
        }
    }

    /// List available theme names.
    pub fn available() -> Vec<&'static str> {
        vec!["optin", "light"]
    }

    /// Default dark theme.
    pub fn optin() -> Self {
        Self {
            name: "optin".to_string(),

            background: Color::Rgb(10, 10, 10),         // #0a0a0a
            background_panel: Color::Rgb(20, 20, 20),   // #141414
            background_element: Color::Rgb(24, 24, 27), // #18181b

            text: Color::Rgb(250, 250, 250),       // #fafafa
            text_muted: Color::Rgb(128, 128, 128), // #808080

            primary: Color::Rgb(92, 156, 245),   // #5c9cf5 (blue)
            secondary: Color::Rgb(157, 124, 216), // #9d7cd8 (purple)

            success: Color::Rgb(127, 216, 143), // #7fd88f
            warning: Color::Rgb(245, 167, 66),  // #f5a742
            error: Color::Rgb(224, 108, 117),   // #e06c75
            info: Color::Rgb(92, 156, 245),     // #5c9cf5

            border: Color::Rgb(60, 60, 60),          // #3c3c3c
            border_active: Color::Rgb(92, 156, 245), // primary
        }
    }

    /// Light theme.
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),

            background: Color::Rgb(255, 255, 255),
            background_panel: Color::Rgb(245, 245, 245),
            background_element: Color::Rgb(235, 235, 235),

            text: Color::Rgb(26, 26, 26),
            text_muted: Color::Rgb(110, 110, 110),

            primary: Color::Rgb(0, 92, 197),
            secondary: Color::Rgb(111, 66, 193),

            success: Color::Rgb(34, 134, 58),
            warning: Color::Rgb(176, 136, 0),
            error: Color::Rgb(203, 36, 49),
            info: Color::Rgb(0, 92, 197),

            border: Color::Rgb(200, 200, 200),
            border_active: Color::Rgb(0, 92, 197),
        }
    }

    // Style helper methods

    /// Base text style.
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Muted text style.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Primary accent style.
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info)
    }

    /// Border style (not focused).
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Active border style.
    pub fn border_active_style(&self) -> Style {
        Style::default().fg(self.border_active)
    }

    /// Bold text style.
    pub fn bold(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn dim_style(&self) -> Style {
        self.muted_style()
    }

    pub fn highlight_style(&self) -> Style {
        self.primary_style()
    }

    /// Style for the highlighted row of a focused list.
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }
}
