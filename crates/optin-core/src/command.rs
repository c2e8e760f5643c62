//! Built-in slash commands.
//!
//! Commands are typed at the prompt as `/name [args]`. Each command maps to
//! an action the shell performs; nothing here touches the terminal.

/// Where a command comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Shipped with optin.
    BuiltIn,
}

/// Dialogs a command can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Research communication opt-in.
    Research,
}

/// What running a command asks the shell to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// Open a dialog.
    OpenDialog(DialogKind),
    /// List available commands.
    Help,
    /// Exit the application.
    Quit,
}

/// A slash command definition.
#[derive(Debug, Clone)]
pub struct SlashCommand {
    /// Command name (without the leading /).
    pub name: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Alternative names.
    pub aliases: &'static [&'static str],
    pub kind: CommandKind,
    pub action: CommandAction,
}

impl SlashCommand {
    fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

/// Lookup table for slash commands.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: Vec<SlashCommand>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandRegistry {
    /// Registry with the built-in commands.
    pub fn builtin() -> Self {
        Self {
            commands: vec![
                SlashCommand {
                    name: "research",
                    description: "configure research communication opt-in settings",
                    aliases: &[],
                    kind: CommandKind::BuiltIn,
                    action: CommandAction::OpenDialog(DialogKind::Research),
                },
                SlashCommand {
                    name: "help",
                    description: "list available commands",
                    aliases: &["?"],
                    kind: CommandKind::BuiltIn,
                    action: CommandAction::Help,
                },
                SlashCommand {
                    name: "quit",
                    description: "exit optin",
                    aliases: &["exit"],
                    kind: CommandKind::BuiltIn,
                    action: CommandAction::Quit,
                },
            ],
        }
    }

    /// All registered commands.
    pub fn commands(&self) -> &[SlashCommand] {
        &self.commands
    }

    /// Find a command by name or alias.
    pub fn get(&self, name: &str) -> Option<&SlashCommand> {
        self.commands.iter().find(|c| c.matches(name))
    }

    /// Split prompt input into a command name and its arguments.
    ///
    /// Returns `None` when the input is not a slash command.
    pub fn parse(input: &str) -> Option<(&str, &str)> {
        let rest = input.trim().strip_prefix('/')?;
        if rest.is_empty() {
            return None;
        }
        match rest.split_once(char::is_whitespace) {
            Some((name, args)) => Some((name, args.trim())),
            None => Some((rest, "")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_opens_dialog() {
        let registry = CommandRegistry::builtin();
        let cmd = registry.get("research").unwrap();
        assert_eq!(cmd.kind, CommandKind::BuiltIn);
        assert_eq!(cmd.action, CommandAction::OpenDialog(DialogKind::Research));
        assert_eq!(
            cmd.description,
            "configure research communication opt-in settings"
        );
    }

    #[test]
    fn test_alias_lookup() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.get("exit").map(|c| c.action), Some(CommandAction::Quit));
        assert!(registry.get("init").is_none());
    }

    #[test]
    fn test_parse() {
        assert_eq!(CommandRegistry::parse("/research"), Some(("research", "")));
        assert_eq!(CommandRegistry::parse("  /help  me "), Some(("help", "me")));
        assert_eq!(CommandRegistry::parse("hello"), None);
        assert_eq!(CommandRegistry::parse("/"), None);
    }
}
