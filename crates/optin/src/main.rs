//! optin - research communication opt-in settings.
//!
//! This is the main entry point for the optin CLI.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use optin_core::LoadedSettings;
use optin_tui::App;
use optin_tui_core::Theme;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "optin")]
#[command(author, version, about = "Research communication opt-in settings", long_about = None)]
struct Cli {
    /// Project directory whose workspace settings are used (default: current directory)
    #[arg(long, global = true, env = "OPTIN_PROJECT_DIR")]
    project: Option<PathBuf>,

    /// User settings file to use instead of the default location
    #[arg(long, global = true, env = "OPTIN_USER_SETTINGS")]
    user_settings: Option<PathBuf>,

    /// Color theme (optin, light)
    #[arg(long, global = true, env = "OPTIN_THEME", default_value = "optin")]
    theme: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Open the research opt-in dialog and exit when it closes
    Research,
    /// Print the effective research opt-in settings
    Show,
}

fn load_settings(project_dir: &Path, user_settings: Option<&Path>) -> Result<LoadedSettings> {
    LoadedSettings::load(project_dir, user_settings).with_context(|| {
        format!(
            "Failed to load settings for project {}",
            project_dir.display()
        )
    })
}

fn resolve_theme(name: &str) -> Theme {
    if !Theme::available().contains(&name.to_lowercase().as_str()) {
        warn!(theme = name, "Unknown theme, using default");
    }
    Theme::by_name(name)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let project_dir = match cli.project {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Some(Commands::Show) => {
            commands::logging::init_logging(cli.verbose, false);
            let settings = load_settings(&project_dir, cli.user_settings.as_deref())?;
            commands::show::run(&settings)?;
        }
        command @ (Some(Commands::Research) | None) => {
            let log_file = commands::logging::init_logging(cli.verbose, true);
            info!(
                project = %project_dir.display(),
                log_file = ?log_file,
                "Starting optin"
            );

            let settings = load_settings(&project_dir, cli.user_settings.as_deref())?;
            let theme = resolve_theme(&cli.theme);
            let mut app = if command == Some(Commands::Research) {
                App::research_only(settings, theme)
            } else {
                App::new(settings, theme)
            };
            app.run().await.context("Terminal UI failed")?;
            info!("optin exited");
        }
    }

    Ok(())
}
