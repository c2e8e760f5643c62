//! `optin show`: print the effective research opt-in settings.

use anyhow::Result;
use optin_core::{LoadedSettings, RESEARCH_OPT_IN_KEY};
use std::fmt::Write;

/// Render the merged research opt-in value and the files defining it.
pub fn render(settings: &LoadedSettings) -> Result<String> {
    let value = match settings.research_opt_in() {
        Some(research) => serde_json::to_value(research)?,
        None => serde_json::Value::Null,
    };

    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');

    let sources = settings.sources(RESEARCH_OPT_IN_KEY);
    if sources.is_empty() {
        out.push_str("\nSources: none\n");
    } else {
        out.push_str("\nSources:\n");
        for scope in sources {
            writeln!(
                out,
                "  {}: {}",
                scope.name(),
                settings.file(scope).path().display()
            )?;
        }
    }
    Ok(out)
}

/// Print the research opt-in settings.
pub fn run(settings: &LoadedSettings) -> Result<()> {
    print!("{}", render(settings)?);
    Ok(())
}
