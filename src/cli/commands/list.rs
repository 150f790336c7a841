//! List command implementation

use crate::attr::XattrStore;
use crate::cli::commands::resolve_config;
use crate::cli::GlobalArgs;
use crate::config::ConfigOverrides;
use crate::sync::find_ignored;
use anyhow::Result;
use colored::Colorize;

/// Execute the list command
pub fn execute(global: &GlobalArgs, json: bool) -> Result<()> {
    let config = resolve_config(global, ConfigOverrides::default())?;
    let listing = find_ignored(config.root(), &XattrStore::new())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for path in &listing.ignored {
        let shown = path.strip_prefix(&listing.root).unwrap_or(path);
        println!("{}", shown.display());
    }
    for error in &listing.errors {
        eprintln!("  {} {}", "✗".red(), error);
    }

    if !global.quiet {
        println!();
        println!(
            "{} {} ignored directories in {}",
            "✓".green().bold(),
            listing.ignored.len(),
            listing.root.display()
        );
    }

    Ok(())
}
