//! CLI command implementations

pub mod check;
pub mod config;
pub mod list;
pub mod sync;

// Common utilities for commands
use crate::cli::GlobalArgs;
use crate::config::{ConfigOverrides, GlobalConfig, SyncConfig};
use crate::core::types::{ChangeKind, SyncReport};
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Load the configuration file named on the command line, or the default one
pub fn load_global_config(global: &GlobalArgs) -> Result<GlobalConfig> {
    let config = match &global.config {
        Some(path) => GlobalConfig::load_from(path)?,
        None => GlobalConfig::load()?,
    };
    Ok(config)
}

/// Resolve run parameters from flags, configuration file and defaults
pub fn resolve_config(global: &GlobalArgs, overrides: ConfigOverrides) -> Result<SyncConfig> {
    let overrides = ConfigOverrides {
        root: global.root.clone(),
        ignore_file: global.ignore_file.clone(),
        ..overrides
    };
    Ok(load_global_config(global)?.resolve(overrides)?)
}

/// Spinner shown while walking, unless output must stay clean
pub fn spinner(global: &GlobalArgs, json: bool) -> Option<ProgressBar> {
    if global.no_progress || global.quiet || json {
        return None;
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {pos} directories scanned {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    Some(progress)
}

/// Print a run report for humans or as JSON
pub fn print_report(report: &SyncReport, json: bool, quiet: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if !quiet {
        for record in &report.records {
            let path = record.relative_path.display();
            match &record.kind {
                ChangeKind::Set => println!("  {} {}", "+".green(), path),
                ChangeKind::Clear => println!("  {} {}", "-".yellow(), path),
                ChangeKind::Failed { .. } => {},
            }
        }
    }

    // Failures are listed even in quiet mode
    for (path, reason) in report.failures() {
        eprintln!("  {} {}: {}", "✗".red(), path.display(), reason);
    }

    if quiet {
        return Ok(());
    }

    println!();
    let verb = if report.dry_run { "Would change:" } else { "Changed:" };
    println!(
        "{} {} set, {} cleared ({} directories scanned in {})",
        verb.bright_green().bold(),
        report.set,
        report.cleared,
        report.scanned,
        report.root.display()
    );
    println!("  • Already ignored: {}", report.already_ignored);
    if report.has_failures() {
        println!(
            "  • {} {} attribute failures, {} unreadable directories",
            "!".yellow(),
            report.failed,
            report.traversal_errors.len()
        );
    }
    if report.interrupted {
        println!("  • {} run interrupted before completion", "!".yellow());
    }

    Ok(())
}
