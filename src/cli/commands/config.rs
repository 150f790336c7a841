//! Configuration command implementation

use crate::cli::commands::{load_global_config, resolve_config};
use crate::cli::GlobalArgs;
use crate::config::{ConfigOverrides, GlobalConfig};
use anyhow::Result;
use colored::Colorize;

/// Execute the config command
pub fn execute(global: &GlobalArgs, show_origin: bool, json: bool) -> Result<()> {
    let config_path = match &global.config {
        Some(path) => path.clone(),
        None => GlobalConfig::get_config_path()?,
    };

    if show_origin {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "config_file": config_path.display().to_string(),
                    "exists": config_path.exists()
                })
            );
        } else {
            println!("{}: {}", "Configuration file".bold(), config_path.display().to_string().cyan());
            if config_path.exists() {
                println!("{}: {}", "Status".bold(), "exists".green());
            } else {
                println!("{}: {}", "Status".bold(), "not created yet".yellow());
            }
        }
        return Ok(());
    }

    let file_values = load_global_config(global)?;
    let effective = resolve_config(global, ConfigOverrides::default())?;

    if json {
        let output = serde_json::json!({
            "config_file": config_path.display().to_string(),
            "file": file_values,
            "effective": effective,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Effective configuration:".bold());
    println!("  root = {}", effective.root.display().to_string().cyan());
    println!("  ignore_file = {}", effective.ignore_file.display().to_string().cyan());
    println!("  builtin_patterns = {}", effective.builtin_patterns.join(", ").cyan());
    println!("  parallel = {}", effective.parallel.to_string().cyan());

    let entries = file_values.list();
    if !entries.is_empty() {
        println!();
        println!("{} ({})", "Set in configuration file:".bold(), config_path.display());
        for (key, value) in entries {
            println!("  {} = {}", key, value);
        }
    }

    Ok(())
}
