//! dropbignore CLI
//!
//! Command-line interface for marking Dropbox folders as ignored.

use anyhow::Result;
use clap::Parser;
use dropbignore::cli::{commands, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the verbosity flags
    let default_level = if cli.global.verbose {
        "debug"
    } else if cli.global.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Execute the command
    match cli.command {
        Commands::Sync {
            parallel,
            max_depth,
            json,
        } => commands::sync::execute(&cli.global, parallel, max_depth, json),
        Commands::Check { max_depth, json } => commands::check::execute(&cli.global, max_depth, json),
        Commands::List { json } => commands::list::execute(&cli.global, json),
        Commands::Config { show_origin, json } => {
            commands::config::execute(&cli.global, show_origin, json)
        },
    }
}
