//! Command-line interface for dropbignore

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// dropbignore - mark Dropbox folders as ignored
#[derive(Parser)]
#[command(
    name = "dropbignore",
    version,
    about = "Mark Dropbox folders as ignored using a .gitignore-style pattern file",
    long_about = "dropbignore reads patterns from a .dropbignore file, walks the synchronized folder and \
                  sets or clears the com.dropbox.ignored extended attribute so that exactly the matching \
                  directories are excluded from synchronization."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable progress spinner
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Synchronized folder (default: ~/Dropbox)
    #[arg(long, global = true, env = "DROPBIGNORE_ROOT")]
    pub root: Option<PathBuf>,

    /// Ignore file (default: <root>/.dropbignore)
    #[arg(long, global = true, env = "DROPBIGNORE_FILE")]
    pub ignore_file: Option<PathBuf>,

    /// Configuration file (default: ~/.config/dropbignore/config.toml)
    #[arg(long, global = true, env = "DROPBIGNORE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set and clear ignore attributes to match the pattern file
    Sync {
        /// Synchronize attributes on all cores after walking
        #[arg(long)]
        parallel: bool,

        /// Limit how deep below the root directories are considered
        #[arg(long)]
        max_depth: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what sync would change without writing anything
    Check {
        /// Limit how deep below the root directories are considered
        #[arg(long)]
        max_depth: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List directories currently marked as ignored
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config {
        /// Show configuration file location
        #[arg(long)]
        show_origin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
