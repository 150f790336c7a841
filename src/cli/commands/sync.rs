//! Sync command implementation

use crate::attr::XattrStore;
use crate::cli::commands::{print_report, resolve_config, spinner};
use crate::cli::GlobalArgs;
use crate::config::ConfigOverrides;
use crate::sync::Runner;
use anyhow::Result;
use tracing::warn;

/// Execute the sync command
pub fn execute(global: &GlobalArgs, parallel: bool, max_depth: Option<usize>, json: bool) -> Result<()> {
    let config = resolve_config(
        global,
        ConfigOverrides {
            parallel,
            max_depth,
            ..ConfigOverrides::default()
        },
    )?;

    if !XattrStore::is_supported() {
        warn!("Extended attributes are not supported on this platform; every directory will fail");
    }

    let store = XattrStore::new();
    let progress = spinner(global, json);

    let mut runner = Runner::new(&config, &store);
    if let Some(progress) = progress.clone() {
        runner = runner.with_progress(move |node| {
            progress.inc(1);
            if node.is_matched {
                progress.set_message(node.relative_path.display().to_string());
            }
        });
    }

    let report = runner.run()?;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    print_report(&report, json, global.quiet)
}
