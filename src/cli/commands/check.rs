//! Check command implementation (dry-run sync)

use crate::attr::XattrStore;
use crate::cli::commands::{print_report, resolve_config, spinner};
use crate::cli::GlobalArgs;
use crate::config::ConfigOverrides;
use crate::sync::Runner;
use anyhow::Result;

/// Execute the check command
pub fn execute(global: &GlobalArgs, max_depth: Option<usize>, json: bool) -> Result<()> {
    let config = resolve_config(
        global,
        ConfigOverrides {
            dry_run: true,
            max_depth,
            ..ConfigOverrides::default()
        },
    )?;

    let store = XattrStore::new();
    let progress = spinner(global, json);

    let mut runner = Runner::new(&config, &store);
    if let Some(progress) = progress.clone() {
        runner = runner.with_progress(move |_| progress.inc(1));
    }

    let report = runner.run()?;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    print_report(&report, json, global.quiet)
}
