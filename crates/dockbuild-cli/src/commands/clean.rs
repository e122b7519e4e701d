//! `docker-build clean` — Remove the active compose file.

use anyhow::Context;
use clap::Args;
use dockbuild_common::config::Layout;

/// Arguments for the `clean` command.
#[derive(Args, Debug)]
pub struct CleanArgs {}

/// Executes the `clean` command.
///
/// # Errors
///
/// Returns an error if the compose file exists but cannot be removed.
pub fn execute(layout: &Layout, _args: CleanArgs) -> anyhow::Result<()> {
    let removed = dockbuild_compose::workspace::clean(layout)
        .with_context(|| format!("unable to remove {}", layout.output_file.display()))?;
    if removed {
        println!("Removed {}", layout.output_file.display());
    }
    Ok(())
}
