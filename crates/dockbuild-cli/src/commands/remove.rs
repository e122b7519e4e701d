//! `docker-build rm` — Delete a generated build.

use anyhow::Context;
use clap::Args;
use dockbuild_common::config::Layout;

/// Arguments for the `rm` command.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Build name.
    pub build: String,
}

/// Executes the `rm` command.
///
/// # Errors
///
/// Returns an error if the build does not exist or cannot be removed.
pub fn execute(layout: &Layout, args: RemoveArgs) -> anyhow::Result<()> {
    let _ = dockbuild_compose::workspace::remove(layout, &args.build)
        .with_context(|| format!("unable to remove build {}", args.build))?;
    println!("Build {} removed", args.build);
    Ok(())
}
