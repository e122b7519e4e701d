//! `docker-build generate` — Render a single descriptor.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use dockbuild_common::config::Layout;
use dockbuild_common::constants;
use dockbuild_compose::command::ShellRunner;

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Descriptor listing the containers (`bricks`) to render.
    #[arg(short, long, default_value = constants::DEFAULT_DESCRIPTOR_FILE)]
    pub file: PathBuf,
}

/// Executes the `generate` command.
///
/// # Errors
///
/// Returns an error if the compose file cannot be generated or written.
pub fn execute(layout: &Layout, args: GenerateArgs) -> anyhow::Result<()> {
    let written = dockbuild_compose::workspace::generate(layout, &args.file, &ShellRunner::default())
        .with_context(|| format!("unable to generate from {}", args.file.display()))?;
    println!("{} written", written.display());
    Ok(())
}
