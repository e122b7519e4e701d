//! `docker-build make` — Generate the node files of a build.

use anyhow::Context;
use clap::Args;
use dockbuild_common::config::Layout;
use dockbuild_compose::command::ShellRunner;

/// Arguments for the `make` command.
#[derive(Args, Debug)]
pub struct MakeArgs {
    /// Build name; reads `<conf-dir>/<build>.yml`.
    pub build: String,
}

/// Executes the `make` command.
///
/// # Errors
///
/// Returns an error if the build cannot be generated.
pub fn execute(layout: &Layout, args: MakeArgs) -> anyhow::Result<()> {
    let report = dockbuild_compose::workspace::make(layout, &args.build, &ShellRunner::default())
        .with_context(|| format!("unable to make build {}", args.build))?;

    for node_file in &report.node_files {
        tracing::debug!(path = %node_file.display(), "wrote node file");
    }
    println!(
        "Build {} created ({} node{})",
        args.build,
        report.node_files.len(),
        if report.node_files.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
