//! `docker-build checkout` — Activate one node of a build.

use anyhow::Context;
use clap::Args;
use dockbuild_common::config::Layout;
use dockbuild_compose::command::ShellRunner;

/// Arguments for the `checkout` command.
#[derive(Args, Debug)]
pub struct CheckoutArgs {
    /// Build name.
    pub build: String,

    /// Node name. Omit to use the build's default node.
    pub node: Option<String>,
}

/// Executes the `checkout` command.
///
/// # Errors
///
/// Returns an error if the compose file cannot be generated or written.
pub fn execute(layout: &Layout, args: CheckoutArgs) -> anyhow::Result<()> {
    let node = args.node.as_deref();
    let written =
        dockbuild_compose::workspace::checkout(layout, &args.build, node, &ShellRunner::default())
            .with_context(|| {
                format!(
                    "unable to build {} for build {} node {}",
                    layout.output_file.display(),
                    args.build,
                    node.unwrap_or("(default)")
                )
            })?;

    println!(
        "Wrote {} for build {} node {}",
        written.display(),
        args.build,
        node.unwrap_or("(default)")
    );
    Ok(())
}
