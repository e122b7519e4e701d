//! CLI command definitions and dispatch.

pub mod checkout;
pub mod clean;
pub mod generate;
pub mod make;
pub mod remove;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dockbuild_common::config::Layout;
use dockbuild_common::constants;

/// docker-build — Generate docker-compose files from container templates.
#[derive(Parser, Debug)]
#[command(name = "docker-build", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding build descriptors.
    #[arg(long, global = true, env = constants::CONF_DIR_ENV, default_value = constants::DEFAULT_CONF_DIR)]
    pub conf_dir: PathBuf,

    /// Directory holding generated builds.
    #[arg(long, global = true, env = constants::BUILDS_DIR_ENV, default_value = constants::DEFAULT_BUILDS_DIR)]
    pub builds_dir: PathBuf,

    /// Compose file written by `checkout` and `generate`.
    #[arg(long, global = true, env = constants::OUTPUT_FILE_ENV, default_value = constants::DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Log pipeline steps (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// The filesystem layout selected by the global flags.
    fn layout(&self) -> Layout {
        Layout {
            conf_dir: self.conf_dir.clone(),
            builds_dir: self.builds_dir.clone(),
            output_file: self.output.clone(),
        }
    }
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the node files of a build from its descriptor.
    Make(make::MakeArgs),
    /// Delete a generated build.
    #[command(alias = "remove")]
    Rm(remove::RemoveArgs),
    /// Write the compose file for one node of a build.
    Checkout(checkout::CheckoutArgs),
    /// Remove the active compose file.
    Clean(clean::CleanArgs),
    /// Write the compose file for a single descriptor.
    Generate(generate::GenerateArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let layout = cli.layout();
    match cli.command {
        Command::Make(args) => make::execute(&layout, args),
        Command::Rm(args) => remove::execute(&layout, args),
        Command::Checkout(args) => checkout::execute(&layout, args),
        Command::Clean(args) => clean::execute(&layout, args),
        Command::Generate(args) => generate::execute(&layout, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_node_is_optional() {
        let cli = Cli::try_parse_from(["docker-build", "checkout", "prod"]).expect("parse");
        match cli.command {
            Command::Checkout(args) => {
                assert_eq!(args.build, "prod");
                assert!(args.node.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_override_layout() {
        let cli = Cli::try_parse_from([
            "docker-build",
            "make",
            "prod",
            "--conf-dir",
            "descriptors",
            "--output",
            "compose.yml",
        ])
        .expect("parse");
        let layout = cli.layout();
        assert_eq!(layout.conf_dir, PathBuf::from("descriptors"));
        assert_eq!(layout.output_file, PathBuf::from("compose.yml"));
    }

    #[test]
    fn remove_alias_maps_to_rm() {
        let cli = Cli::try_parse_from(["docker-build", "remove", "prod"]).expect("parse");
        assert!(matches!(cli.command, Command::Rm(ref args) if args.build == "prod"));
    }

    #[test]
    fn generate_defaults_to_docker_build_yml() {
        let cli = Cli::try_parse_from(["docker-build", "generate"]).expect("parse");
        match cli.command {
            Command::Generate(args) => assert_eq!(args.file, PathBuf::from("docker-build.yml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
