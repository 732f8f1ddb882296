//! verstamp - write a git-derived version.json

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use verstamp_cli::cmd;
use verstamp_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the defaults.
    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        None | Some(Commands::Generate) => {
            cmd::generate::generate(cli.project_root()?, cli.output_path()?, &cli.resolve)
        }
        Some(Commands::Show) => cmd::show::show(&cli.output_path()?),
    }
}
