//! verstamp - stamp a build with a git-derived `version.json`
//!
//! Run with no arguments from the project root to write `./version.json`:
//!
//! ```text
//! {
//!   "version": "1.4.2.0123abcd",
//!   "build_date": "2026-10-19 08:30:05",
//!   "git_commit": "0123abcd..."
//! }
//! ```
//!
//! Every flag can also be given through its `VERSTAMP_*` environment variable.

pub mod cmd;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "verstamp")]
#[command(author, version = env!("VERSTAMP_BUILD_VERSION"), about = "Write a git-derived version.json")]
pub struct Cli {
    /// Directory to start the repository search from (defaults to the current directory)
    #[arg(long, env = "VERSTAMP_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Artifact path (defaults to ROOT/version.json)
    #[arg(short, long, env = "VERSTAMP_OUTPUT", global = true)]
    pub output: Option<PathBuf>,

    /// Suppress progress logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Resolution options.
    #[command(flatten)]
    pub resolve: ResolveArgs,

    /// What to do; generates the artifact when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options that only affect resolution.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// git executable to run
    #[arg(long, env = "VERSTAMP_GIT", default_value = "git")]
    pub git: String,

    /// Seconds to wait for each git command
    #[arg(long, env = "VERSTAMP_TIMEOUT", default_value_t = 5)]
    pub timeout: u64,

    /// Base version used when HEAD carries no tag
    #[arg(long, env = "VERSTAMP_DEFAULT_VERSION", default_value = verstamp_core::DEFAULT_BASE_VERSION)]
    pub default_version: String,
}

/// Subcommands. Without one, the artifact is generated.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve and write the version artifact (the default)
    Generate,
    /// Print the version stored in an existing artifact
    Show,
}

impl Cli {
    /// Project root: `--root`, else the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no root was given and the current directory is unavailable.
    pub fn project_root(&self) -> std::io::Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => std::env::current_dir(),
        }
    }

    /// Artifact path: `--output`, else `version.json` under the project root.
    ///
    /// # Errors
    ///
    /// Same as [`Self::project_root`].
    pub fn output_path(&self) -> std::io::Result<PathBuf> {
        match &self.output {
            Some(output) => Ok(output.clone()),
            None => Ok(self.project_root()?.join(verstamp_core::OUTPUT_FILE_NAME)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_generates_with_defaults() {
        let cli = Cli::try_parse_from(["verstamp"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.quiet);
        assert_eq!(cli.resolve.timeout, 5);
        assert_eq!(cli.resolve.default_version, "0.1.0");
    }

    #[test]
    fn test_explicit_paths() {
        let cli = Cli::try_parse_from([
            "verstamp",
            "--root",
            "/work/game",
            "--output",
            "/tmp/out.json",
            "--timeout",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.project_root().unwrap(), PathBuf::from("/work/game"));
        assert_eq!(cli.output_path().unwrap(), PathBuf::from("/tmp/out.json"));
        assert_eq!(cli.resolve.timeout, 2);
    }

    #[test]
    fn test_output_defaults_under_root() {
        let cli = Cli::try_parse_from(["verstamp", "--root", "/work/game"]).unwrap();
        assert_eq!(
            cli.output_path().unwrap(),
            PathBuf::from("/work/game/version.json")
        );
    }

    #[test]
    fn test_show_accepts_global_output() {
        let cli = Cli::try_parse_from(["verstamp", "show", "-o", "build/version.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Show)));
        assert_eq!(
            cli.output_path().unwrap(),
            PathBuf::from("build/version.json")
        );
    }
}
