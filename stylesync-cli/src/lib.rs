//! stylesync CLI library
//!
//! This library provides the command-line interface for the stylesync
//! style drift reconciliation engine.

use clap::Parser;

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

/// Reconcile cosmetic style drift between a base file and its edited version
#[derive(Debug, Parser)]
#[command(name = "stylesync", version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: commands::Commands,
}

impl Cli {
    /// Run the parsed command
    pub fn execute(&self) -> CliResult<()> {
        self.command.execute()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Commands, ListCommands};
    use crate::output::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_reconcile() {
        let cli = Cli::try_parse_from([
            "stylesync",
            "reconcile",
            "--base",
            "a.js",
            "--modified",
            "b.js",
            "-f",
            "json",
            "-vv",
        ])
        .unwrap();

        match cli.command {
            Commands::Reconcile(args) => {
                assert_eq!(args.base.to_str(), Some("a.js"));
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert_eq!(args.verbose, 2);
                assert!(!args.in_place);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_output_conflicts_with_in_place() {
        let result = Cli::try_parse_from([
            "stylesync",
            "reconcile",
            "-b",
            "a.js",
            "-m",
            "b.js",
            "-o",
            "c.js",
            "--in-place",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_batch_and_list() {
        let cli = Cli::try_parse_from([
            "stylesync",
            "batch",
            "--base-dir",
            "main",
            "-i",
            "src/**/*.js",
            "-i",
            "lib/*.js",
            "--threads",
            "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Batch(args) => {
                assert_eq!(args.input.len(), 2);
                assert_eq!(args.threads, Some(4));
                assert_eq!(args.root.to_str(), Some("."));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["stylesync", "list", "formats"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List {
                subcommand: ListCommands::Formats
            }
        ));
    }
}
