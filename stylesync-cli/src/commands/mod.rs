//! CLI command implementations

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use stylesync_core::Transform;

use crate::output::OutputFormat;

pub mod batch;
pub mod generate_config;
pub mod reconcile;
pub mod score;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Reconcile a modified file toward the style of its base version
    Reconcile(reconcile::ReconcileArgs),

    /// Print the similarity of one file to another
    Score(score::ScoreArgs),

    /// Reconcile many files against a directory of base versions
    Batch(batch::BatchArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a configuration file with the default settings
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    Validate(validate::ValidateArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List normalizing transformations in application order
    Transforms,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Reconcile(args) => args.execute(),
            Commands::Score(args) => args.execute(),
            Commands::Batch(args) => args.execute(),
            Commands::List { subcommand } => {
                print!("{}", subcommand.render());
                Ok(())
            }
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
        }
    }
}

impl ListCommands {
    /// Text printed by the listing
    pub fn render(self) -> String {
        let mut out = String::new();
        match self {
            ListCommands::Transforms => {
                out.push_str("Transforms (applied in this order):\n");
                for transform in Transform::ALL {
                    out.push_str(&format!(
                        "  {:<14}{}\n",
                        transform.name(),
                        transform.description()
                    ));
                }
            }
            ListCommands::Formats => {
                out.push_str("Output formats:\n");
                for format in OutputFormat::value_variants() {
                    if let Some(value) = format.to_possible_value() {
                        let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
                        out.push_str(&format!("  {:<10}{}\n", value.get_name(), help));
                    }
                }
            }
        }
        out
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` still takes precedence. Does nothing if a logger is already
/// installed.
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
