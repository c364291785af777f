//! Reconcile command implementation

use anyhow::Result;
use clap::Args;
use std::io;
use std::path::PathBuf;
use stylesync_core::Reconciler;

use crate::config::CliConfig;
use crate::input::FileReader;
use crate::output::{create_formatter, FileReport, OutputFormat};

/// Arguments for the reconcile command
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Reference version of the file
    #[arg(short, long, value_name = "FILE")]
    pub base: PathBuf,

    /// Edited version of the file
    #[arg(short, long, value_name = "FILE")]
    pub modified: PathBuf,

    /// Write the cleaned text to this file (default: stdout)
    #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite the modified file with the cleaned text
    #[arg(long)]
    pub in_place: bool,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ReconcileArgs {
    /// Execute the reconcile command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let report = self.run(&config)?;

        let format = self.format.unwrap_or(config.output.default_format);
        let mut formatter = create_formatter(format, io::stdout(), config.output.pretty_json);
        formatter.format_report(&report)?;
        formatter.finish()?;

        Ok(())
    }

    /// Reconcile the two files and write the cleaned text where requested
    pub fn run(&self, config: &CliConfig) -> Result<FileReport> {
        let base = FileReader::read_text(&self.base)?;
        let modified = FileReader::read_text(&self.modified)?;

        let reconciler = Reconciler::new(config.engine.clone());
        let outcome = reconciler.reconcile(&base, &modified);
        log::info!(
            "{}: {:.6} -> {:.6} ({} rewrites in {} changed regions)",
            self.modified.display(),
            outcome.original_score,
            outcome.score,
            outcome.accepted_steps(),
            outcome.changed_regions()
        );
        if outcome.reverted {
            log::warn!(
                "{}: rewrites lowered the similarity; keeping the file as is",
                self.modified.display()
            );
        }

        let mut report = FileReport::new(&self.modified, Some(&self.base), outcome);

        let destination = if self.in_place {
            Some(&self.modified)
        } else {
            self.output.as_ref()
        };
        if let Some(path) = destination {
            if let Some(cleaned) = report.cleaned.take() {
                FileReader::write_text(path, &cleaned)?;
                log::info!("Wrote {}", path.display());
            }
            report.written_to = Some(path.display().to_string());
        }

        Ok(report)
    }
}
