//! Score command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use stylesync_core::{overlap_ratio, similarity};

use crate::input::FileReader;

/// Arguments for the score command
#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Reference file (the side whose tokens are counted)
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// File to compare against the reference
    #[arg(value_name = "OTHER")]
    pub other: PathBuf,

    /// Print the unclamped overlap ratio instead
    #[arg(long)]
    pub raw: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ScoreArgs {
    /// Execute the score command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, false);

        let score = self.compute()?;
        println!("{score:.6}");
        Ok(())
    }

    /// Similarity of `base` to `other`
    pub fn compute(&self) -> Result<f64> {
        let base = FileReader::read_text(&self.base)?;
        let other = FileReader::read_text(&self.other)?;

        Ok(if self.raw {
            overlap_ratio(&base, &other)
        } else {
            similarity(&base, &other)
        })
    }
}
