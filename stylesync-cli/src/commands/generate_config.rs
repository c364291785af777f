//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use stylesync_core::Transform;

use crate::config::CliConfig;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        let template = self.generate_template()?;
        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration written to {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("1. Edit the [engine] section to choose transforms");
        println!("2. Validate your configuration:");
        println!("   stylesync validate -c {}", self.output.display());
        println!("3. Use it when reconciling:");
        println!(
            "   stylesync reconcile --base old.js --modified new.js --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Default configuration with a commented header
    fn generate_template(&self) -> Result<String> {
        let names: Vec<&str> = Transform::ALL.iter().map(|t| t.name()).collect();
        let body = CliConfig::default().to_toml_string()?;

        Ok(format!(
            "# stylesync configuration\n\
             #\n\
             # Available transforms, always applied in this order:\n\
             #   {}\n\
             # Drop a name from `engine.transforms` to disable it.\n\
             # `batch.worker_threads = 0` uses every core.\n\n\
             {body}",
            names.join(", ")
        ))
    }
}
