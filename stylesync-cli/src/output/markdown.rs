//! Markdown output formatter

use super::{FileReport, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs a summary table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    file_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            file_count: 0,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, "| File | Before | After | Rewrites | Transforms |")?;
        writeln!(self.writer, "|------|--------|-------|----------|------------|")?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_report(&mut self, report: &FileReport) -> Result<()> {
        if self.file_count == 0 {
            self.write_header()?;
        }
        self.file_count += 1;

        if let Some(error) = &report.error {
            writeln!(self.writer, "| {} | - | - | - | failed: {} |", report.path, error)?;
            return Ok(());
        }

        let transforms = if report.reverted {
            "reverted".to_string()
        } else {
            report.applied_names()
        };
        writeln!(
            self.writer,
            "| {} | {:.6} | {:.6} | {} | {} |",
            report.path, report.original_score, report.score, report.accepted_steps, transforms
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.file_count == 0 {
            self.write_header()?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total files: {}*", self.file_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
