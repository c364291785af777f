//! Plain text output formatter

use super::{FileReport, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter
///
/// Writes the cleaned text verbatim when the report carries it, otherwise a
/// one-line score summary.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_report(&mut self, report: &FileReport) -> Result<()> {
        if let Some(error) = &report.error {
            writeln!(self.writer, "{}: failed ({})", report.path, error)?;
            return Ok(());
        }

        if let Some(cleaned) = &report.cleaned {
            self.writer.write_all(cleaned.as_bytes())?;
            return Ok(());
        }

        write!(
            self.writer,
            "{}: {:.6} -> {:.6} ({} rewrites",
            report.path, report.original_score, report.score, report.accepted_steps
        )?;
        if report.reverted {
            write!(self.writer, ", reverted")?;
        }
        writeln!(self.writer, ")")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
