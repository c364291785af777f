//! Output formatting module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use stylesync_core::{Reconciliation, RegionOutcome, Transform};

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the report for one file
    fn format_report(&mut self, report: &FileReport) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Cleaned text, or one summary line per file when the text went elsewhere
    #[default]
    Text,
    /// JSON array of per-file reports with region details
    Json,
    /// Markdown summary table
    Markdown,
}

/// Reconciliation report for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The modified file
    pub path: String,
    /// The base file, if one was found
    pub base: Option<String>,
    /// Similarity of the cleaned text to the base
    pub score: f64,
    /// Similarity of the modified text to the base
    pub original_score: f64,
    /// Whether the engine fell back to the unmodified input
    pub reverted: bool,
    /// Accepted rewrites over all regions
    pub accepted_steps: usize,
    /// Distinct transformations that were kept, in application order
    pub applied: Vec<Transform>,
    /// Per-region details
    pub regions: Vec<RegionOutcome>,
    /// Cleaned text, when it was not written to a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned: Option<String>,
    /// Where the cleaned text was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<String>,
    /// Why the file could not be reconciled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// Build a report from an engine outcome
    pub fn new(path: &Path, base: Option<&Path>, outcome: Reconciliation) -> Self {
        let applied: BTreeSet<Transform> = if outcome.reverted {
            BTreeSet::new()
        } else {
            outcome
                .regions
                .iter()
                .flat_map(|r| r.applied.iter().copied())
                .collect()
        };

        Self {
            path: path.display().to_string(),
            base: base.map(|p| p.display().to_string()),
            score: outcome.score,
            original_score: outcome.original_score,
            reverted: outcome.reverted,
            accepted_steps: outcome.accepted_steps(),
            applied: applied.into_iter().collect(),
            regions: outcome.regions,
            cleaned: Some(outcome.cleaned),
            written_to: None,
            error: None,
        }
    }

    /// Report for a file that could not be reconciled
    pub fn failed(path: &Path, error: &anyhow::Error) -> Self {
        Self {
            path: path.display().to_string(),
            base: None,
            score: 0.0,
            original_score: 0.0,
            reverted: false,
            accepted_steps: 0,
            applied: Vec::new(),
            regions: Vec::new(),
            cleaned: None,
            written_to: None,
            error: Some(format!("{error:#}")),
        }
    }

    /// Check if this file could not be reconciled
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Comma-separated names of the kept transformations
    pub fn applied_names(&self) -> String {
        if self.applied.is_empty() {
            return "-".to_string();
        }
        self.applied
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Create the formatter for `format` writing into `writer`
pub fn create_formatter<'a, W>(
    format: OutputFormat,
    writer: W,
    pretty_json: bool,
) -> Box<dyn OutputFormatter + 'a>
where
    W: Write + Send + Sync + 'a,
{
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use stylesync_core::Reconciler;

    pub(crate) fn sample_report() -> FileReport {
        let outcome = Reconciler::default().reconcile("x = \"a\";\n", "x = 'a'\n");
        FileReport::new(Path::new("src/app.js"), Some(Path::new("base/app.js")), outcome)
    }

    #[test]
    fn test_report_from_outcome() {
        let report = sample_report();
        assert_eq!(report.path, "src/app.js");
        assert_eq!(report.base.as_deref(), Some("base/app.js"));
        assert_eq!(report.cleaned.as_deref(), Some("x = \"a\";\n"));
        assert_eq!(report.applied, vec![Transform::Quotes, Transform::Semicolons]);
        assert_eq!(report.applied_names(), "quotes, semicolons");
        assert!(report.score > report.original_score);
    }

    #[test]
    fn test_report_without_rewrites() {
        let outcome = Reconciler::default().reconcile("a\n", "a\n");
        let report = FileReport::new(Path::new("a.txt"), None, outcome);
        assert!(report.applied.is_empty());
        assert_eq!(report.applied_names(), "-");
        assert_eq!(report.accepted_steps, 0);
    }

    #[test]
    fn test_failed_report() {
        let error = anyhow::anyhow!("stream did not contain valid UTF-8")
            .context("Failed to read file: src/bad.js");
        let report = FileReport::failed(Path::new("src/bad.js"), &error);

        assert!(report.is_failed());
        assert_eq!(
            report.error.as_deref(),
            Some("Failed to read file: src/bad.js: stream did not contain valid UTF-8")
        );
        assert!(report.cleaned.is_none());
        assert_eq!(report.accepted_steps, 0);
        assert!(!sample_report().is_failed());
    }

    #[test]
    fn test_create_formatter() {
        let mut buffer = Vec::new();
        {
            let mut formatter = create_formatter(OutputFormat::Text, &mut buffer, true);
            formatter.format_report(&sample_report()).unwrap();
            formatter.finish().unwrap();
        }
        assert_eq!(String::from_utf8(buffer).unwrap(), "x = \"a\";\n");
    }
}
