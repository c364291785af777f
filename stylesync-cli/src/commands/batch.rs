//! Batch command implementation

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use stylesync_core::Reconciler;

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::output::{create_formatter, FileReport, OutputFormat};
use crate::progress::ProgressReporter;

/// Arguments for the batch command
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Directory holding the base versions, mirroring the layout under --root
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: PathBuf,

    /// Modified files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Directory the input paths are relative to when looking up base files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Overwrite each modified file with its cleaned text
    #[arg(long, conflicts_with = "output_dir")]
    pub in_place: bool,

    /// Write cleaned files here, mirroring the layout under --root
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of worker threads (default: from config, else all cores)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl BatchArgs {
    /// Execute the batch command
    pub fn execute(&self) -> Result<()> {
        super::init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let reports = self.run(&config)?;

        let format = self.format.unwrap_or(config.output.default_format);
        let mut formatter = create_formatter(format, io::stdout(), config.output.pretty_json);
        for report in &reports {
            formatter.format_report(report)?;
        }
        formatter.finish()?;

        let failed = reports.iter().filter(|r| r.is_failed()).count();
        if failed > 0 {
            return Err(CliError::ProcessingError(format!(
                "{failed} of {} files failed",
                reports.len()
            ))
            .into());
        }

        Ok(())
    }

    /// Reconcile every matched file; reports come back in input order
    ///
    /// A file that cannot be reconciled yields a failed report and the rest
    /// of the batch carries on.
    pub fn run(&self, config: &CliConfig) -> Result<Vec<FileReport>> {
        let files = resolve_patterns(&self.input)?;
        let threads = self.worker_threads(config);
        log::info!(
            "Reconciling {} files on {} threads",
            files.len(),
            threads
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to start worker threads")?;

        let reconciler = Reconciler::new(config.engine.clone());
        let progress = ProgressReporter::new(files.len() as u64, self.quiet);

        let reports = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let report = match self.reconcile_file(&reconciler, path) {
                        Ok(report) => report,
                        Err(e) => {
                            log::error!("{}: {:#}", path.display(), e);
                            FileReport::failed(path, &e)
                        }
                    };
                    progress.file_completed(&path.display().to_string());
                    report
                })
                .collect::<Vec<_>>()
        });
        progress.finish();

        Ok(reports)
    }

    fn worker_threads(&self, config: &CliConfig) -> usize {
        match self.threads.unwrap_or(config.batch.worker_threads) {
            0 => num_cpus::get(),
            n => n,
        }
    }

    /// Path of `path` relative to `--root`
    fn relative_path<'a>(&self, path: &'a Path) -> Result<&'a Path> {
        match path.strip_prefix(&self.root) {
            Ok(relative) => Ok(relative),
            Err(_) if path.is_relative() => Ok(path),
            Err(_) => Err(CliError::ProcessingError(format!(
                "{} is not under {}",
                path.display(),
                self.root.display()
            ))
            .into()),
        }
    }

    fn reconcile_file(&self, reconciler: &Reconciler, path: &Path) -> Result<FileReport> {
        let relative = self.relative_path(path)?;
        let base_path = self.base_dir.join(relative);

        let modified = FileReader::read_text(path)?;
        let (base, base_found) = match FileReader::read_text_if_exists(&base_path)? {
            Some(base) => (base, true),
            None => {
                log::warn!(
                    "No base file at {}; reconciling {} against an empty base",
                    base_path.display(),
                    path.display()
                );
                (String::new(), false)
            }
        };

        let outcome = reconciler.reconcile(&base, &modified);
        log::debug!(
            "{}: {:.6} -> {:.6}",
            path.display(),
            outcome.original_score,
            outcome.score
        );

        let base_ref = base_found.then_some(base_path.as_path());
        let mut report = FileReport::new(path, base_ref, outcome);

        let destination = if self.in_place {
            Some(path.to_path_buf())
        } else {
            self.output_dir.as_ref().map(|dir| dir.join(relative))
        };
        let cleaned = report.cleaned.take();
        if let (Some(destination), Some(cleaned)) = (destination, cleaned) {
            FileReader::write_text(&destination, &cleaned)?;
            report.written_to = Some(destination.display().to_string());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Tree {
        dir: TempDir,
    }

    impl Tree {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let base = dir.path().join("base");
            let modified = dir.path().join("modified");
            fs::create_dir_all(base.join("lib")).unwrap();
            fs::create_dir_all(modified.join("lib")).unwrap();

            fs::write(base.join("lib/a.js"), "x = \"a\";\n").unwrap();
            fs::write(modified.join("lib/a.js"), "x = 'a'\n").unwrap();
            fs::write(modified.join("lib/b.js"), "y = 'b'\n").unwrap();
            Self { dir }
        }

        fn path(&self, relative: &str) -> PathBuf {
            self.dir.path().join(relative)
        }

        fn args(&self) -> BatchArgs {
            BatchArgs {
                base_dir: self.path("base"),
                input: vec![format!("{}/lib/*.js", self.path("modified").display())],
                root: self.path("modified"),
                in_place: false,
                output_dir: None,
                format: None,
                threads: Some(2),
                config: None,
                quiet: true,
                verbose: 0,
            }
        }
    }

    #[test]
    fn test_reports_in_input_order() {
        let tree = Tree::new();
        let reports = tree.args().run(&CliConfig::default()).unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports[0].path.ends_with("a.js"));
        assert!(reports[1].path.ends_with("b.js"));
        assert!(reports[0].base.is_some());
        assert!(reports[1].base.is_none());
        assert_eq!(reports[0].accepted_steps, 2);
        assert_eq!(reports[1].accepted_steps, 0);
        assert!(reports.iter().all(|r| r.cleaned.is_none()));
    }

    #[test]
    fn test_in_place() {
        let tree = Tree::new();
        let mut args = tree.args();
        args.in_place = true;
        args.run(&CliConfig::default()).unwrap();

        assert_eq!(
            fs::read_to_string(tree.path("modified/lib/a.js")).unwrap(),
            "x = \"a\";\n"
        );
        assert_eq!(
            fs::read_to_string(tree.path("modified/lib/b.js")).unwrap(),
            "y = 'b'\n"
        );
    }

    #[test]
    fn test_output_dir_mirrors_layout() {
        let tree = Tree::new();
        let mut args = tree.args();
        args.output_dir = Some(tree.path("out"));
        let reports = args.run(&CliConfig::default()).unwrap();

        assert_eq!(
            fs::read_to_string(tree.path("out/lib/a.js")).unwrap(),
            "x = \"a\";\n"
        );
        assert!(reports[0]
            .written_to
            .as_deref()
            .unwrap()
            .ends_with("a.js"));
        // Source files stay untouched
        assert_eq!(
            fs::read_to_string(tree.path("modified/lib/a.js")).unwrap(),
            "x = 'a'\n"
        );
    }

    #[test]
    fn test_path_outside_root() {
        let tree = Tree::new();
        let mut args = tree.args();
        args.root = tree.path("elsewhere");

        let reports = args.run(&CliConfig::default()).unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(FileReport::is_failed));
        assert!(reports[0]
            .error
            .as_deref()
            .unwrap()
            .starts_with("Processing error: "));
    }

    #[test]
    fn test_unreadable_file_does_not_stop_batch() {
        let tree = Tree::new();
        fs::write(tree.path("modified/lib/c.js"), [0x78, 0xff, 0xfe, 0x0a]).unwrap();
        let mut args = tree.args();
        args.in_place = true;

        let reports = args.run(&CliConfig::default()).unwrap();
        assert_eq!(reports.len(), 3);
        assert!(!reports[0].is_failed());
        assert!(!reports[1].is_failed());
        assert!(reports[2].path.ends_with("c.js"));
        assert!(reports[2]
            .error
            .as_deref()
            .unwrap()
            .contains("Failed to read file"));

        assert_eq!(
            fs::read_to_string(tree.path("modified/lib/a.js")).unwrap(),
            "x = \"a\";\n"
        );
        assert_eq!(
            fs::read(tree.path("modified/lib/c.js")).unwrap(),
            vec![0x78, 0xff, 0xfe, 0x0a]
        );
    }

    #[test]
    fn test_worker_threads() {
        let tree = Tree::new();
        let mut args = tree.args();
        let mut config = CliConfig::default();

        assert_eq!(args.worker_threads(&config), 2);
        args.threads = None;
        config.batch.worker_threads = 3;
        assert_eq!(args.worker_threads(&config), 3);
        config.batch.worker_threads = 0;
        assert_eq!(args.worker_threads(&config), num_cpus::get());
    }
}
