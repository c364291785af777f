//! Configuration module

use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use stylesync_core::EngineConfig;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Reconciliation engine configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Batch configuration
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Format used when `--format` is not given
    pub default_format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            pretty_json: true,
        }
    }
}

/// Batch-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl CliConfig {
    /// Parse and validate a configuration from TOML source
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: CliConfig =
            toml::from_str(source).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config
            .engine
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.engine.transforms = config.engine.enabled();
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load `path` when given, the defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use stylesync_core::Transform;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.output.default_format, OutputFormat::Text);
        assert!(config.output.pretty_json);
        assert_eq!(config.batch.worker_threads, 0);
    }

    #[test]
    fn test_partial_sections() {
        let config = CliConfig::from_toml_str(
            r#"
[engine]
transforms = ["line-endings", "quotes"]

[output]
default_format = "markdown"
"#,
        )
        .unwrap();

        assert_eq!(
            config.engine.transforms,
            vec![Transform::Quotes, Transform::LineEndings]
        );
        assert_eq!(config.engine.tab_width, 4);
        assert_eq!(config.output.default_format, OutputFormat::Markdown);
        assert!(config.output.pretty_json);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for source in [
            "[engine]\ntab_width = 0\n",
            "[engine]\ntransforms = []\n",
            "[engine]\ntransforms = [\"tabs\"]\n",
            "[output]\ndefault_format = \"html\"\n",
            "[unknown]\n",
        ] {
            let error = CliConfig::from_toml_str(source).unwrap_err();
            assert!(
                error.downcast_ref::<CliError>().is_some(),
                "expected a config error for {source:?}"
            );
        }
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = CliConfig::default();
        let rendered = config.to_toml_string().unwrap();
        assert!(rendered.contains("[engine]"));
        assert!(rendered.contains("[batch]"));
        assert_eq!(CliConfig::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[batch]\nworker_threads = 2\n").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.batch.worker_threads, 2);
        assert_eq!(CliConfig::load(None).unwrap(), CliConfig::default());
        assert!(CliConfig::load(Some(Path::new("/nonexistent/stylesync.toml"))).is_err());
    }
}
