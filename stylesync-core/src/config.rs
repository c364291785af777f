//! Engine configuration

use crate::error::{Result, StyleError};
use crate::transform::Transform;
#[cfg(feature = "serde")]
use std::path::Path;

/// Default column width of a tab when measuring indentation
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Default ceiling on accepted rewrites per region
pub const DEFAULT_MAX_STEPS_PER_REGION: usize = 64;

/// Reconciliation engine configuration
///
/// `transforms` selects which rewrites run; they always run in the order of
/// [`Transform::ALL`] regardless of how they are listed here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EngineConfig {
    /// Enabled transformations
    pub transforms: Vec<Transform>,
    /// Columns per tab when measuring indentation depth
    pub tab_width: usize,
    /// Hard ceiling on accepted rewrites in one region
    pub max_steps_per_region: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            transforms: Transform::ALL.to_vec(),
            tab_width: DEFAULT_TAB_WIDTH,
            max_steps_per_region: DEFAULT_MAX_STEPS_PER_REGION,
        }
    }
}

impl EngineConfig {
    /// Create a builder starting from the defaults
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.transforms.is_empty() {
            return Err(StyleError::InvalidConfig(
                "at least one transform must be enabled".to_string(),
            ));
        }
        if self.tab_width == 0 {
            return Err(StyleError::InvalidConfig(
                "tab_width must be positive".to_string(),
            ));
        }
        if self.max_steps_per_region == 0 {
            return Err(StyleError::InvalidConfig(
                "max_steps_per_region must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Enabled transformations in application order, without duplicates
    pub fn enabled(&self) -> Vec<Transform> {
        let mut enabled = self.transforms.clone();
        enabled.sort();
        enabled.dedup();
        enabled
    }

    /// Parse and validate a TOML configuration
    #[cfg(feature = "serde")]
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        config.transforms = config.enabled();
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    #[cfg(feature = "serde")]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Fluent builder for [`EngineConfig`]
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Replace the set of enabled transformations
    pub fn transforms(mut self, transforms: impl IntoIterator<Item = Transform>) -> Self {
        self.config.transforms = transforms.into_iter().collect();
        self
    }

    /// Disable one transformation
    pub fn without(mut self, transform: Transform) -> Self {
        self.config.transforms.retain(|t| *t != transform);
        self
    }

    /// Set the tab width used for indentation depth
    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.config.tab_width = tab_width;
        self
    }

    /// Set the accepted-rewrite ceiling per region
    pub fn max_steps_per_region(mut self, steps: usize) -> Self {
        self.config.max_steps_per_region = steps;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<EngineConfig> {
        let mut config = self.config;
        config.validate()?;
        config.transforms = config.enabled();
        Ok(config)
    }
}
