//! Error types
//!
//! Scoring and reconciliation are total over string input; only building or
//! loading an [`EngineConfig`](crate::EngineConfig) can fail.

use thiserror::Error;

/// Errors raised while preparing the engine
#[derive(Error, Debug)]
pub enum StyleError {
    /// Configuration values out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[cfg(feature = "serde")]
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error while reading a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine setup
pub type Result<T> = std::result::Result<T, StyleError>;
