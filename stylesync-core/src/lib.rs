//! Style drift reconciliation between a base text and a modified text
//!
//! Given the reference (base) version of a document and an edited version of
//! it, the engine keeps the meaningful edits and pulls cosmetic drift (quote
//! style, trailing semicolons, whitespace, indentation, line endings) back
//! toward the conventions of the base.
//!
//! The work happens in three layers:
//!
//! - [`partition`] splits the modified text into unchanged and changed
//!   regions with a line-level LCS diff against the base.
//! - [`transform`] holds the fixed, ordered set of normalizing rewrites.
//! - [`reconciler`] runs a greedy fixpoint loop over each changed region,
//!   keeping a rewrite only when it strictly raises the token overlap with
//!   the aligned base block (see [`score`]).
//!
//! ## Example
//!
//! ```rust
//! use stylesync_core::{reconcile, similarity};
//!
//! let base = "say(\"hi\");\n";
//! let modified = "say('hi')\n";
//!
//! let (cleaned, score) = reconcile(base, modified);
//! assert_eq!(cleaned, "say(\"hi\");\n");
//! assert!(score > similarity(base, modified));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod partition;
pub mod reconciler;
pub mod score;
pub mod token;
pub mod transform;

// Re-export key types
pub use config::{EngineConfig, EngineConfigBuilder};
pub use error::{Result, StyleError};
pub use partition::{partition, Region, RegionKind};
pub use reconciler::{Reconciler, Reconciliation, RegionOutcome};
pub use score::{overlap_ratio, similarity};
pub use token::tokenize;
pub use transform::Transform;

/// Reconcile `modified` toward the style of `base` with the default configuration
///
/// Returns the cleaned text and its similarity to `base`.
pub fn reconcile(base: &str, modified: &str) -> (String, f64) {
    let outcome = Reconciler::default().reconcile(base, modified);
    (outcome.cleaned, outcome.score)
}
