//! Reconciliation engine
//!
//! Changed regions go through a greedy fixpoint loop: the enabled
//! transformations are tried in order, the first one that strictly raises the
//! region's overlap with its aligned base block is kept, and the scan restarts
//! from the first transformation. A full pass without an improvement ends the
//! loop. Ties are rejected, so every kept step raises a bounded ratio and the
//! loop always halts.

use crate::config::EngineConfig;
use crate::partition::{partition, RegionKind};
use crate::score::{overlap_ratio, similarity};
use crate::transform::{Transform, TransformContext};
use std::ops::Range;
use tracing::{debug, trace, warn};

/// What happened to one region
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionOutcome {
    /// Region tag
    pub kind: RegionKind,
    /// Byte range in the modified text
    pub modified: Range<usize>,
    /// Byte range of the aligned base block
    pub base: Range<usize>,
    /// Accepted transformations, in the order they were kept
    pub applied: Vec<Transform>,
    /// Raw overlap with the base block before normalization
    pub score_before: f64,
    /// Raw overlap with the base block after normalization
    pub score_after: f64,
}

/// Result of reconciling a modified text against its base
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reconciliation {
    /// The cleaned text
    pub cleaned: String,
    /// `similarity(base, cleaned)`
    pub score: f64,
    /// `similarity(base, modified)`
    pub original_score: f64,
    /// Per-region outcomes in document order
    pub regions: Vec<RegionOutcome>,
    /// Set when the assembled text scored below the untouched input and the
    /// input was returned instead
    pub reverted: bool,
}

impl Reconciliation {
    /// Check if `cleaned` differs from the modified input
    pub fn is_changed(&self) -> bool {
        !self.reverted && self.regions.iter().any(|r| !r.applied.is_empty())
    }

    /// Total number of accepted rewrites across all regions
    pub fn accepted_steps(&self) -> usize {
        if self.reverted {
            return 0;
        }
        self.regions.iter().map(|r| r.applied.len()).sum()
    }

    /// Number of regions handed to the fixpoint loop
    pub fn changed_regions(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| r.kind == RegionKind::Changed)
            .count()
    }
}

/// Outcome of the fixpoint loop on a single text
#[derive(Debug, Clone, PartialEq)]
pub struct Fixpoint {
    /// Normalized text
    pub text: String,
    /// Accepted transformations, in order
    pub applied: Vec<Transform>,
    /// Raw overlap before the loop
    pub score_before: f64,
    /// Raw overlap after the loop
    pub score_after: f64,
}

/// Reconciliation engine
///
/// Holds only configuration; every call is independent of the others.
#[derive(Debug, Clone)]
pub struct Reconciler {
    config: EngineConfig,
    transforms: Vec<Transform>,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Reconciler {
    /// Create an engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        let transforms = config.enabled();
        Self { config, transforms }
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Transformations this engine runs, in application order
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Run the fixpoint loop on `text` against `reference`
    ///
    /// Candidates are compared on the raw [`overlap_ratio`], so a rewrite is
    /// still kept when [`similarity`] has already saturated at 1.0.
    pub fn normalize(&self, text: &str, reference: &str) -> Fixpoint {
        let mut current = text.to_string();
        let mut current_score = overlap_ratio(reference, &current);
        let score_before = current_score;
        let mut applied = Vec::new();
        let context = TransformContext {
            original: text,
            tab_width: self.config.tab_width,
        };

        'scan: while applied.len() < self.config.max_steps_per_region {
            for &transform in &self.transforms {
                let candidate = transform.apply(&current, reference, &context);
                if candidate == current {
                    continue;
                }

                let candidate_score = overlap_ratio(reference, &candidate);
                if candidate_score > current_score {
                    debug!(
                        transform = transform.name(),
                        before = current_score,
                        after = candidate_score,
                        "accepted rewrite"
                    );
                    current = candidate;
                    current_score = candidate_score;
                    applied.push(transform);
                    continue 'scan;
                }

                trace!(
                    transform = transform.name(),
                    score = candidate_score,
                    "rejected rewrite"
                );
            }
            break;
        }

        if applied.len() >= self.config.max_steps_per_region {
            warn!(
                steps = applied.len(),
                "stopped at the per-region step ceiling"
            );
        }

        Fixpoint {
            text: current,
            applied,
            score_before,
            score_after: current_score,
        }
    }

    /// Reconcile `modified` toward the style of `base`
    pub fn reconcile(&self, base: &str, modified: &str) -> Reconciliation {
        let original_score = similarity(base, modified);
        let regions = partition(base, modified);

        let mut cleaned = String::with_capacity(modified.len());
        let mut outcomes = Vec::with_capacity(regions.len());

        for region in regions {
            let text = region.modified_text(modified);
            let reference = region.base_text(base);

            let (output, applied, score_before, score_after) = match region.kind {
                RegionKind::Unchanged => {
                    let score = overlap_ratio(reference, text);
                    (text.to_string(), Vec::new(), score, score)
                }
                RegionKind::Changed => {
                    let fixpoint = self.normalize(text, reference);
                    (
                        fixpoint.text,
                        fixpoint.applied,
                        fixpoint.score_before,
                        fixpoint.score_after,
                    )
                }
            };

            cleaned.push_str(&output);
            outcomes.push(RegionOutcome {
                kind: region.kind,
                modified: region.modified,
                base: region.base,
                applied,
                score_before,
                score_after,
            });
        }

        let score = similarity(base, &cleaned);
        debug!(
            regions = outcomes.len(),
            original_score, score, "reconciled document"
        );

        if score < original_score {
            debug!("cleaned text scored lower than the input; keeping the input");
            return Reconciliation {
                cleaned: modified.to_string(),
                score: original_score,
                original_score,
                regions: outcomes,
                reverted: true,
            };
        }

        Reconciliation {
            cleaned,
            score,
            original_score,
            regions: outcomes,
            reverted: false,
        }
    }
}
