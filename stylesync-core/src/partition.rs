//! Block-driven region partition
//!
//! The modified text is aligned to the base with a line-level longest common
//! subsequence. Runs of common lines become [`RegionKind::Unchanged`] regions;
//! runs of inserted or rewritten lines become [`RegionKind::Changed`] regions
//! whose base span is the base lines dropped at the same position. Every
//! contiguous changed block is one region, scored as a whole against its
//! aligned base block. Lines keep their terminators, so a line that only
//! differs in `\n` vs `\r\n` counts as changed.
//!
//! The alignment runs in linear space: common prefix and suffix lines are
//! stripped first, and the remaining middle is split recursively at the
//! point where forward and backward LCS lengths meet.

use std::collections::HashSet;
use std::ops::Range;

/// Whether a region is copied verbatim or handed to the fixpoint loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RegionKind {
    /// Identical in base and modified
    Unchanged,
    /// Inserted or rewritten in modified
    Changed,
}

/// A contiguous span of the modified text aligned to a span of the base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Region tag
    pub kind: RegionKind,
    /// Byte range in the modified text
    pub modified: Range<usize>,
    /// Byte range of the aligned base block (empty for pure insertions)
    pub base: Range<usize>,
}

impl Region {
    /// Slice this region out of the modified text
    pub fn modified_text<'a>(&self, modified: &'a str) -> &'a str {
        &modified[self.modified.clone()]
    }

    /// Slice the aligned base block out of the base text
    pub fn base_text<'a>(&self, base: &'a str) -> &'a str {
        &base[self.base.clone()]
    }

    /// Check if this region is a candidate for normalization
    pub fn is_changed(&self) -> bool {
        self.kind == RegionKind::Changed
    }
}

/// A line with its terminator and its byte offset
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    text: &'a str,
    start: usize,
}

impl Line<'_> {
    fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut start = 0;
    text.split_inclusive('\n')
        .map(|line| {
            let entry = Line { text: line, start };
            start += line.len();
            entry
        })
        .collect()
}

/// Matched `(base_index, modified_index)` line pairs, in increasing order
fn matched_lines(base: &[Line<'_>], modified: &[Line<'_>]) -> Vec<(usize, usize)> {
    let prefix = base
        .iter()
        .zip(modified)
        .take_while(|(b, m)| b.text == m.text)
        .count();

    let suffix = base[prefix..]
        .iter()
        .rev()
        .zip(modified[prefix..].iter().rev())
        .take_while(|(b, m)| b.text == m.text)
        .count();

    let base_mid = &base[prefix..base.len() - suffix];
    let mod_mid = &modified[prefix..modified.len() - suffix];

    let mut pairs: Vec<(usize, usize)> = (0..prefix).map(|i| (i, i)).collect();
    pairs.extend(
        longest_common_subsequence(base_mid, mod_mid)
            .into_iter()
            .map(|(b, m)| (b + prefix, m + prefix)),
    );
    pairs.extend((0..suffix).map(|k| {
        (
            base.len() - suffix + k,
            modified.len() - suffix + k,
        )
    }));
    pairs
}

fn longest_common_subsequence(base: &[Line<'_>], modified: &[Line<'_>]) -> Vec<(usize, usize)> {
    if base.is_empty() || modified.is_empty() {
        return Vec::new();
    }

    // Whole-file rewrites such as line-ending drift share no line at all
    let modified_set: HashSet<&str> = modified.iter().map(|line| line.text).collect();
    if !base.iter().any(|line| modified_set.contains(line.text)) {
        return Vec::new();
    }

    let mut pairs = Vec::new();
    split_alignment(base, modified, 0, 0, &mut pairs);
    pairs
}

/// LCS lengths of `base` against every prefix of `modified`
///
/// Keeps two rows, so memory is `O(modified.len())`.
fn lcs_lengths<'a, B, M>(base: B, modified: M) -> Vec<u32>
where
    B: Iterator<Item = &'a str>,
    M: Iterator<Item = &'a str> + Clone,
{
    let width = modified.clone().count();
    let mut previous = vec![0u32; width + 1];
    let mut current = vec![0u32; width + 1];

    for b in base {
        for (j, m) in modified.clone().enumerate() {
            current[j + 1] = if b == m {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous
}

/// Append matched pairs of `base` and `modified`, offset by the slices'
/// positions in the full middle section
fn split_alignment(
    base: &[Line<'_>],
    modified: &[Line<'_>],
    base_offset: usize,
    modified_offset: usize,
    pairs: &mut Vec<(usize, usize)>,
) {
    if base.is_empty() || modified.is_empty() {
        return;
    }

    if base.len() == 1 {
        if let Some(j) = modified.iter().position(|m| m.text == base[0].text) {
            pairs.push((base_offset, modified_offset + j));
        }
        return;
    }

    let mid = base.len() / 2;
    let (upper, lower) = base.split_at(mid);

    let forward = lcs_lengths(
        upper.iter().map(|line| line.text),
        modified.iter().map(|line| line.text),
    );
    let backward = lcs_lengths(
        lower.iter().rev().map(|line| line.text),
        modified.iter().rev().map(|line| line.text),
    );

    // backward[k] covers the last k modified lines
    let width = modified.len();
    let split = (0..=width)
        .max_by_key(|&j| (forward[j] + backward[width - j], std::cmp::Reverse(j)))
        .unwrap_or(0);

    split_alignment(upper, &modified[..split], base_offset, modified_offset, pairs);
    split_alignment(
        lower,
        &modified[split..],
        base_offset + mid,
        modified_offset + split,
        pairs,
    );
}

/// Byte range covering lines `from..to`, anchored at `fallback` when empty
fn span(lines: &[Line<'_>], from: usize, to: usize, fallback: usize) -> Range<usize> {
    if from < to {
        lines[from].start..lines[to - 1].end()
    } else {
        fallback..fallback
    }
}

/// Partition `modified` into ordered regions aligned to `base`
///
/// Concatenating every region's modified slice reproduces `modified`
/// exactly. Base lines deleted without a replacement produce no region.
pub fn partition(base: &str, modified: &str) -> Vec<Region> {
    let base_lines = split_lines(base);
    let mod_lines = split_lines(modified);
    let pairs = matched_lines(&base_lines, &mod_lines);

    let mut regions: Vec<Region> = Vec::new();
    let mut push = |region: Region| match regions.last_mut() {
        Some(last)
            if last.kind == RegionKind::Unchanged
                && region.kind == RegionKind::Unchanged
                && last.modified.end == region.modified.start
                && (last.base.is_empty()
                    || region.base.is_empty()
                    || last.base.end == region.base.start) =>
        {
            last.modified.end = region.modified.end;
            if !region.base.is_empty() {
                if last.base.is_empty() {
                    last.base = region.base;
                } else {
                    last.base.end = region.base.end;
                }
            }
        }
        _ => regions.push(region),
    };

    let mut bi = 0;
    let mut mi = 0;
    let sentinel = (base_lines.len(), mod_lines.len());

    for &(bj, mj) in pairs.iter().chain(std::iter::once(&sentinel)) {
        if mi < mj {
            let fallback = base_lines.get(bi).map_or(base.len(), |line| line.start);
            push(Region {
                kind: RegionKind::Changed,
                modified: span(&mod_lines, mi, mj, 0),
                base: span(&base_lines, bi, bj, fallback),
            });
        }

        if (bj, mj) == sentinel {
            break;
        }

        push(Region {
            kind: RegionKind::Unchanged,
            modified: span(&mod_lines, mj, mj + 1, 0),
            base: span(&base_lines, bj, bj + 1, 0),
        });

        bi = bj + 1;
        mi = mj + 1;
    }

    regions
}
