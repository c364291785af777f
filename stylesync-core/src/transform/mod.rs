//! Normalizing transformations
//!
//! Each transformation is a pure rewrite of a text toward the conventions of
//! a reference text. They are applied in the fixed order of
//! [`Transform::ALL`]; the reconciler decides which results to keep.

mod indentation;
mod line_endings;
mod quotes;
mod semicolons;
mod whitespace;

pub use indentation::{detect_unit, normalize_indentation, IndentUnit};
pub use line_endings::normalize_line_endings;
pub use quotes::{dominant_quote, normalize_quotes};
pub use semicolons::normalize_semicolons;
pub use whitespace::normalize_whitespace;

use std::fmt;
use std::str::FromStr;

/// Inputs shared by every transformation of one region
#[derive(Debug, Clone, Copy)]
pub struct TransformContext<'a> {
    /// The region's text before any rewrite was kept
    pub original: &'a str,
    /// Columns per tab when measuring indentation depth
    pub tab_width: usize,
}

/// A style-normalizing rewrite
///
/// The declaration order is the application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Transform {
    /// Use the reference's dominant quote character everywhere
    Quotes,
    /// Match the reference's trailing-semicolon habit line by line
    Semicolons,
    /// Trim lines and collapse internal runs of blanks
    Whitespace,
    /// Re-indent with the reference's indentation unit
    Indentation,
    /// Use the reference's line terminator
    LineEndings,
}

impl Transform {
    /// Every transformation, in application order
    pub const ALL: [Transform; 5] = [
        Transform::Quotes,
        Transform::Semicolons,
        Transform::Whitespace,
        Transform::Indentation,
        Transform::LineEndings,
    ];

    /// Stable name used in configuration files and reports
    pub fn name(self) -> &'static str {
        match self {
            Transform::Quotes => "quotes",
            Transform::Semicolons => "semicolons",
            Transform::Whitespace => "whitespace",
            Transform::Indentation => "indentation",
            Transform::LineEndings => "line-endings",
        }
    }

    /// One-line description for listings
    pub fn description(self) -> &'static str {
        match self {
            Transform::Quotes => "replace quote characters with the reference's dominant quote",
            Transform::Semicolons => "add or strip trailing semicolons to match the reference",
            Transform::Whitespace => "trim lines and collapse runs of spaces and tabs",
            Transform::Indentation => "re-indent lines with the reference's indentation unit",
            Transform::LineEndings => "convert line breaks to the reference's CRLF or LF",
        }
    }

    /// Rewrite `text` toward `reference`
    pub fn apply(self, text: &str, reference: &str, context: &TransformContext<'_>) -> String {
        match self {
            Transform::Quotes => normalize_quotes(text, reference),
            Transform::Semicolons => normalize_semicolons(text, reference),
            Transform::Whitespace => normalize_whitespace(text),
            Transform::Indentation => {
                normalize_indentation(text, reference, context.original, context.tab_width)
            }
            Transform::LineEndings => normalize_line_endings(text, reference),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Transform::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("Unknown transform: {s}"))
    }
}

/// Split a line into its content and its terminator (`\n`, `\r\n` or empty)
pub(crate) fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

#[inline]
pub(crate) fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}
