//! Text splitting.
//!
//! Partitions text into an ordered list of segments under one of three
//! criteria:
//!
//! - **Lines**: split on `\n`, group `count` lines, rejoin with `\n`
//! - **Words**: split on the space character only, group `count` words,
//!   rejoin with a single space
//! - **SizeKB**: accumulate characters until the next one would exceed
//!   `count * 1024` units
//!
//! The default unit is one Unicode scalar value, not one UTF-16 code unit:
//! a character outside the Basic Multilingual Plane such as an emoji counts
//! once, so 1024 emoji fit in a single 1 KB segment.
//!
//! Splitting is pure: the same text and criteria always give the same
//! segments, in source order.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Units per kilobyte for the size criterion.
pub const UNITS_PER_KB: usize = 1024;

/// Rule and bound controlling how text is partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitCriteria {
    /// At most `count` lines per segment
    Lines(NonZeroUsize),
    /// At most `count` space-separated words per segment
    Words(NonZeroUsize),
    /// At most `count * 1024` units per segment
    SizeKB(NonZeroUsize),
}

impl SplitCriteria {
    /// Lines criterion; zero is rejected.
    pub fn lines(count: usize) -> Result<Self> {
        Ok(SplitCriteria::Lines(positive(count)?))
    }

    /// Words criterion; zero is rejected.
    pub fn words(count: usize) -> Result<Self> {
        Ok(SplitCriteria::Words(positive(count)?))
    }

    /// Size criterion in kilobytes; zero is rejected.
    pub fn size_kb(count: usize) -> Result<Self> {
        Ok(SplitCriteria::SizeKB(positive(count)?))
    }

    /// Build criteria from a kind name and a raw user value.
    ///
    /// Kinds: `lines`, `words`, `size` (or `size-kb`, `kb`). Zero and
    /// negative values are invalid input.
    pub fn from_parts(kind: &str, value: i64) -> Result<Self> {
        let count = usize::try_from(value)
            .map_err(|_| Error::InvalidCriteria(format!("count must be positive, got {}", value)))?;
        match kind.trim().to_ascii_lowercase().as_str() {
            "lines" | "line" => Self::lines(count),
            "words" | "word" => Self::words(count),
            "size" | "size-kb" | "sizekb" | "kb" => Self::size_kb(count),
            other => Err(Error::InvalidCriteria(format!("unknown criteria kind '{}'", other))),
        }
    }

    /// The numeric bound.
    pub fn count(&self) -> usize {
        match self {
            SplitCriteria::Lines(n) | SplitCriteria::Words(n) | SplitCriteria::SizeKB(n) => {
                n.get()
            },
        }
    }

    /// Kind name, as accepted by [`SplitCriteria::from_parts`].
    pub fn kind(&self) -> &'static str {
        match self {
            SplitCriteria::Lines(_) => "lines",
            SplitCriteria::Words(_) => "words",
            SplitCriteria::SizeKB(_) => "size",
        }
    }
}

fn positive(count: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(count)
        .ok_or_else(|| Error::InvalidCriteria("count must be positive, got 0".to_string()))
}

impl fmt::Display for SplitCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.count())
    }
}

impl FromStr for SplitCriteria {
    type Err = Error;

    /// Parse `"<kind>:<count>"`, e.g. `lines:10` or `size:2`.
    fn from_str(s: &str) -> Result<Self> {
        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidCriteria(format!("expected <kind>:<count>, got '{}'", s)))?;
        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCriteria(format!("'{}' is not a number", value.trim())))?;
        Self::from_parts(kind, value)
    }
}

/// How the size criterion measures a segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMeasure {
    /// Count characters (Unicode scalar values, not UTF-16 code units)
    #[default]
    Chars,
    /// Count UTF-8 encoded bytes
    Bytes,
}

impl SizeMeasure {
    fn units(&self, c: char) -> usize {
        match self {
            SizeMeasure::Chars => 1,
            SizeMeasure::Bytes => c.len_utf8(),
        }
    }
}

/// Ordered segments produced by a split.
pub type SplitResult = Vec<String>;

/// Text splitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSplitter {
    measure: SizeMeasure,
}

impl TextSplitter {
    /// Create a splitter that measures size in characters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter with an explicit size measure.
    pub fn with_measure(measure: SizeMeasure) -> Self {
        Self { measure }
    }

    /// Split `text` according to `criteria`.
    pub fn split(&self, text: &str, criteria: SplitCriteria) -> SplitResult {
        let segments = match criteria {
            SplitCriteria::Lines(n) => split_by_lines(text, n.get()),
            SplitCriteria::Words(n) => split_by_words(text, n.get()),
            SplitCriteria::SizeKB(n) => {
                split_by_budget(text, n.get().saturating_mul(UNITS_PER_KB), self.measure)
            },
        };
        log::debug!("Split {} units by {} into {} segments", text.len(), criteria, segments.len());
        segments
    }
}

/// Split with the default (character) size measure.
pub fn split(text: &str, criteria: SplitCriteria) -> SplitResult {
    TextSplitter::new().split(text, criteria)
}

/// Group `\n`-separated lines into segments of at most `per_segment` lines.
///
/// Empty lines are kept; empty text yields a single empty segment.
pub fn split_by_lines(text: &str, per_segment: usize) -> SplitResult {
    group(text.split('\n'), per_segment, "\n")
}

/// Group space-separated words into segments of at most `per_segment` words.
///
/// Only U+0020 separates words; tabs and newlines stay inside words.
pub fn split_by_words(text: &str, per_segment: usize) -> SplitResult {
    group(text.split(' '), per_segment, " ")
}

fn group<'a>(pieces: impl Iterator<Item = &'a str>, per_segment: usize, sep: &str) -> SplitResult {
    let per_segment = per_segment.max(1);
    let pieces: Vec<&str> = pieces.collect();
    pieces.chunks(per_segment).map(|chunk| chunk.join(sep)).collect()
}

/// Accumulate characters into segments of at most `budget` units.
///
/// The budget is checked before each append, so characters are never split
/// and a single character wider than the budget gets a segment of its own.
/// No empty segment is produced; empty text yields no segments.
pub fn split_by_budget(text: &str, budget: usize, measure: SizeMeasure) -> SplitResult {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut used = 0usize;

    for c in text.chars() {
        let units = measure.units(c);
        if used + units > budget && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += units;
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}
