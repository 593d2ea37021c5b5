//! Offset and line interval newtypes.

use serde::Serialize;
use std::fmt;

/// Half-open byte range `[start, end)` into the document text.
///
/// # Invariants
/// - `start <= end`
/// - Both ends fall on UTF-8 char boundaries of the document they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct TextRange {
    /// First byte offset (inclusive).
    pub start: usize,
    /// Last byte offset (exclusive).
    pub end: usize,
}

impl TextRange {
    /// Create a new range.
    ///
    /// # Panics
    /// In debug builds, panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "TextRange start {start} > end {end}");
        Self { start, end }
    }

    /// Zero-width range at `offset` (a caret).
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the range is zero-width.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check whether `offset` falls inside the half-open range.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Check whether two ranges touch or overlap.
    ///
    /// Both ends are inclusive: a caret sitting exactly at `start` or `end`
    /// counts as intersecting. Selections use this so that a caret placed at
    /// either edge of an entry reveals its raw text.
    pub fn intersects(&self, other: &TextRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Check whether two ranges share at least one byte.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check whether a selection range touches this range.
    ///
    /// A caret counts at either edge ([`intersects`](Self::intersects)); a
    /// non-empty selection must share a byte ([`overlaps`](Self::overlaps)).
    pub fn is_touched_by(&self, selection: &TextRange) -> bool {
        if selection.is_empty() {
            self.intersects(selection)
        } else {
            self.overlaps(selection)
        }
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Inclusive span of document lines covered by one entry. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineSpan {
    /// Header line index.
    pub first: usize,
    /// Last line belonging to the entry (inclusive).
    pub last: usize,
}

impl LineSpan {
    /// Create a new span.
    ///
    /// # Panics
    /// In debug builds, panics if `first > last`.
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last, "LineSpan first {first} > last {last}");
        Self { first, last }
    }

    /// Number of lines in the span.
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// Spans always cover at least the header line.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a line index belongs to the span.
    pub fn contains(&self, line: usize) -> bool {
        self.first <= line && line <= self.last
    }
}
