//! Visible line interval reported by the viewport.

/// Half-open range of document lines currently rendered by the viewport.
///
/// A host may report several of these at once (folds, split views), and they
/// may overlap at the edges. The scanner clamps and deduplicates them.
///
/// # Invariants
/// - `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LineRange {
    /// First visible line (inclusive).
    pub start: usize,
    /// Line after the last visible line (exclusive).
    pub end: usize,
}

impl LineRange {
    /// Create new visible range.
    ///
    /// # Panics
    /// In debug builds, panics if start > end.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "LineRange start {start} > end {end}");
        Self { start, end }
    }

    /// Number of visible lines.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Iterate over visible line indices.
    pub fn lines(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Check if a specific line is visible.
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line < self.end
    }

    /// Clamp the range to a document with `line_count` lines.
    pub fn clamp_to(&self, line_count: usize) -> Self {
        let end = self.end.min(line_count);
        Self {
            start: self.start.min(end),
            end,
        }
    }
}
