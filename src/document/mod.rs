//! Document text with line/offset addressing.
//!
//! A `Document` is the host's view of the note: the full UTF-8 text plus a
//! line-start index. Offsets are byte offsets; lines are 0-indexed and never
//! include their `\n` (or a trailing `\r`).

use crate::model::TextRange;

/// Note text plus an index of line start offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    text: String,
    line_starts: Vec<usize>,
}

impl Document {
    /// Build a document from text.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = index_lines(&text);
        Self { text, line_starts }
    }

    /// Full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the document has no text at all.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the document contains nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of lines. An empty document has one empty line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset where `line` starts.
    ///
    /// Lines past the end clamp to the document length.
    pub fn line_start(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .copied()
            .unwrap_or(self.text.len())
    }

    /// Byte offset where `line`'s content ends (before `\r\n` or `\n`).
    pub fn line_end(&self, line: usize) -> usize {
        self.line_start(line) + self.line(line).len()
    }

    /// Text of `line` without its line terminator. Empty past the end.
    pub fn line(&self, line: usize) -> &str {
        let Some(&start) = self.line_starts.get(line) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        let raw = &self.text[start..end];
        raw.strip_suffix('\r').unwrap_or(raw)
    }

    /// Iterate over `(index, text)` for every line.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        (0..self.line_count()).map(move |i| (i, self.line(i)))
    }

    /// Line containing `offset`. Offsets past the end map to the last line.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insert_at) => insert_at.saturating_sub(1),
        }
    }

    /// Byte range covering lines `first..=last`, excluding the final terminator.
    pub fn line_range(&self, first: usize, last: usize) -> TextRange {
        TextRange::new(self.line_start(first), self.line_end(last))
    }

    /// Replace `range` with `insert`, rebuilding the line index.
    ///
    /// This is the single text mutation primitive. Anything that edits the note,
    /// including external tools driving the host, goes through here.
    ///
    /// # Panics
    /// Panics if the range is out of bounds or not on char boundaries, like
    /// `String::replace_range`.
    pub fn replace(&mut self, range: TextRange, insert: &str) {
        self.text.replace_range(range.start..range.end, insert);
        self.line_starts = index_lines(&self.text);
    }
}

fn index_lines(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}
