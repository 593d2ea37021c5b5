//! Timeline entry: one time-labelled record and its body.

use super::range::{LineSpan, TextRange};
use serde::Serialize;

/// A bracketed `[[target]]` or `[[target|display]]` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WikiLink {
    /// Link target as written (may contain `/` path segments).
    pub target: String,
    /// Display text: the `|` override, or the last path segment of `target`.
    pub display: String,
    /// Byte range of the full `[[...]]` syntax inside the head text.
    #[serde(skip)]
    pub span: std::ops::Range<usize>,
}

/// A person (or anything linked) listed after the ` with ` delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Participant {
    /// Link target as written.
    pub link_target: String,
    /// Name shown on the card.
    pub display_name: String,
}

impl From<&WikiLink> for Participant {
    fn from(link: &WikiLink) -> Self {
        Self {
            link_target: link.target.clone(),
            display_name: link.display.clone(),
        }
    }
}

/// One timeline entry recognized in the document.
///
/// Derived from text on every scan and discarded afterwards. All fields
/// except `range`, `lines` and `head_offset` are pure functions of the
/// entry's lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    /// Byte range from the header line start to the end of the last line.
    pub range: TextRange,
    /// Header and last line indices.
    pub lines: LineSpan,
    /// `NN:NN` label. Not calendar-validated.
    pub time: String,
    /// Header remainder after the time label.
    pub head_text: String,
    /// Absolute document offset where `head_text` begins.
    pub head_offset: usize,
    /// First wiki link in the head, if any.
    pub primary_link: Option<WikiLink>,
    /// Title shown on the card.
    pub title: String,
    /// Free text left over after removing the primary link and participants.
    pub location_text: String,
    /// Linked participants in document order, duplicates preserved.
    pub participants: Vec<Participant>,
    /// Continuation lines with one indentation level stripped.
    pub body_lines: Vec<String>,
    /// Header plus body lines, used as the render memoization key.
    pub raw_text: String,
}

impl TimelineEntry {
    /// Number of document lines the entry covers.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check whether the entry has any participants.
    pub fn has_participants(&self) -> bool {
        !self.participants.is_empty()
    }
}
