//! Decoration/overlay builder.
//!
//! Turns the scanned entries into the set of replacement instructions the
//! host paints over the text. The text itself is never modified.
//!
//! Two rules shape the set:
//! - an entry touched by any selection range is left out, so the caret can
//!   always reach the raw text;
//! - replacements are ascending and mutually non-overlapping, which is what
//!   the host's replace-region mechanism accepts. [`DecorationSetBuilder`]
//!   enforces it.

use crate::document::Document;
use crate::model::{OverlayError, TextRange, TimelineEntry};
use crate::view::card::TimelineCard;
use tracing::trace;

/// What a decoration paints in place of its range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecorationKind {
    /// A rendered entry card replacing the entry's lines.
    Card(TimelineCard),
    /// The "start your timeline" prompt for an empty note. Zero-width.
    Placeholder,
}

/// One replacement instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
    /// Replaced text range.
    pub range: TextRange,
    /// What to paint.
    pub kind: DecorationKind,
}

impl Decoration {
    /// The card, if this decoration is one.
    pub fn card(&self) -> Option<&TimelineCard> {
        match &self.kind {
            DecorationKind::Card(card) => Some(card),
            DecorationKind::Placeholder => None,
        }
    }

    /// Check if this is the empty-note placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, DecorationKind::Placeholder)
    }
}

/// Ordered, non-overlapping decorations.
///
/// Only [`DecorationSetBuilder`] can produce a non-empty set, so every value
/// of this type satisfies the ordering invariant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecorationSet {
    decorations: Vec<Decoration>,
}

impl DecorationSet {
    /// The empty set: no overlay at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of decorations.
    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    /// Check if the set paints nothing.
    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    /// Iterate in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Decoration> {
        self.decorations.iter()
    }

    /// Decoration at `index`.
    pub fn get(&self, index: usize) -> Option<&Decoration> {
        self.decorations.get(index)
    }

    /// Iterate over `(index, card)` for card decorations only.
    pub fn cards(&self) -> impl Iterator<Item = (usize, &TimelineCard)> + '_ {
        self.decorations
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.card().map(|card| (i, card)))
    }

    /// Check if the set is the empty-note placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.decorations.iter().any(Decoration::is_placeholder)
    }

    /// Index of the card whose range covers `offset`.
    pub fn card_at_offset(&self, offset: usize) -> Option<usize> {
        self.cards()
            .find(|(_, card)| card.range.start <= offset && offset <= card.range.end)
            .map(|(i, _)| i)
    }
}

impl<'a> IntoIterator for &'a DecorationSet {
    type Item = &'a Decoration;
    type IntoIter = std::slice::Iter<'a, Decoration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Accumulates decorations, rejecting anything out of document order.
#[derive(Debug)]
pub struct DecorationSetBuilder {
    doc_len: usize,
    decorations: Vec<Decoration>,
}

impl DecorationSetBuilder {
    /// Start a set for a document of `doc_len` bytes.
    pub fn new(doc_len: usize) -> Self {
        Self {
            doc_len,
            decorations: Vec::new(),
        }
    }

    /// Append a decoration.
    ///
    /// # Errors
    ///
    /// `OverlayError::OutOfOrder` if it starts before the previous decoration
    /// ends (zero-width decorations may share an offset with a following one).
    /// `OverlayError::OutOfBounds` if it reaches past the document end.
    pub fn push(&mut self, decoration: Decoration) -> Result<(), OverlayError> {
        let range = decoration.range;
        if range.end > self.doc_len {
            return Err(OverlayError::OutOfBounds {
                range: range.to_string(),
                doc_len: self.doc_len,
            });
        }
        if let Some(previous) = self.decorations.last() {
            let ordered = previous.range.end <= range.start
                && (previous.range.start < range.start || previous.range.is_empty());
            if !ordered {
                return Err(OverlayError::OutOfOrder {
                    range: range.to_string(),
                    previous_end: previous.range.end,
                });
            }
        }
        self.decorations.push(decoration);
        Ok(())
    }

    /// Finish the set.
    pub fn finish(self) -> DecorationSet {
        DecorationSet {
            decorations: self.decorations,
        }
    }
}

/// Build the decoration set for the current entries and selection.
///
/// Entries touched by any selection range are left out. A note with no
/// entries and no non-whitespace text gets exactly one placeholder.
///
/// # Errors
///
/// Propagates [`OverlayError`] if `entries` are not sorted and disjoint.
pub fn build_decorations(
    doc: &Document,
    entries: &[TimelineEntry],
    selection: &[TextRange],
) -> Result<DecorationSet, OverlayError> {
    let mut builder = DecorationSetBuilder::new(doc.len());

    if entries.is_empty() && doc.is_blank() {
        builder.push(Decoration {
            range: TextRange::caret(0),
            kind: DecorationKind::Placeholder,
        })?;
        return Ok(builder.finish());
    }

    let mut suppressed = 0usize;
    for entry in entries {
        if selection.iter().any(|sel| entry.range.is_touched_by(sel)) {
            suppressed += 1;
            continue;
        }
        builder.push(Decoration {
            range: entry.range,
            kind: DecorationKind::Card(TimelineCard::from_entry(entry)),
        })?;
    }

    let set = builder.finish();
    trace!(cards = set.len(), suppressed, "built decoration set");
    Ok(set)
}
