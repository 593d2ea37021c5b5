//! Display row layout.
//!
//! Pure layout logic: turns the visible document lines plus the applied
//! decorations into the rows the terminal shows, and maps terminal cells
//! back to document offsets or card parts.
//!
//! A card replaces all of its entry's lines and occupies
//! [`TimelineCard::height`] rows instead. The placeholder is zero-width and
//! occupies one extra row above line 0.

use crate::document::Document;
use crate::overlay::DecorationSet;
use crate::view::card::{CardTarget, PlaceholderCard, TimelineCard};
use crate::view::styles::CardStyles;
use crate::view_state::{CardCache, LineRange};
use ratatui::text::Line;
use unicode_width::UnicodeWidthChar;

/// One terminal row of the document area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRow {
    /// A raw text line.
    Text {
        /// Document line.
        line: usize,
    },
    /// One row of a card.
    Card {
        /// Decoration index of the card.
        decoration: usize,
        /// Row within the card.
        row: usize,
    },
    /// The empty-note prompt.
    Placeholder,
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHit {
    /// Raw text, resolved to a byte offset.
    Text {
        /// Caret offset for the click.
        offset: usize,
    },
    /// Part of a card.
    Card {
        /// Decoration index of the card.
        decoration: usize,
        /// Card part under the pointer.
        target: CardTarget,
    },
    /// The placeholder prompt.
    Placeholder,
    /// Below the last row.
    Miss,
}

/// Lay out at most `height` rows starting at document line `scroll_top`.
///
/// Decorations that no longer fit the document (applied before the latest
/// edit reached the scheduler) are skipped and their lines shown raw.
pub fn layout_rows(
    doc: &Document,
    overlay: &DecorationSet,
    scroll_top: usize,
    height: usize,
) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(height);
    if height == 0 {
        return rows;
    }

    if scroll_top == 0 && overlay.has_placeholder() {
        rows.push(DisplayRow::Placeholder);
    }

    let line_count = doc.line_count();
    let mut cards = overlay
        .cards()
        .filter(|(_, card)| fits(doc, card))
        .peekable();
    let mut line = scroll_top;

    while line < line_count && rows.len() < height {
        while cards.next_if(|(_, card)| card.lines.last < line).is_some() {}

        match cards.next_if(|(_, card)| card.lines.first <= line) {
            Some((decoration, card)) => {
                // A card cut by the top edge starts at the row showing `line`.
                for row in card.row_of_line(line)..card.height() {
                    if rows.len() == height {
                        break;
                    }
                    rows.push(DisplayRow::Card { decoration, row });
                }
                line = card.lines.last + 1;
            }
            None => {
                rows.push(DisplayRow::Text { line });
                line += 1;
            }
        }
    }

    rows
}

/// Document lines that got at least one row.
///
/// A card counts with all of its lines even when the viewport cuts it.
pub fn laid_out_lines(
    rows: &[DisplayRow],
    overlay: &DecorationSet,
    scroll_top: usize,
) -> LineRange {
    let end = rows
        .iter()
        .filter_map(|row| match *row {
            DisplayRow::Text { line } => Some(line + 1),
            DisplayRow::Card { decoration, .. } => overlay
                .get(decoration)
                .and_then(|d| d.card())
                .map(|card| card.lines.last + 1),
            DisplayRow::Placeholder => None,
        })
        .max()
        .unwrap_or(scroll_top);
    LineRange::new(scroll_top, end.max(scroll_top))
}

/// Smallest scroll position at or after `scroll_top` that shows `line` as
/// a raw text row within `height` rows.
///
/// A `line` above `scroll_top` scrolls up to it. If a card still covers the
/// line, the result is the line itself so the card's row is on screen.
pub fn scroll_to_reveal(
    doc: &Document,
    overlay: &DecorationSet,
    scroll_top: usize,
    height: usize,
    line: usize,
) -> usize {
    let mut top = scroll_top.min(line);
    while top < line
        && !layout_rows(doc, overlay, top, height).contains(&DisplayRow::Text { line })
    {
        top += 1;
    }
    top
}

fn fits(doc: &Document, card: &TimelineCard) -> bool {
    card.lines.last < doc.line_count()
        && card.range.end <= doc.len()
        && card.range.start == doc.line_start(card.lines.first)
}

/// Map a cell to what it shows.
pub fn hit_test(
    rows: &[DisplayRow],
    doc: &Document,
    overlay: &DecorationSet,
    column: u16,
    row: u16,
) -> RowHit {
    let Some(display_row) = rows.get(usize::from(row)) else {
        return RowHit::Miss;
    };
    match *display_row {
        DisplayRow::Text { line } => RowHit::Text {
            offset: offset_at_column(doc, line, usize::from(column)),
        },
        DisplayRow::Card { decoration, row } => {
            let target = overlay
                .get(decoration)
                .and_then(|d| d.card())
                .map_or(CardTarget::Body, |card| card.hit(row, usize::from(column)));
            RowHit::Card { decoration, target }
        }
        DisplayRow::Placeholder => RowHit::Placeholder,
    }
}

/// Byte offset of the char drawn at display `column` of `line`.
///
/// Columns past the end of the line map to the line end.
pub fn offset_at_column(doc: &Document, line: usize, column: usize) -> usize {
    let text = doc.line(line);
    let mut width = 0;
    for (i, c) in text.char_indices() {
        let w = display_width(c);
        if column < width + w {
            return doc.line_start(line) + i;
        }
        width += w;
    }
    doc.line_start(line) + text.len()
}

/// Terminal cell `(column, row)` of the caret, if its line is shown raw.
pub fn caret_position(rows: &[DisplayRow], doc: &Document, cursor: usize) -> Option<(u16, u16)> {
    let line = doc.line_of_offset(cursor);
    let row = rows
        .iter()
        .position(|r| *r == DisplayRow::Text { line })?;
    let line_start = doc.line_start(line);
    let prefix = doc.text().get(line_start..cursor)?;
    let column: usize = prefix.chars().map(display_width).sum();
    Some((
        u16::try_from(column).unwrap_or(u16::MAX),
        u16::try_from(row).unwrap_or(u16::MAX),
    ))
}

/// Render laid-out rows to styled lines.
pub fn render_rows(
    rows: &[DisplayRow],
    doc: &Document,
    overlay: &DecorationSet,
    focused_card: Option<usize>,
    cache: &mut CardCache,
    styles: &CardStyles,
) -> Vec<Line<'static>> {
    rows.iter()
        .map(|row| match *row {
            DisplayRow::Text { line } => Line::raw(display_text(doc.line(line))),
            DisplayRow::Placeholder => PlaceholderCard.render_line(styles),
            DisplayRow::Card { decoration, row } => overlay
                .get(decoration)
                .and_then(|d| d.card())
                .and_then(|card| {
                    let focused = focused_card == Some(decoration);
                    cache.get_or_render(card, styles, focused).get(row).cloned()
                })
                .unwrap_or_default(),
        })
        .collect()
}

/// Tabs are drawn as a single space so display columns track chars.
fn display_text(line: &str) -> String {
    line.replace('\t', " ")
}

fn display_width(c: char) -> usize {
    if c == '\t' {
        1
    } else {
        c.width().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
