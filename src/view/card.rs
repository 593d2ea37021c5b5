//! Timeline card renderer.
//!
//! A card is the visual element painted over one entry's lines:
//!
//! ```text
//! │ 09:00  Standup  @ Room 4
//! │        with Anna, Tom
//! │        Weekly sync
//! ```
//!
//! Cards compare equal when their raw text is equal: everything a card
//! shows is derived from that text, so an equal card never needs to be
//! rendered again.

use super::styles::CardStyles;
use crate::model::{LineSpan, Participant, TextRange, TimelineEntry};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

const GUTTER: &str = "│ ";
/// Indent of continuation rows, aligned under the title.
const CONTINUATION_INDENT: &str = "       ";
const PARTICIPANT_PREFIX: &str = "with ";
const PARTICIPANT_SEPARATOR: &str = ", ";
const PLACEHOLDER_TEXT: &str = "+ Start your timeline: type \"09:00 Title\" to add the first entry";

/// Part of a card under a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardTarget {
    /// Anywhere that is not a participant name.
    Body,
    /// The participant at this index.
    Participant(usize),
}

/// Renderable snapshot of one entry.
#[derive(Debug, Clone)]
pub struct TimelineCard {
    /// Replaced text range.
    pub range: TextRange,
    /// Replaced lines.
    pub lines: LineSpan,
    /// Where the head text starts in the document.
    pub head_offset: usize,
    /// `NN:NN` label.
    pub time: String,
    /// Title row text.
    pub title: String,
    /// Location text shown after the title.
    pub location_text: String,
    /// Participant names.
    pub participants: Vec<Participant>,
    /// Body rows.
    pub body_lines: Vec<String>,
    /// Equality key.
    pub raw_text: String,
}

impl PartialEq for TimelineCard {
    fn eq(&self, other: &Self) -> bool {
        self.raw_text == other.raw_text
    }
}

impl Eq for TimelineCard {}

impl TimelineCard {
    /// Snapshot an entry.
    pub fn from_entry(entry: &TimelineEntry) -> Self {
        Self {
            range: entry.range,
            lines: entry.lines,
            head_offset: entry.head_offset,
            time: entry.time.clone(),
            title: entry.title.clone(),
            location_text: entry.location_text.clone(),
            participants: entry.participants.clone(),
            body_lines: entry.body_lines.clone(),
            raw_text: entry.raw_text.clone(),
        }
    }

    /// Number of terminal rows the card occupies.
    pub fn height(&self) -> usize {
        1 + usize::from(!self.participants.is_empty()) + self.body_lines.len()
    }

    /// Card row that shows document `line`.
    ///
    /// The header line is row 0; body lines follow the participant row.
    /// Lines outside the card clamp to its first or last row.
    pub fn row_of_line(&self, line: usize) -> usize {
        if line <= self.lines.first {
            return 0;
        }
        let body_row = line - self.lines.first + usize::from(!self.participants.is_empty());
        body_row.min(self.height() - 1)
    }

    /// Row holding the participant names, if any.
    fn participant_row(&self) -> Option<usize> {
        (!self.participants.is_empty()).then_some(1)
    }

    /// Render the card to styled lines.
    pub fn render_lines(&self, styles: &CardStyles, focused: bool) -> Vec<Line<'static>> {
        let gutter_style = if focused {
            styles.focused_gutter
        } else {
            styles.gutter
        };
        let gutter = || Span::styled(GUTTER, gutter_style);

        let mut lines = Vec::with_capacity(self.height());

        let mut header = vec![
            gutter(),
            Span::styled(self.time.clone(), styles.time),
            Span::raw("  "),
            Span::styled(self.title.clone(), styles.title),
        ];
        if !self.location_text.is_empty() && self.location_text != self.title {
            header.push(Span::raw("  "));
            header.push(Span::styled(self.location_text.clone(), styles.location));
        }
        lines.push(Line::from(header));

        if !self.participants.is_empty() {
            let mut row = vec![
                gutter(),
                Span::raw(CONTINUATION_INDENT),
                Span::styled(PARTICIPANT_PREFIX, styles.location),
            ];
            for (i, participant) in self.participants.iter().enumerate() {
                if i > 0 {
                    row.push(Span::raw(PARTICIPANT_SEPARATOR));
                }
                row.push(Span::styled(
                    participant.display_name.clone(),
                    styles.participant,
                ));
            }
            lines.push(Line::from(row));
        }

        for body in &self.body_lines {
            lines.push(Line::from(vec![
                gutter(),
                Span::raw(CONTINUATION_INDENT),
                Span::styled(body.clone(), styles.body),
            ]));
        }

        lines
    }

    /// Column spans `[start, end)` of each participant name on its row.
    pub fn participant_columns(&self) -> Vec<(usize, usize)> {
        let mut column = GUTTER.width() + CONTINUATION_INDENT.len() + PARTICIPANT_PREFIX.len();
        self.participants
            .iter()
            .enumerate()
            .map(|(i, participant)| {
                if i > 0 {
                    column += PARTICIPANT_SEPARATOR.len();
                }
                let start = column;
                column += participant.display_name.width();
                (start, column)
            })
            .collect()
    }

    /// Map a cell inside the card to the part under it.
    ///
    /// Rows and columns are relative to the card's top-left corner.
    pub fn hit(&self, row: usize, column: usize) -> CardTarget {
        if self.participant_row() != Some(row) {
            return CardTarget::Body;
        }
        self.participant_columns()
            .iter()
            .position(|&(start, end)| start <= column && column < end)
            .map_or(CardTarget::Body, CardTarget::Participant)
    }
}

/// The single prompt shown in place of cards when the note is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaceholderCard;

impl PlaceholderCard {
    /// Rows the prompt occupies.
    pub const HEIGHT: usize = 1;

    /// Render the prompt.
    pub fn render_line(&self, styles: &CardStyles) -> Line<'static> {
        Line::from(Span::styled(PLACEHOLDER_TEXT, styles.placeholder))
    }
}
