//! Visible-range scanner.
//!
//! Walks only the lines the viewport reports as visible and produces the
//! ordered, deduplicated entry list for them. Lines outside the visible
//! ranges are touched only by block assembly (forward, until the block
//! closes) and by the bounded reverse lookup for a range that opens
//! mid-entry.

use crate::document::Document;
use crate::model::{LineSpan, TimelineEntry};
use crate::parser::{self, assemble_block, find_owning_header, EntrySemantics};
use crate::view_state::LineRange;
use std::collections::HashSet;
use tracing::trace;

/// Build the entry whose header sits on `header_line`.
///
/// Returns `None` if the line is not a header.
pub fn build_entry(doc: &Document, header_line: usize) -> Option<TimelineEntry> {
    let line = doc.line(header_line);
    let header = parser::parse_header_line(line)?;
    let block = assemble_block(doc, header_line);
    let semantics = EntrySemantics::extract(header.head);

    let range = doc.line_range(block.header_line, block.last_line);
    let mut raw_text = line.to_string();
    for body in &block.body_lines {
        raw_text.push('\n');
        raw_text.push_str(body);
    }

    Some(TimelineEntry {
        range,
        lines: LineSpan::new(block.header_line, block.last_line),
        time: header.time.to_string(),
        head_text: header.head.to_string(),
        head_offset: doc.line_start(header_line) + header.head_column,
        primary_link: semantics.primary_link,
        title: semantics.title,
        location_text: semantics.location_text,
        participants: semantics.participants,
        body_lines: block.body_lines,
        raw_text,
    })
}

/// Scan the visible ranges of `doc` for timeline entries.
///
/// Every physical line is considered at most once across all ranges, even
/// when ranges overlap. A range that begins inside an entry's body recovers
/// that entry through a reverse lookup bounded by `max_lookback` lines.
///
/// The result is sorted by start offset and contains no overlapping ranges.
pub fn scan_visible(
    doc: &Document,
    ranges: &[LineRange],
    max_lookback: usize,
) -> Vec<TimelineEntry> {
    let line_count = doc.line_count();
    let mut sorted: Vec<LineRange> = ranges
        .iter()
        .map(|r| r.clamp_to(line_count))
        .filter(|r| !r.is_empty())
        .collect();
    sorted.sort();

    let mut seen_headers = HashSet::new();
    let mut entries = Vec::new();
    // Lines below this mark have already been examined.
    let mut next_unseen = 0usize;

    for range in sorted {
        let mut line = range.start.max(next_unseen);
        if line >= range.end {
            continue;
        }

        if let Some(header) = find_owning_header(doc, line, max_lookback) {
            if header < line {
                if let Some(entry) = build_entry(doc, header) {
                    line = entry.lines.last + 1;
                    if seen_headers.insert(header) {
                        entries.push(entry);
                    }
                }
            }
        }

        while line < range.end {
            match build_entry(doc, line) {
                Some(entry) => {
                    line = entry.lines.last + 1;
                    if seen_headers.insert(entry.lines.first) {
                        entries.push(entry);
                    }
                }
                None => line += 1,
            }
        }

        next_unseen = next_unseen.max(line);
    }

    entries.sort_by_key(|entry| entry.range.start);
    trace!(entries = entries.len(), "scanned visible ranges");
    entries
}

/// Scan the whole document.
pub fn scan_document(doc: &Document, max_lookback: usize) -> Vec<TimelineEntry> {
    scan_visible(doc, &[LineRange::new(0, doc.line_count())], max_lookback)
}
