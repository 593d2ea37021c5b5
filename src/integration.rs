//! Pure core integration functions.
//!
//! Whole-document processing used by `--dump`. These functions do no
//! terminal I/O and are testable without an editor surface.

use crate::document::Document;
use crate::model::TimelineEntry;
use crate::scan;
use std::io::Write;

/// Parse every timeline entry in a note.
///
/// The identity check is skipped: a dump always reports what the text
/// contains, whatever file it came from.
pub fn process_document(text: &str, max_lookback: usize) -> Vec<TimelineEntry> {
    let doc = Document::new(text);
    scan::scan_document(&doc, max_lookback)
}

/// Serialize entries as JSON, one object per line.
///
/// # Errors
///
/// Returns the serializer error for the first entry that fails.
pub fn entries_to_json_lines(entries: &[TimelineEntry]) -> Result<Vec<String>, serde_json::Error> {
    entries.iter().map(serde_json::to_string).collect()
}

/// Write entries as JSON lines to `out`.
///
/// # Errors
///
/// Returns an I/O error if serialization or the write fails.
pub fn write_json_lines<W: Write>(entries: &[TimelineEntry], mut out: W) -> std::io::Result<()> {
    for line in entries_to_json_lines(entries)? {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
