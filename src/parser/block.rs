//! Entry block assembly: which lines belong to a header.

use super::{is_header_line, is_section_heading};
use crate::document::Document;

/// Default bound for the backward search in [`find_owning_header`].
pub const DEFAULT_MAX_LOOKBACK: usize = 50;

/// Extent of one entry in document lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Line holding the time label.
    pub header_line: usize,
    /// Last line belonging to the entry (inclusive).
    pub last_line: usize,
    /// Continuation lines, dedented by one level. Blank separators are `""`.
    pub body_lines: Vec<String>,
}

/// Collect the body of the entry whose header sits on `header_line`.
///
/// Scans forward from the next line:
/// - another header or a `##` heading closes the block (exclusive);
/// - a blank line is kept as a separator;
/// - an indented line is dedented by one level and kept;
/// - anything else closes the block (exclusive).
///
/// Blank lines trailing the block are not part of it, so the entry ends on
/// its last non-blank line.
pub fn assemble_block(doc: &Document, header_line: usize) -> Block {
    let mut body_lines = Vec::new();
    let mut last_line = header_line;
    let mut pending_blanks = 0usize;
    let mut indent_unit: Option<usize> = None;

    for line_index in header_line + 1..doc.line_count() {
        let line = doc.line(line_index);

        if is_header_line(line) || is_section_heading(line) {
            break;
        }

        if line.trim().is_empty() {
            pending_blanks += 1;
            continue;
        }

        let indent = leading_whitespace_chars(line);
        if indent == 0 {
            break;
        }

        let unit = *indent_unit.get_or_insert(indent);
        body_lines.extend(std::iter::repeat_n(String::new(), pending_blanks));
        pending_blanks = 0;
        body_lines.push(strip_indent(line, unit).to_string());
        last_line = line_index;
    }

    Block {
        header_line,
        last_line,
        body_lines,
    }
}

/// Find the header whose block covers `line`, looking back at most `max_lookback` lines.
///
/// Returns `line` itself when it is a header. Returns `None` when no header
/// lies within the bound, or when the nearest header's block ends before
/// `line` (the line is loose text between entries).
pub fn find_owning_header(doc: &Document, line: usize, max_lookback: usize) -> Option<usize> {
    if line >= doc.line_count() {
        return None;
    }
    if is_header_line(doc.line(line)) {
        return Some(line);
    }

    let floor = line.saturating_sub(max_lookback);
    let header = (floor..line)
        .rev()
        .find(|&candidate| is_header_line(doc.line(candidate)))?;

    let block = assemble_block(doc, header);
    (block.last_line >= line).then_some(header)
}

/// Number of whitespace chars at the start of the line.
fn leading_whitespace_chars(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Drop at most `unit` leading whitespace chars.
fn strip_indent(line: &str, unit: usize) -> &str {
    let cut = line
        .char_indices()
        .take_while(|(_, c)| c.is_whitespace())
        .take(unit)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &line[cut..]
}
