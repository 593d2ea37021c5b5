//! Timeline line grammar.
//!
//! This module provides pure functions that recognize a single line as a
//! timeline header. Grouping lines into entries lives in [`block`]; turning
//! header text into titles and participants lives in [`semantics`].
//!
//! Grammar of a header line:
//!
//! ```text
//! [whitespace] [("-" | "*" | "+") whitespace+] DD ":" DD " "+ head
//! ```
//!
//! `D` is one ASCII digit. Digit values are not range-checked: `99:99` is a
//! valid label. Whether a label names a real time of day is not this layer's
//! concern.

pub mod block;
pub mod semantics;

pub use block::{assemble_block, find_owning_header, Block};
pub use semantics::EntrySemantics;

/// Length of an `NN:NN` label in bytes.
const TIME_LABEL_LEN: usize = 5;

/// A line recognized as a timeline header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// The `NN:NN` label.
    pub time: &'a str,
    /// Everything after the label and its separating spaces. May be empty.
    pub head: &'a str,
    /// Byte offset of `head` within the line.
    pub head_column: usize,
}

/// Parse a single line as a timeline header.
///
/// Returns `None` for anything that does not match the grammar. Never fails
/// otherwise: malformed-but-parseable labels such as `25:99` are accepted.
///
/// # Examples
///
/// ```
/// use dayline::parser::parse_header_line;
///
/// let header = parse_header_line("- 09:00 [[Standup]]").unwrap();
/// assert_eq!(header.time, "09:00");
/// assert_eq!(header.head, "[[Standup]]");
///
/// assert!(parse_header_line("AB:CD hello").is_none());
/// ```
pub fn parse_header_line(line: &str) -> Option<HeaderMatch<'_>> {
    let mut pos = skip_whitespace(line, 0);
    pos = skip_list_marker(line, pos);

    let label = line.get(pos..pos + TIME_LABEL_LEN)?;
    if !is_time_label(label) {
        return None;
    }
    let after_label = pos + TIME_LABEL_LEN;

    let spaces = line[after_label..]
        .bytes()
        .take_while(|&b| b == b' ')
        .count();
    if spaces == 0 {
        return None;
    }
    let head_column = after_label + spaces;

    Some(HeaderMatch {
        time: label,
        head: &line[head_column..],
        head_column,
    })
}

/// Check whether a line is a timeline header.
pub fn is_header_line(line: &str) -> bool {
    parse_header_line(line).is_some()
}

/// Check whether a line is a second-level markdown heading (`## ...`).
///
/// Such headings close any open entry block.
pub fn is_section_heading(line: &str) -> bool {
    match line.strip_prefix("##") {
        Some(rest) => rest.is_empty() || rest.starts_with([' ', '\t']),
        None => false,
    }
}

/// Serialize a header back to text in canonical form.
///
/// Leading indentation and list markers are not preserved.
pub fn format_header(time: &str, head: &str) -> String {
    format!("{time} {head}")
}

fn skip_whitespace(line: &str, from: usize) -> usize {
    from + line[from..]
        .bytes()
        .take_while(|b| b.is_ascii_whitespace())
        .count()
}

/// Skip a `-`, `*` or `+` marker followed by whitespace, if present.
fn skip_list_marker(line: &str, pos: usize) -> usize {
    let bytes = line.as_bytes();
    match bytes.get(pos) {
        Some(b'-' | b'*' | b'+') => {
            let after = skip_whitespace(line, pos + 1);
            if after > pos + 1 {
                after
            } else {
                pos
            }
        }
        _ => pos,
    }
}

fn is_time_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    bytes.len() == TIME_LABEL_LEN
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b':'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
}
