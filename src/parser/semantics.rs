//! Title, location and participants derived from header text.
//!
//! Pure string functions. Links are never resolved: a `[[target]]` is only
//! split into its target and display text.

use crate::model::{Participant, WikiLink};
use regex::Regex;
use std::sync::LazyLock;

/// Literal, case-sensitive delimiter introducing participants.
///
/// Alternate phrasings ("w/", "mit", "avec") are not recognized.
pub const PARTICIPANT_DELIMITER: &str = " with ";

static WIKI_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]|]+)(?:\|([^\[\]]*))?\]\]").expect("wiki link pattern is valid")
});

/// Trailing `~token` used to hide an opaque identifier in link text.
static OPAQUE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*~[^\s~]+$").expect("suffix pattern is valid"));

/// Everything the card shows that comes from the header text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntrySemantics {
    /// First wiki link in the head.
    pub primary_link: Option<WikiLink>,
    /// Card title.
    pub title: String,
    /// Remaining free text (a room, a place, a note).
    pub location_text: String,
    /// Links after the participant delimiter, in order.
    pub participants: Vec<Participant>,
}

impl EntrySemantics {
    /// Derive semantics from the head text of one header line.
    ///
    /// # Examples
    ///
    /// ```
    /// use dayline::parser::EntrySemantics;
    ///
    /// let s = EntrySemantics::extract("[[Standup]] with [[Anna]], [[Tom]]");
    /// assert_eq!(s.title, "Standup");
    /// assert_eq!(s.participants.len(), 2);
    /// assert_eq!(s.location_text, "");
    /// ```
    pub fn extract(head: &str) -> Self {
        let links = wiki_links(head);
        let delimiter = find_delimiter(head, &links);
        let kept_end = delimiter.unwrap_or(head.len());

        let participants = match delimiter {
            Some(at) => {
                let after = at + PARTICIPANT_DELIMITER.len();
                links
                    .iter()
                    .filter(|link| link.span.start >= after)
                    .map(Participant::from)
                    .collect()
            }
            None => Vec::new(),
        };

        let primary_link = links.into_iter().next();

        let title = match &primary_link {
            Some(link) => strip_opaque_suffix(&link.display).to_string(),
            None => flatten_links(&head[..kept_end]).trim().to_string(),
        };

        let mut kept = head[..kept_end].to_string();
        if let Some(link) = primary_link.as_ref().filter(|l| l.span.end <= kept_end) {
            kept.replace_range(link.span.clone(), "");
        }
        let location_text = flatten_links(&kept).trim().to_string();

        Self {
            primary_link,
            title,
            location_text,
            participants,
        }
    }
}

/// All wiki links in `text`, in order.
pub fn wiki_links(text: &str) -> Vec<WikiLink> {
    WIKI_LINK
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let target = caps.get(1)?.as_str().trim().to_string();
            let display = match caps.get(2) {
                Some(display) if !display.as_str().trim().is_empty() => {
                    display.as_str().trim().to_string()
                }
                _ => last_path_segment(&target).to_string(),
            };
            Some(WikiLink {
                target,
                display,
                span: whole.range(),
            })
        })
        .collect()
}

/// Replace every wiki link with its display text.
pub fn flatten_links(text: &str) -> String {
    WIKI_LINK
        .replace_all(text, |caps: &regex::Captures<'_>| {
            match caps.get(2) {
                Some(display) if !display.as_str().trim().is_empty() => {
                    display.as_str().trim().to_string()
                }
                _ => last_path_segment(caps[1].trim()).to_string(),
            }
        })
        .into_owned()
}

/// Remove a trailing `~token` and the whitespace before it.
pub fn strip_opaque_suffix(text: &str) -> &str {
    match OPAQUE_SUFFIX.find(text) {
        Some(found) => &text[..found.start()],
        None => text,
    }
}

fn last_path_segment(target: &str) -> &str {
    target.rsplit('/').next().unwrap_or(target)
}

/// First delimiter occurrence that does not sit inside a link.
fn find_delimiter(head: &str, links: &[WikiLink]) -> Option<usize> {
    head.match_indices(PARTICIPANT_DELIMITER)
        .map(|(at, _)| at)
        .find(|&at| {
            !links
                .iter()
                .any(|link| link.span.start < at && at < link.span.end)
        })
}
