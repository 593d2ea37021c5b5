//! Position mapper.
//!
//! Translates an interaction with a rendered card back into a text offset:
//! activating a card puts the caret into its raw text, which in turn
//! removes the card on the next overlay update.

use crate::host::CursorSink;
use crate::overlay::DecorationSet;
use crate::view::card::{CardTarget, TimelineCard};
use tracing::debug;

/// Direction for keyboard card focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Toward the end of the document.
    Next,
    /// Toward the start of the document.
    Previous,
}

/// Result of activating part of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Where the caret was placed.
    pub offset: usize,
    /// Link target of the activated participant. Following it is up to the
    /// host.
    pub link_target: Option<String>,
}

/// Caret offset for an interaction with `target`.
///
/// The body anchors at the start of the head text, ready to edit the title.
/// A participant anchors at the start of the entry.
pub fn anchor_for(card: &TimelineCard, target: CardTarget) -> usize {
    match target {
        CardTarget::Body => card.head_offset,
        CardTarget::Participant(_) => card.range.start,
    }
}

/// Move the caret for an interaction with `target` and focus the text.
pub fn activate<C: CursorSink + ?Sized>(
    card: &TimelineCard,
    target: CardTarget,
    cursor: &mut C,
) -> Activation {
    let offset = anchor_for(card, target);
    cursor.move_cursor(offset);
    cursor.request_focus();

    let link_target = match target {
        CardTarget::Participant(i) => card.participants.get(i).map(|p| p.link_target.clone()),
        CardTarget::Body => None,
    };
    debug!(offset, ?target, "card activated");
    Activation {
        offset,
        link_target,
    }
}

/// Decoration index of the card adjacent to `current`.
///
/// With no current card, `Next` picks the first card and `Previous` the
/// last. Returns `None` when there is no card in that direction.
pub fn adjacent_card(
    set: &DecorationSet,
    current: Option<usize>,
    direction: FocusDirection,
) -> Option<usize> {
    let mut indices = set.cards().map(|(i, _)| i);
    match (direction, current) {
        (FocusDirection::Next, None) => indices.next(),
        (FocusDirection::Previous, None) => indices.last(),
        (FocusDirection::Next, Some(current)) => indices.find(|&i| i > current),
        (FocusDirection::Previous, Some(current)) => indices.filter(|&i| i < current).last(),
    }
}
