//! Acceptance tests: editing around cards
//!
//! Cards never hide text the user is working on, and every burst of input
//! produces exactly one overlay update.

use crate::scheduler::ApplyOutcome;
use crate::test_harness::AcceptanceTestHarness;
use crate::view_state::LineRange;
use crossterm::event::{KeyCode, KeyModifiers};

const NOTE: &str = "# Monday\n09:00 [[Standup]] with [[Anna]], [[Tom]]\n13:00 Lunch";

fn row(harness: &AcceptanceTestHarness, index: usize) -> String {
    harness
        .screen()
        .lines()
        .nth(index)
        .unwrap_or_default()
        .to_string()
}

#[test]
fn caret_inside_entry_reveals_raw_text() {
    let mut harness = AcceptanceTestHarness::from_text(NOTE).unwrap();
    assert_eq!(row(&harness, 1), "│ 09:00  Standup");

    // WHEN: the caret moves onto the Standup line
    harness.send_key(KeyCode::Down);
    harness.tick().unwrap();

    // THEN: that entry is raw, the other stays a card
    assert_eq!(row(&harness, 1), "09:00 [[Standup]] with [[Anna]], [[Tom]]");
    assert_eq!(row(&harness, 2), "│ 13:00  Lunch");

    // WHEN: the caret leaves again
    harness.send_key(KeyCode::Up);
    harness.tick().unwrap();
    assert_eq!(row(&harness, 1), "│ 09:00  Standup");
}

#[test]
fn caret_at_entry_end_counts_as_inside() {
    let mut harness = AcceptanceTestHarness::from_text(NOTE).unwrap();
    harness.send_key_with_mods(KeyCode::End, KeyModifiers::CONTROL);
    harness.tick().unwrap();
    assert_eq!(row(&harness, 3), "13:00 Lunch");
}

#[test]
fn burst_of_keystrokes_applies_once() {
    let mut harness = AcceptanceTestHarness::from_text(NOTE).unwrap();
    let before = harness.applied_count();

    // GIVEN: a burst of input handled within one loop iteration
    harness.type_text("Notes for ");
    harness.send_key(KeyCode::Home);

    // THEN: one tick applies the final state exactly once
    assert_eq!(harness.tick_only(), ApplyOutcome::Applied);
    assert_eq!(harness.tick_only(), ApplyOutcome::NothingQueued);
    assert_eq!(harness.applied_count(), before + 1);
}

#[test]
fn nothing_is_applied_before_the_tick() {
    let mut harness = AcceptanceTestHarness::from_text(NOTE).unwrap();
    harness.send_key(KeyCode::Down);

    // Overlay still reflects the state before the key.
    let standup = harness
        .overlay()
        .applied()
        .cards()
        .any(|(_, card)| card.title == "Standup");
    assert!(standup);
}

#[test]
fn editing_an_entry_updates_its_card() {
    let mut harness = AcceptanceTestHarness::from_text(NOTE).unwrap();

    // Caret to the end of the Lunch line, append, then leave the entry.
    harness.send_key_with_mods(KeyCode::End, KeyModifiers::CONTROL);
    harness.type_text(" with [[Sam]]");
    harness.send_key(KeyCode::Up);
    harness.send_key(KeyCode::Up);
    harness.tick().unwrap();

    // The first link becomes the title; the rest of the head is location.
    assert_eq!(row(&harness, 3), "│ 13:00  Sam  Lunch");
    assert_eq!(row(&harness, 4), "│        with Sam");
}

#[test]
fn tab_inserts_configured_indent() {
    let mut harness = AcceptanceTestHarness::from_text("").unwrap();
    harness.type_text("09:00 Review\n");
    harness.send_key(KeyCode::Tab);
    harness.type_text("agenda");
    assert_eq!(
        harness.editor().document().text(),
        "09:00 Review\n    agenda"
    );
}

// ===== Card interaction =====

#[test]
fn clicking_card_body_moves_caret_to_title() {
    let mut harness = AcceptanceTestHarness::from_text(NOTE).unwrap();

    harness.click_at(10, 1);
    harness.tick().unwrap();

    assert_eq!(harness.editor().cursor(), "# Monday\n09:00 ".len());
    assert_eq!(row(&harness, 1), "09:00 [[Standup]] with [[Anna]], [[Tom]]");
}

#[test]
fn clicking_participant_names_link_target() {
    let mut harness = AcceptanceTestHarness::from_text(NOTE).unwrap();

    // "Anna" occupies columns 14..18 of the participant row.
    harness.click_at(15, 2);

    assert_eq!(harness.status(), Some("Link: [[Anna]]"));
    assert_eq!(harness.editor().cursor(), "# Monday\n".len());
}

#[test]
fn keyboard_focus_then_enter_activates_card() {
    let mut harness = AcceptanceTestHarness::from_text(NOTE).unwrap();

    harness.send_key_with_mods(KeyCode::Char('n'), KeyModifiers::CONTROL);
    harness.send_key_with_mods(KeyCode::Char('n'), KeyModifiers::CONTROL);
    harness.send_key(KeyCode::Enter);
    harness.tick().unwrap();

    assert_eq!(harness.editor().cursor(), NOTE.find("Lunch").unwrap());
    assert_eq!(row(&harness, 3), "13:00 Lunch");
    assert!(!harness.editor().is_dirty());
}

#[test]
fn focus_survives_an_overlay_update() {
    let mut harness = AcceptanceTestHarness::from_text(NOTE).unwrap();
    harness.send_key_with_mods(KeyCode::Char('n'), KeyModifiers::CONTROL);
    harness.send_key_with_mods(KeyCode::Char('n'), KeyModifiers::CONTROL);
    let lunch = harness.editor().focused_card();

    harness.scroll(true);
    harness.scroll(false);
    harness.tick().unwrap();

    assert_eq!(harness.editor().focused_card(), lunch);
}

fn tall_card_note() -> String {
    let entries = (0..6).map(|i| format!("0{i}:00 [[M{i}]] with [[A]]"));
    let tail = (0..4).map(|i| format!("tail {i}"));
    entries.chain(tail).collect::<Vec<_>>().join("\n")
}

#[test]
fn visible_lines_follow_card_heights() {
    // GIVEN: two-row cards fill the 9-row viewport after five lines
    let harness = AcceptanceTestHarness::from_text_with_size(&tall_card_note(), 40, 10).unwrap();
    assert_eq!(harness.editor().visible_lines(), LineRange::new(0, 5));
}

#[test]
fn caret_below_tall_cards_stays_on_screen() {
    let mut harness =
        AcceptanceTestHarness::from_text_with_size(&tall_card_note(), 40, 10).unwrap();

    // WHEN: the caret walks down past six two-row cards
    for _ in 0..8 {
        harness.send_key(KeyCode::Down);
    }
    harness.tick().unwrap();

    // THEN: the viewport scrolls until the caret line is drawn
    assert_eq!(harness.editor().cursor_line(), 8);
    assert_eq!(harness.editor().scroll_top(), 3);
    assert!(harness.screen().lines().any(|line| line == "tail 2"));

    // WHEN: the newly visible entry is decorated on the next tick
    harness.tick().unwrap();

    // THEN: the caret line is still shown below it
    assert_eq!(row(&harness, 4), "│ 05:00  M5");
    assert_eq!(row(&harness, 8), "tail 2");
    assert_eq!(harness.editor().visible_lines(), LineRange::new(3, 9));
}
