//! Editor state: the note, the caret, and the viewport.
//!
//! Offsets are byte offsets and always sit on a char boundary. The caret
//! is the only selection range; card focus is tracked separately and does
//! not move the caret until a card is activated.

use crate::document::Document;
use crate::host::{CursorSink, EditorSurface};
use crate::model::TextRange;
use crate::view_state::LineRange;
use std::path::PathBuf;

/// Mutable editing state of one open note.
#[derive(Debug, Clone)]
pub struct EditorState {
    document: Document,
    cursor: usize,
    /// Char column kept across vertical moves through shorter lines.
    goal_column: Option<usize>,
    scroll_top: usize,
    viewport_height: usize,
    /// Lines the host last laid out, with the viewport height it used.
    laid_out: Option<(LineRange, usize)>,
    focused_card: Option<usize>,
    dirty: bool,
    path: Option<PathBuf>,
}

impl EditorState {
    /// Open `text` with the caret at the start.
    pub fn new(text: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            document: Document::new(text),
            cursor: 0,
            goal_column: None,
            scroll_top: 0,
            viewport_height: 1,
            laid_out: None,
            focused_card: None,
            dirty: false,
            path,
        }
    }

    /// The note.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Caret byte offset.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Line holding the caret.
    pub fn cursor_line(&self) -> usize {
        self.document.line_of_offset(self.cursor)
    }

    /// Char column of the caret within its line.
    pub fn cursor_column(&self) -> usize {
        let line_start = self.document.line_start(self.cursor_line());
        self.document.text()[line_start..self.cursor].chars().count()
    }

    /// First line shown in the viewport.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Rows available to the document.
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Decoration index of the focused card.
    pub fn focused_card(&self) -> Option<usize> {
        self.focused_card
    }

    /// Check if there are unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Record a successful save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Set the number of rows available to the document.
    ///
    /// Returns `true` if the height changed.
    pub fn set_viewport_height(&mut self, height: usize) -> bool {
        let height = height.max(1);
        if height == self.viewport_height {
            return false;
        }
        self.viewport_height = height;
        self.clamp_scroll();
        true
    }

    /// Set the first visible line. Returns `true` if it changed.
    pub fn set_scroll_top(&mut self, line: usize) -> bool {
        let before = self.scroll_top;
        self.scroll_top = line;
        self.clamp_scroll();
        self.scroll_top != before
    }

    /// Focus a card by decoration index, or clear focus with `None`.
    pub fn set_focused_card(&mut self, index: Option<usize>) {
        self.focused_card = index;
    }

    /// Lines the viewport currently shows.
    ///
    /// Once the host has laid out the current viewport this is exactly the
    /// set of lines that got rows. Cards can take more rows than lines, so
    /// until then it is the upper bound of one line per row.
    pub fn visible_lines(&self) -> LineRange {
        match self.laid_out {
            Some((lines, height))
                if lines.start == self.scroll_top && height == self.viewport_height =>
            {
                lines
            }
            _ => LineRange::new(self.scroll_top, self.scroll_top + self.viewport_height),
        }
        .clamp_to(self.document.line_count())
    }

    /// Record the lines the host laid out for the current viewport.
    ///
    /// Returns `true` if [`visible_lines`](Self::visible_lines) changed.
    pub fn set_laid_out_lines(&mut self, lines: LineRange) -> bool {
        let before = self.visible_lines();
        self.laid_out = Some((lines, self.viewport_height));
        self.visible_lines() != before
    }

    // ===== Caret motion =====

    /// Move one char left, across line breaks.
    pub fn move_left(&mut self) {
        let text = self.document.text();
        if let Some(c) = text[..self.cursor].chars().next_back() {
            let step = if c == '\n' && text[..self.cursor - 1].ends_with('\r') {
                2
            } else {
                c.len_utf8()
            };
            self.cursor -= step;
        }
        self.goal_column = None;
    }

    /// Move one char right, across line breaks.
    pub fn move_right(&mut self) {
        let text = self.document.text();
        let rest = &text[self.cursor..];
        if let Some(c) = rest.chars().next() {
            let step = if rest.starts_with("\r\n") {
                2
            } else {
                c.len_utf8()
            };
            self.cursor += step;
        }
        self.goal_column = None;
    }

    /// Move to the previous line, keeping the column where possible.
    pub fn move_up(&mut self) {
        let line = self.cursor_line();
        if line > 0 {
            self.move_to_line(line - 1);
        } else {
            self.cursor = 0;
        }
    }

    /// Move to the next line, keeping the column where possible.
    pub fn move_down(&mut self) {
        let line = self.cursor_line();
        if line + 1 < self.document.line_count() {
            self.move_to_line(line + 1);
        } else {
            self.cursor = self.document.line_start(line) + self.document.line(line).len();
        }
    }

    /// Move to the start of the current line.
    pub fn move_line_start(&mut self) {
        self.cursor = self.document.line_start(self.cursor_line());
        self.goal_column = None;
    }

    /// Move to the end of the current line.
    pub fn move_line_end(&mut self) {
        let line = self.cursor_line();
        self.cursor = self.document.line_start(line) + self.document.line(line).len();
        self.goal_column = None;
    }

    /// Move to the start of the note.
    pub fn move_document_start(&mut self) {
        self.cursor = 0;
        self.goal_column = None;
    }

    /// Move to the end of the note.
    pub fn move_document_end(&mut self) {
        self.cursor = self.document.len();
        self.goal_column = None;
    }

    /// Scroll and move the caret by `lines`, negative for up.
    pub fn page(&mut self, lines: isize) {
        let target_line = self.cursor_line().saturating_add_signed(lines);
        let max_line = self.document.line_count().saturating_sub(1);
        self.move_to_line(target_line.min(max_line));
        self.scroll_top = self.scroll_top.saturating_add_signed(lines);
        self.clamp_scroll();
    }

    fn move_to_line(&mut self, line: usize) {
        let current = self.cursor_column();
        let column = *self.goal_column.get_or_insert(current);
        let text = self.document.line(line);
        let byte = text
            .char_indices()
            .nth(column)
            .map_or(text.len(), |(i, _)| i);
        self.cursor = self.document.line_start(line) + byte;
    }

    // ===== Editing =====

    /// Insert text at the caret and move past it.
    pub fn insert_str(&mut self, s: &str) {
        self.document.replace(TextRange::caret(self.cursor), s);
        self.cursor += s.len();
        self.goal_column = None;
        self.dirty = true;
    }

    /// Insert one char at the caret.
    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Delete the char (or line break) before the caret.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_backward(&mut self) -> bool {
        let end = self.cursor;
        self.move_left();
        if self.cursor == end {
            return false;
        }
        self.document.replace(TextRange::new(self.cursor, end), "");
        self.dirty = true;
        true
    }

    /// Delete the char (or line break) after the caret.
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let start = self.cursor;
        self.move_right();
        let end = self.cursor;
        self.cursor = start;
        if end == start {
            return false;
        }
        self.document.replace(TextRange::new(start, end), "");
        self.dirty = true;
        true
    }

    // ===== Viewport =====

    /// Scroll so the caret line is inside the viewport, one row per line.
    ///
    /// Tall cards above the caret can still push it below the last row;
    /// the host corrects that with [`crate::view::layout::scroll_to_reveal`].
    ///
    /// Returns `true` if the viewport moved.
    pub fn reveal_cursor(&mut self) -> bool {
        let line = self.cursor_line();
        let before = self.scroll_top;
        if line < self.scroll_top {
            self.scroll_top = line;
        } else if line >= self.scroll_top + self.viewport_height {
            self.scroll_top = line + 1 - self.viewport_height;
        }
        self.scroll_top != before
    }

    fn clamp_scroll(&mut self) {
        let max_top = self.document.line_count().saturating_sub(1);
        self.scroll_top = self.scroll_top.min(max_top);
    }

    fn clamp_cursor(&self, offset: usize) -> usize {
        let text = self.document.text();
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

impl EditorSurface for EditorState {
    fn document(&self) -> &Document {
        &self.document
    }

    fn visible_ranges(&self) -> Vec<LineRange> {
        vec![self.visible_lines()]
    }

    fn selection(&self) -> Vec<TextRange> {
        vec![TextRange::caret(self.cursor)]
    }
}

impl CursorSink for EditorState {
    fn move_cursor(&mut self, offset: usize) {
        self.cursor = self.clamp_cursor(offset);
        self.goal_column = None;
        self.reveal_cursor();
    }

    fn request_focus(&mut self) {
        self.focused_card = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(text: &str) -> EditorState {
        let mut state = EditorState::new(text, None);
        state.set_viewport_height(10);
        state
    }

    mod motion {
        use super::*;

        #[test]
        fn left_and_right_step_over_multibyte_chars() {
            let mut state = editor("aé b");
            state.move_right();
            state.move_right();
            assert_eq!(state.cursor(), 3);
            state.move_left();
            assert_eq!(state.cursor(), 1);
        }

        #[test]
        fn left_at_start_and_right_at_end_stay_put() {
            let mut state = editor("ab");
            state.move_left();
            assert_eq!(state.cursor(), 0);
            state.move_document_end();
            state.move_right();
            assert_eq!(state.cursor(), 2);
        }

        #[test]
        fn crlf_is_one_step() {
            let mut state = editor("a\r\nb");
            state.move_right();
            state.move_right();
            assert_eq!(state.cursor(), 3);
            state.move_left();
            assert_eq!(state.cursor(), 1);
        }

        #[test]
        fn vertical_moves_keep_goal_column() {
            let mut state = editor("abcdef\nab\nabcdef");
            for _ in 0..5 {
                state.move_right();
            }
            state.move_down();
            assert_eq!(state.cursor_line(), 1);
            assert_eq!(state.cursor_column(), 2);
            state.move_down();
            assert_eq!(state.cursor_column(), 5);
        }

        #[test]
        fn up_on_first_line_goes_to_start_and_down_on_last_goes_to_end() {
            let mut state = editor("abc\nxyz");
            state.move_right();
            state.move_up();
            assert_eq!(state.cursor(), 0);
            state.move_down();
            state.move_down();
            assert_eq!(state.cursor(), 7);
        }

        #[test]
        fn home_and_end_stay_on_line() {
            let mut state = editor("one\ntwo\r\nthree");
            state.move_down();
            state.move_line_end();
            assert_eq!(state.cursor(), 7);
            state.move_line_start();
            assert_eq!(state.cursor(), 4);
        }

        #[test]
        fn page_moves_caret_and_viewport() {
            let text: Vec<String> = (0..40).map(|i| format!("line {i}")).collect();
            let mut state = editor(&text.join("\n"));
            state.page(10);
            assert_eq!(state.cursor_line(), 10);
            assert_eq!(state.scroll_top(), 10);
            state.page(-25);
            assert_eq!(state.cursor_line(), 0);
            assert_eq!(state.scroll_top(), 0);
        }
    }

    mod editing {
        use super::*;

        #[test]
        fn insert_advances_caret_and_marks_dirty() {
            let mut state = editor("");
            assert!(!state.is_dirty());
            state.insert_str("09:00");
            state.insert_char(' ');
            state.insert_char('é');
            assert_eq!(state.document().text(), "09:00 é");
            assert_eq!(state.cursor(), 8);
            assert!(state.is_dirty());
        }

        #[test]
        fn delete_backward_joins_lines() {
            let mut state = editor("ab\ncd");
            state.move_down();
            state.move_line_start();
            assert!(state.delete_backward());
            assert_eq!(state.document().text(), "abcd");
            assert_eq!(state.cursor(), 2);
        }

        #[test]
        fn delete_backward_at_start_does_nothing() {
            let mut state = editor("ab");
            assert!(!state.delete_backward());
            assert!(!state.is_dirty());
        }

        #[test]
        fn delete_forward_removes_multibyte_char() {
            let mut state = editor("é!");
            assert!(state.delete_forward());
            assert_eq!(state.document().text(), "!");
            assert_eq!(state.cursor(), 0);
        }

        #[test]
        fn delete_forward_at_end_does_nothing() {
            let mut state = editor("ab");
            state.move_document_end();
            assert!(!state.delete_forward());
        }

        #[test]
        fn mark_saved_clears_dirty() {
            let mut state = editor("");
            state.insert_char('x');
            state.mark_saved();
            assert!(!state.is_dirty());
        }
    }

    mod surface {
        use super::*;

        #[test]
        fn selection_is_the_caret() {
            let mut state = editor("09:00 a");
            state.move_right();
            assert_eq!(state.selection(), vec![TextRange::caret(1)]);
        }

        #[test]
        fn visible_range_follows_scroll_and_height() {
            let text: Vec<String> = (0..30).map(|i| i.to_string()).collect();
            let mut state = editor(&text.join("\n"));
            state.set_scroll_top(5);
            assert_eq!(state.visible_ranges(), vec![LineRange::new(5, 15)]);
        }

        #[test]
        fn laid_out_lines_narrow_the_visible_range() {
            let text: Vec<String> = (0..30).map(|i| i.to_string()).collect();
            let mut state = editor(&text.join("\n"));
            assert!(state.set_laid_out_lines(LineRange::new(0, 7)));
            assert_eq!(state.visible_ranges(), vec![LineRange::new(0, 7)]);
            assert!(!state.set_laid_out_lines(LineRange::new(0, 7)));

            // A new scroll position falls back to one line per row.
            state.set_scroll_top(5);
            assert_eq!(state.visible_lines(), LineRange::new(5, 15));
        }

        #[test]
        fn visible_range_is_clamped_to_document() {
            let state = editor("a\nb");
            assert_eq!(state.visible_ranges(), vec![LineRange::new(0, 2)]);
        }

        #[test]
        fn move_cursor_clamps_to_char_boundary_and_reveals() {
            let text: Vec<String> = (0..30).map(|_| "é".to_string()).collect();
            let mut state = editor(&text.join("\n"));
            let line_20 = state.document().line_start(20);
            state.move_cursor(line_20 + 1);
            assert_eq!(state.cursor(), line_20);
            assert!(state.visible_lines().contains(20));
        }

        #[test]
        fn request_focus_clears_card_focus() {
            let mut state = editor("09:00 a");
            state.set_focused_card(Some(0));
            state.request_focus();
            assert_eq!(state.focused_card(), None);
        }
    }
}
