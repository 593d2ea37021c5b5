//! Acceptance Test Harness for TUI testing
//!
//! Provides two levels of test doubles:
//! - [`FakeSurface`]: a bare editing surface for driving the engine directly
//! - [`AcceptanceTestHarness`]: the full terminal host on a `TestBackend`,
//!   with helpers for simulating keys, clicks and event-loop iterations

use crate::document::Document;
use crate::host::{AlwaysDaily, DocumentIdentity, EditorSurface, OverlaySink};
use crate::model::{ApplyError, TextRange};
use crate::overlay::DecorationSet;
use crate::scheduler::ApplyOutcome;
use crate::source::LoadedNote;
use crate::state::{EditorState, OverlayState};
use crate::view::{ColorConfig, HostOptions, TuiApp, TuiError};
use crate::view_state::LineRange;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed to keep snapshots clean.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

// ===== FakeSurface =====

/// In-memory editing surface.
///
/// Everything is visible and nothing is selected unless a test says
/// otherwise.
#[derive(Debug)]
pub struct FakeSurface {
    doc: Document,
    visible: Option<Vec<LineRange>>,
    selection: Vec<TextRange>,
    applied: Option<DecorationSet>,
    apply_count: usize,
    torn_down: bool,
}

#[allow(dead_code)] // Not every helper is used by every test module
impl FakeSurface {
    pub fn new(text: &str) -> Self {
        Self {
            doc: Document::new(text),
            visible: None,
            selection: Vec::new(),
            applied: None,
            apply_count: 0,
            torn_down: false,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        self.doc = Document::new(text);
    }

    pub fn set_visible(&mut self, ranges: Vec<LineRange>) {
        self.visible = Some(ranges);
    }

    pub fn set_selection(&mut self, ranges: Vec<TextRange>) {
        self.selection = ranges;
    }

    /// Last set the scheduler applied.
    pub fn applied(&self) -> Option<&DecorationSet> {
        self.applied.as_ref()
    }

    pub fn apply_count(&self) -> usize {
        self.apply_count
    }

    /// Make every later apply fail as if the editor had closed.
    pub fn tear_down(&mut self) {
        self.torn_down = true;
    }
}

impl EditorSurface for FakeSurface {
    fn document(&self) -> &Document {
        &self.doc
    }

    fn visible_ranges(&self) -> Vec<LineRange> {
        self.visible
            .clone()
            .unwrap_or_else(|| vec![LineRange::new(0, self.doc.line_count())])
    }

    fn selection(&self) -> Vec<TextRange> {
        self.selection.clone()
    }
}

impl OverlaySink for FakeSurface {
    fn apply(&mut self, set: DecorationSet) -> Result<(), ApplyError> {
        if self.torn_down {
            return Err(ApplyError::SurfaceClosed);
        }
        self.applied = Some(set);
        self.apply_count += 1;
        Ok(())
    }
}

// ===== AcceptanceTestHarness =====

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests. Input helpers only handle events; call
/// [`tick`](Self::tick) to run the event loop's tick-and-draw step.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

#[allow(dead_code)] // Not every helper is used by every test module
impl AcceptanceTestHarness {
    /// Open `text` as an active daily note on an 80x24 terminal.
    pub fn from_text(text: &str) -> Result<Self, TuiError> {
        Self::from_text_with_size(text, 80, 24)
    }

    /// Open `text` with a custom terminal size.
    pub fn from_text_with_size(text: &str, width: u16, height: u16) -> Result<Self, TuiError> {
        Self::build(text, Box::new(AlwaysDaily), width, height)
    }

    /// Open `text` with a custom identity.
    pub fn with_identity(
        text: &str,
        identity: Box<dyn DocumentIdentity>,
    ) -> Result<Self, TuiError> {
        Self::build(text, identity, 80, 24)
    }

    fn build(
        text: &str,
        identity: Box<dyn DocumentIdentity>,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let note = LoadedNote {
            text: text.to_string(),
            path: None,
        };
        let options = HostOptions {
            colors: ColorConfig::from_env_and_args(true),
            ..HostOptions::default()
        };
        let mut app = TuiApp::new_for_test(terminal, note, identity, options);
        app.render_test()?;

        Ok(Self { app, running: true })
    }

    /// Send a single key event
    ///
    /// # Returns
    /// * `true` - If app quit as a result of this key
    /// * `false` - If app is still running
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+N)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Type text (sends individual character key events)
    ///
    /// `'\n'` is sent as Enter.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            let code = if ch == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(ch)
            };
            if self.send_key(code) {
                break; // Quit encountered
            }
        }
    }

    /// Simulate a left click at the given screen position.
    pub fn click_at(&mut self, column: u16, row: u16) {
        self.app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Simulate one wheel notch.
    pub fn scroll(&mut self, down: bool) {
        let kind = if down {
            MouseEventKind::ScrollDown
        } else {
            MouseEventKind::ScrollUp
        };
        self.app.handle_mouse_test(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// End of one event-loop iteration: tick the scheduler and draw.
    pub fn tick(&mut self) -> Result<(), TuiError> {
        self.app.render_test()
    }

    /// Run only the scheduler tick, without drawing.
    pub fn tick_only(&mut self) -> ApplyOutcome {
        self.app.tick_test()
    }

    /// Check if app is still running (didn't quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame and return the screen contents.
    pub fn render_to_string(&mut self) -> String {
        if let Err(err) = self.app.render_test() {
            panic!("render failed: {err}");
        }
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    /// Screen contents as last drawn, without a new tick.
    pub fn screen(&self) -> String {
        buffer_to_string(self.app.terminal().backend().buffer())
    }

    pub fn editor(&self) -> &EditorState {
        self.app.editor()
    }

    pub fn overlay(&self) -> &OverlayState {
        self.app.overlay()
    }

    pub fn applied_count(&self) -> usize {
        self.app.engine().applied_count()
    }

    pub fn status(&self) -> Option<&str> {
        self.app.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harness_opens_and_draws() {
        let mut harness = AcceptanceTestHarness::from_text("# Monday\n09:00 Standup").unwrap();
        assert!(harness.is_running());
        let screen = harness.render_to_string();
        assert!(screen.contains("│ 09:00  Standup"), "screen was:\n{screen}");
    }

    #[test]
    fn quit_stops_the_harness() {
        let mut harness = AcceptanceTestHarness::from_text("").unwrap();
        assert!(harness.send_key_with_mods(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!harness.is_running());
        assert!(harness.send_key(KeyCode::Char('x')));
    }

    #[test]
    fn fake_surface_defaults_to_everything_visible() {
        let surface = FakeSurface::new("a\nb\nc");
        assert_eq!(surface.visible_ranges(), vec![LineRange::new(0, 3)]);
        assert!(surface.selection().is_empty());
    }

    #[test]
    fn buffer_to_string_drops_trailing_blank_rows() {
        let mut buffer = ratatui::buffer::Buffer::empty(ratatui::layout::Rect::new(0, 0, 4, 3));
        buffer.set_string(0, 0, "ab", ratatui::style::Style::default());
        assert_eq!(buffer_to_string(&buffer), "ab");
    }
}
