//! TUI rendering and terminal management (impure shell)
//!
//! The terminal editor is the host surface the timeline engine decorates.
//! One loop iteration drains every immediately available input event, runs
//! one scheduler tick, then draws. Overlay updates requested while handling
//! events therefore reach the screen on the same iteration, after the last
//! event of the burst.

pub mod card;
pub mod constants;
pub mod layout;
pub mod styles;

pub use card::{CardTarget, PlaceholderCard, TimelineCard};
pub use layout::{DisplayRow, RowHit};
pub use styles::{CardStyles, ColorConfig};

use crate::config::keybindings::KeyBindings;
use crate::engine::{EngineSettings, TimelineEngine};
use crate::host::{CursorSink, DocumentIdentity};
use crate::model::{AppError, KeyAction};
use crate::position::{self, FocusDirection};
use crate::scheduler::{ApplyOutcome, SchedulerState, Trigger};
use crate::source::{save_note, LoadedNote};
use crate::state::{handle_edit_action, handle_insert_char, EditorState, OverlayState};
use crate::view_state::CardCache;
use constants::{POLL_INTERVAL, SCROLL_STEP, STATUS_BAR_HEIGHT, STDIN_NAME};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Settings the host takes from configuration and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostOptions {
    /// Spaces inserted by Tab.
    pub indent: usize,
    /// Reverse lookup bound handed to the engine.
    pub max_lookback: usize,
    /// Rendered cards kept in the cache.
    pub card_cache_capacity: usize,
    /// Color output.
    pub colors: ColorConfig,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            max_lookback: EngineSettings::default().max_lookback,
            card_cache_capacity: crate::view_state::DEFAULT_CARD_CACHE_CAPACITY,
            colors: ColorConfig::from_env_and_args(false),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    editor: EditorState,
    engine: TimelineEngine,
    overlay: OverlayState,
    key_bindings: KeyBindings,
    card_cache: CardCache,
    styles: CardStyles,
    indent: usize,
    /// One-shot message for the status bar.
    status: Option<String>,
    /// The caret moved; scroll it into the laid-out rows on the next refresh.
    reveal_pending: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(
        note: LoadedNote,
        identity: Box<dyn DocumentIdentity>,
        options: HostOptions,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(terminal, note, identity, options))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Blocks on input while idle; a queued
    /// overlay update makes the next poll return immediately.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.refresh()?;

        loop {
            let timeout = if self.engine.scheduler_state() == SchedulerState::Scheduled {
                Duration::ZERO
            } else {
                POLL_INTERVAL
            };

            if event::poll(timeout)? {
                if self.handle_event(event::read()?) {
                    self.overlay.close();
                    return Ok(());
                }
                // Drain the rest of the burst before the tick.
                while event::poll(Duration::ZERO)? {
                    if self.handle_event(event::read()?) {
                        self.overlay.close();
                        return Ok(());
                    }
                }
                self.refresh()?;
            } else if self.engine.scheduler_state() == SchedulerState::Scheduled {
                self.refresh()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    fn with_terminal(
        terminal: Terminal<B>,
        note: LoadedNote,
        identity: Box<dyn DocumentIdentity>,
        options: HostOptions,
    ) -> Self {
        let editor = EditorState::new(note.text, note.path);
        let mut engine = TimelineEngine::new(
            identity,
            EngineSettings {
                max_lookback: options.max_lookback,
            },
        );
        info!(
            class = ?engine.classify(),
            lines = editor.document().line_count(),
            "note opened"
        );
        engine.notify(&editor, Trigger::DocumentChanged);

        Self {
            terminal,
            editor,
            engine,
            overlay: OverlayState::new(),
            key_bindings: KeyBindings::default(),
            card_cache: CardCache::new(options.card_cache_capacity),
            styles: CardStyles::with_color_config(options.colors),
            indent: options.indent,
            status: None,
            reveal_pending: false,
        }
    }

    /// Handle one terminal event. Returns true if app should quit.
    fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                false
            }
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                false
            }
            _ => false,
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.key_bindings.get(key) {
            Some(KeyAction::Quit) => return true,
            Some(KeyAction::Save) => self.save(),
            Some(KeyAction::NextCard) => self.focus_adjacent(FocusDirection::Next),
            Some(KeyAction::PrevCard) => self.focus_adjacent(FocusDirection::Previous),
            Some(KeyAction::ClearCardFocus) => self.editor.set_focused_card(None),
            Some(KeyAction::InsertNewline) if self.editor.focused_card().is_some() => {
                if let Some(index) = self.editor.focused_card() {
                    self.activate(index, CardTarget::Body);
                }
            }
            Some(action) => {
                if let Some(trigger) = handle_edit_action(&mut self.editor, action, self.indent) {
                    self.after_change(trigger);
                }
            }
            None => {
                if let KeyCode::Char(c) = key.code {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        let trigger = handle_insert_char(&mut self.editor, c);
                        self.after_change(trigger);
                    }
                }
            }
        }
        false
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-SCROLL_STEP),
            MouseEventKind::ScrollDown => self.scroll_by(SCROLL_STEP),
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn click(&mut self, column: u16, row: u16) {
        let rows = self.layout();
        let hit = layout::hit_test(
            &rows,
            self.editor.document(),
            self.overlay.applied(),
            column,
            row,
        );
        match hit {
            RowHit::Text { offset } => {
                self.editor.move_cursor(offset);
                self.after_change(Trigger::SelectionChanged);
            }
            RowHit::Placeholder => {
                self.editor.move_cursor(0);
                self.after_change(Trigger::SelectionChanged);
            }
            RowHit::Card { decoration, target } => self.activate(decoration, target),
            RowHit::Miss => {}
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        self.reveal_pending = false;
        let target = self.editor.scroll_top().saturating_add_signed(delta);
        if self.editor.set_scroll_top(target) {
            self.engine.notify(&self.editor, Trigger::ViewportChanged);
        }
    }

    /// Put the caret into a card's text and report any participant link.
    fn activate(&mut self, decoration: usize, target: CardTarget) {
        let Some(card) = self.overlay.applied().get(decoration).and_then(|d| d.card()) else {
            return;
        };
        let activation = position::activate(card, target, &mut self.editor);
        self.status = activation
            .link_target
            .map(|link| format!("Link: [[{link}]]"));
        self.reveal_pending = true;
        self.engine.notify(&self.editor, Trigger::SelectionChanged);
    }

    fn focus_adjacent(&mut self, direction: FocusDirection) {
        let Some(index) =
            position::adjacent_card(self.overlay.applied(), self.editor.focused_card(), direction)
        else {
            return;
        };
        self.editor.set_focused_card(Some(index));

        let first_line = self
            .overlay
            .applied()
            .get(index)
            .and_then(|d| d.card())
            .map(|card| card.lines.first);
        if let Some(first_line) = first_line {
            if !self.editor.visible_lines().contains(first_line)
                && self.editor.set_scroll_top(first_line)
            {
                self.engine.notify(&self.editor, Trigger::ViewportChanged);
            }
        }
    }

    /// Return to the text after an edit or caret move and notify the engine.
    fn after_change(&mut self, trigger: Trigger) {
        self.editor.set_focused_card(None);
        self.status = None;
        self.reveal_pending = true;
        self.engine.notify(&self.editor, trigger);
    }

    fn save(&mut self) {
        match save_note(
            self.editor.path().map(|p| p.as_path()),
            self.editor.document().text(),
        ) {
            Ok(()) => {
                self.editor.mark_saved();
                self.status = Some("Saved".to_string());
            }
            Err(err) => {
                warn!(error = %err, "save failed");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Sync the viewport, run one scheduler tick, then draw.
    ///
    /// Scrolling happens against the rows the freshly applied overlay lays
    /// out, and the lines those rows cover become the visible range the
    /// next update scans.
    fn refresh(&mut self) -> Result<(), TuiError> {
        self.sync_viewport()?;
        self.tick();
        if std::mem::take(&mut self.reveal_pending) {
            // Check again once the update for the new viewport is applied.
            self.reveal_pending = self.reveal_caret();
        }
        self.track_laid_out_lines();
        self.draw()
    }

    /// Scroll until the caret line is drawn as a text row.
    ///
    /// Returns `true` if the viewport moved.
    fn reveal_caret(&mut self) -> bool {
        let top = layout::scroll_to_reveal(
            self.editor.document(),
            self.overlay.applied(),
            self.editor.scroll_top(),
            self.editor.viewport_height(),
            self.editor.cursor_line(),
        );
        if !self.editor.set_scroll_top(top) {
            return false;
        }
        debug!(scroll_top = top, "scrolled caret into view");
        self.engine.notify(&self.editor, Trigger::ViewportChanged);
        true
    }

    fn track_laid_out_lines(&mut self) {
        let rows = self.layout();
        let lines = layout::laid_out_lines(&rows, self.overlay.applied(), self.editor.scroll_top());
        if self.editor.set_laid_out_lines(lines) {
            self.engine.notify(&self.editor, Trigger::ViewportChanged);
        }
    }

    fn sync_viewport(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let height = usize::from(size.height.saturating_sub(STATUS_BAR_HEIGHT));
        if self.editor.set_viewport_height(height) {
            self.engine.notify(&self.editor, Trigger::ViewportChanged);
        }
        Ok(())
    }

    /// Run one scheduler tick, keeping card focus on the same entry.
    fn tick(&mut self) -> ApplyOutcome {
        let focused_start = self
            .editor
            .focused_card()
            .and_then(|i| self.overlay.applied().get(i))
            .map(|d| d.range.start);

        let outcome = self.engine.tick(&mut self.overlay);
        if outcome == ApplyOutcome::Applied {
            let refocused =
                focused_start.and_then(|start| self.overlay.applied().card_at_offset(start));
            self.editor.set_focused_card(refocused);
        }
        outcome
    }

    fn layout(&self) -> Vec<DisplayRow> {
        layout::layout_rows(
            self.editor.document(),
            self.overlay.applied(),
            self.editor.scroll_top(),
            self.editor.viewport_height(),
        )
    }

    fn status_line(&self) -> Line<'static> {
        let name = self
            .editor
            .path()
            .and_then(|p| p.file_name())
            .map_or_else(
                || STDIN_NAME.to_string(),
                |n| n.to_string_lossy().into_owned(),
            );
        let dirty = if self.editor.is_dirty() { " [+]" } else { "" };
        let mode = if self.engine.is_active() {
            "timeline"
        } else {
            "plain"
        };

        let mut text = format!(" {name}{dirty} | {mode}");
        if let Some(message) = &self.status {
            text.push_str(" | ");
            text.push_str(message);
        }
        Line::raw(text)
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let rows = self.layout();
        let lines = layout::render_rows(
            &rows,
            self.editor.document(),
            self.overlay.applied(),
            self.editor.focused_card(),
            &mut self.card_cache,
            &self.styles,
        );
        let caret = match self.editor.focused_card() {
            Some(_) => None,
            None => layout::caret_position(&rows, self.editor.document(), self.editor.cursor()),
        };
        let status = self.status_line();

        self.terminal.draw(|frame| {
            let [content, status_area] = Layout::vertical([
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .areas(frame.area());

            frame.render_widget(Paragraph::new(lines), content);
            frame.render_widget(
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::REVERSED)),
                status_area,
            );

            if let Some((x, y)) = caret {
                if x < content.width && y < content.height {
                    frame.set_cursor_position((content.x + x, content.y + y));
                }
            }
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create TuiApp for testing without terminal initialization.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        note: LoadedNote,
        identity: Box<dyn DocumentIdentity>,
        options: HostOptions,
    ) -> Self {
        Self::with_terminal(terminal, note, identity, options)
    }

    pub(crate) fn editor(&self) -> &EditorState {
        &self.editor
    }

    pub(crate) fn engine(&self) -> &TimelineEngine {
        &self.engine
    }

    pub(crate) fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    pub(crate) fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Handle a single keyboard event. Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// One loop iteration without input: viewport sync, tick and draw.
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.refresh()
    }

    /// Run only the scheduler tick.
    pub(crate) fn tick_test(&mut self) -> ApplyOutcome {
        self.tick()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Initialize and run the TUI application with a loaded note
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_note(
    note: LoadedNote,
    identity: Box<dyn DocumentIdentity>,
    options: HostOptions,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(note, identity, options)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
