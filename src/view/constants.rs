//! Layout and timing constants for TUI rendering.
//!
//! Centralized location for the numeric values the terminal host tunes.

use std::time::Duration;

/// Height of the status bar in lines.
///
/// Single line for file name, timeline state, dirty marker and messages.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// How long the event loop blocks waiting for input when no overlay
/// update is queued.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Lines scrolled per mouse wheel notch.
pub const SCROLL_STEP: isize = 3;

/// Shown in the status bar for a note read from stdin.
pub const STDIN_NAME: &str = "[stdin]";
