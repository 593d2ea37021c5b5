//! Host capabilities.
//!
//! The timeline engine never owns the editor. Everything it needs from the
//! surrounding editing surface comes through these traits, so the terminal
//! editor, a test fake, or any other host can drive it.

use crate::document::Document;
use crate::model::{ApplyError, TextRange};
use crate::overlay::DecorationSet;
use crate::view_state::LineRange;
use chrono::NaiveDate;
use std::path::{Component, Path, PathBuf};

/// Read access to the editing surface.
pub trait EditorSurface {
    /// Current document text.
    fn document(&self) -> &Document;

    /// Line intervals currently on screen. May overlap.
    fn visible_ranges(&self) -> Vec<LineRange>;

    /// Selection ranges; a bare caret is a zero-width range.
    fn selection(&self) -> Vec<TextRange>;
}

/// Receives the decoration set to paint.
pub trait OverlaySink {
    /// Replace the painted decorations with `set`.
    ///
    /// # Errors
    ///
    /// `ApplyError::SurfaceClosed` if the surface has been torn down.
    fn apply(&mut self, set: DecorationSet) -> Result<(), ApplyError>;
}

/// Caret control used when a card is activated.
pub trait CursorSink {
    /// Place the caret at a byte offset.
    fn move_cursor(&mut self, offset: usize);

    /// Give keyboard focus back to the text.
    fn request_focus(&mut self);
}

/// Outcome of asking whether the open document is a daily timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentClass {
    /// A daily note: the engine is active.
    DailyTimeline,
    /// Some other document: the engine stays inert.
    Other,
    /// The host cannot tell yet (no file behind the buffer, state still
    /// loading). Treated like `Other`.
    Unavailable,
}

impl DocumentClass {
    /// Check if this class activates the engine.
    pub fn is_active(self) -> bool {
        matches!(self, DocumentClass::DailyTimeline)
    }
}

/// Decides whether the open document is a daily timeline.
pub trait DocumentIdentity {
    /// Classify the current document.
    fn classify(&self) -> DocumentClass;
}

/// Classifies every document as a daily timeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDaily;

impl DocumentIdentity for AlwaysDaily {
    fn classify(&self) -> DocumentClass {
        DocumentClass::DailyTimeline
    }
}

/// Daily-note convention: `<...>/<daily_folder>/<...>/<date>.md`.
///
/// The file must sit somewhere under a directory named `daily_folder` and
/// its stem must parse as a date with `date_format`.
#[derive(Debug, Clone)]
pub struct FolderConvention {
    daily_folder: String,
    date_format: String,
    path: Option<PathBuf>,
}

impl FolderConvention {
    /// Convention for the document at `path` (`None` for an unnamed buffer).
    pub fn new(
        daily_folder: impl Into<String>,
        date_format: impl Into<String>,
        path: Option<PathBuf>,
    ) -> Self {
        Self {
            daily_folder: daily_folder.into(),
            date_format: date_format.into(),
            path,
        }
    }

    fn in_daily_folder(&self, path: &Path) -> bool {
        let Some(parent) = path.parent() else {
            return false;
        };
        parent.components().any(|component| match component {
            Component::Normal(name) => name.to_str() == Some(self.daily_folder.as_str()),
            _ => false,
        })
    }

    fn has_date_stem(&self, path: &Path) -> bool {
        let is_markdown = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        is_markdown
            && path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .is_some_and(|stem| NaiveDate::parse_from_str(stem, &self.date_format).is_ok())
    }
}

impl DocumentIdentity for FolderConvention {
    fn classify(&self) -> DocumentClass {
        match &self.path {
            None => DocumentClass::Unavailable,
            Some(path) if self.in_daily_folder(path) && self.has_date_stem(path) => {
                DocumentClass::DailyTimeline
            }
            Some(_) => DocumentClass::Other,
        }
    }
}
