//! Error types for dayline.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error of the terminal host
//!   - [`InputError`] - Note file/stdin reading and writing failures
//!   - `ConfigError` / `LoggingError` - startup failures (defined next to their modules)
//!   - `std::io::Error` - Terminal/TUI rendering failures
//! - [`OverlayError`] - Decoration set construction rejected an out-of-order replacement
//! - [`ApplyError`] - The editing surface refused an overlay update
//!
//! # Recovery Strategy
//!
//! Nothing inside the timeline engine is fatal to the host. Malformed timeline text is not
//! an error at all: it is accepted and rendered as-is. An [`OverlayError`] is caught at the
//! engine boundary and degrades to "no overlay". An [`ApplyError`] is swallowed by the
//! scheduler because the surface it would report to is already gone.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error of the terminal host.
///
/// All domain-specific errors convert into `AppError` via `From`, so `main` can
/// propagate with `?`.
///
/// # Examples
///
/// ```no_run
/// use dayline::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _text = read_note()?;
///     Ok(())
/// }
/// # fn read_note() -> Result<String, InputError> { Ok(String::new()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read or write the note.
    ///
    /// **Recovery**: fatal at startup. While editing, save failures are shown in the
    /// status bar instead of propagating here.
    #[error("Failed to access note: {0}")]
    Input(#[from] InputError),

    /// Configuration file exists but cannot be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer (broken pipe, resize failure). Fatal:
    /// without a working terminal the editor cannot function.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when loading or saving a note.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified note file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use dayline::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.md")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.md"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// No input source was provided.
    ///
    /// Occurs when no file path is given and stdin is an interactive terminal.
    ///
    /// ```
    /// use dayline::model::error::InputError;
    ///
    /// let msg = InputError::NoInput.to_string();
    /// assert!(msg.contains("file path or pipe data to stdin"));
    /// ```
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// The note came from stdin and has nowhere to be saved.
    #[error("Note was read from stdin and cannot be saved")]
    NotSaveable,

    /// Generic I/O error reading or writing the note.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A replacement was pushed out of document order.
///
/// The replace-region mechanism only accepts ascending, mutually non-overlapping ranges.
/// Hitting this error means a scan produced an inconsistent entry list; the engine answers
/// by rendering no overlay at all for that cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// The new range starts before the previous one ends.
    #[error("Decoration {range} overlaps or precedes previous decoration ending at {previous_end}")]
    OutOfOrder {
        /// Offending range as `[start, end)`.
        range: String,
        /// End offset of the last accepted decoration.
        previous_end: usize,
    },

    /// The range reaches past the end of the document.
    #[error("Decoration {range} exceeds document length {doc_len}")]
    OutOfBounds {
        /// Offending range as `[start, end)`.
        range: String,
        /// Document length in bytes.
        doc_len: usize,
    },
}

/// The editing surface could not take an overlay update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// The surface was torn down between scheduling and applying.
    #[error("Editing surface was closed before the overlay could be applied")]
    SurfaceClosed,
}
