//! Note input sources.
//!
//! A note comes from a file (editable and saveable) or from piped stdin
//! (read once, never saved back).

use crate::model::error::InputError;
use std::path::{Path, PathBuf};

pub mod file;
pub mod stdin;

pub use file::{read_note, write_note};
pub use stdin::StdinSource;

/// Where the note comes from.
///
/// Sum type enforces exactly one variant.
#[derive(Debug)]
pub enum InputSource {
    /// A note file.
    File(PathBuf),
    /// Piped stdin.
    Stdin(StdinSource<std::io::Stdin>),
}

/// A loaded note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedNote {
    /// Note text, byte for byte.
    pub text: String,
    /// Backing file; `None` for stdin.
    pub path: Option<PathBuf>,
}

impl InputSource {
    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::File(path) => Some(path),
            InputSource::Stdin(_) => None,
        }
    }

    /// Load the note.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` for a missing file and
    /// `InputError::Io` for read failures.
    pub fn load(self) -> Result<LoadedNote, InputError> {
        match self {
            InputSource::File(path) => Ok(LoadedNote {
                text: read_note(&path)?,
                path: Some(path),
            }),
            InputSource::Stdin(stdin) => Ok(LoadedNote {
                text: stdin.read_all()?,
                path: None,
            }),
        }
    }

    /// Load the note, treating a missing file as a new empty note.
    ///
    /// Opening today's note before it exists is the normal way to start a
    /// day; the file is created on the first save.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` for read failures other than a missing file.
    pub fn load_or_new(self) -> Result<LoadedNote, InputError> {
        match self {
            InputSource::File(path) if !path.exists() => Ok(LoadedNote {
                text: String::new(),
                path: Some(path),
            }),
            source => source.load(),
        }
    }
}

/// Save a note back to its file.
///
/// # Errors
///
/// Returns `InputError::NotSaveable` for a stdin note and `InputError::Io`
/// for write failures.
pub fn save_note(path: Option<&Path>, text: &str) -> Result<(), InputError> {
    let path = path.ok_or(InputError::NotSaveable)?;
    write_note(path, text)
}

/// Detect and create appropriate input source.
///
/// # Logic:
/// 1. If file path is provided: use it
/// 2. If stdin is piped: use stdin
/// 3. Else: return InputError::NoInput
///
/// # Errors
///
/// Returns `InputError::NoInput` if no file is provided and stdin is not piped.
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(path)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}
