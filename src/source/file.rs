//! Note files on disk.

use crate::model::error::InputError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a note file.
///
/// # Errors
///
/// Returns `InputError::FileNotFound` if the file does not exist.
/// Returns `InputError::Io` for other I/O errors, including invalid UTF-8.
pub fn read_note(path: &Path) -> Result<String, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "note loaded");
    Ok(text)
}

/// Write a note file, replacing it atomically.
///
/// The text goes to a sibling temp file first and is renamed over the
/// target, so a failed write never leaves a truncated note behind.
///
/// # Errors
///
/// Returns `InputError::Io` if the temp file cannot be written or renamed.
pub fn write_note(path: &Path, text: &str) -> Result<(), InputError> {
    let temp = temp_sibling(path);
    let result = (|| {
        let mut file = fs::File::create(&temp)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp, path)
    })();

    if let Err(err) = result {
        let _ = fs::remove_file(&temp);
        return Err(err.into());
    }
    debug!(path = %path.display(), bytes = text.len(), "note saved");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".dayline-tmp");
    path.with_file_name(name)
}
