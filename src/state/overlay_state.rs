//! The applied decoration set.

use crate::host::OverlaySink;
use crate::model::ApplyError;
use crate::overlay::DecorationSet;

/// Holds the decoration set currently painted over the note.
///
/// Written only through [`OverlaySink::apply`], i.e. by the scheduler's
/// apply step.
#[derive(Debug, Default)]
pub struct OverlayState {
    applied: DecorationSet,
    closed: bool,
}

impl OverlayState {
    /// Create an open overlay with nothing painted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decorations currently painted.
    pub fn applied(&self) -> &DecorationSet {
        &self.applied
    }

    /// Tear the overlay down. Later applies fail with `SurfaceClosed`.
    pub fn close(&mut self) {
        self.closed = true;
        self.applied = DecorationSet::empty();
    }

    /// Check if the overlay was torn down.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl OverlaySink for OverlayState {
    fn apply(&mut self, set: DecorationSet) -> Result<(), ApplyError> {
        if self.closed {
            return Err(ApplyError::SurfaceClosed);
        }
        self.applied = set;
        Ok(())
    }
}
