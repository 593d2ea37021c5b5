//! Domain model types (pure).
//!
//! All types in this module are plain data derived from document text.
//! Nothing here is persisted; entries live for one scheduling cycle.

pub mod entry;
pub mod error;
pub mod key_action;
pub mod range;

// Re-export for convenience
pub use entry::{Participant, TimelineEntry, WikiLink};
pub use error::{AppError, ApplyError, InputError, OverlayError};
pub use key_action::KeyAction;
pub use range::{LineSpan, TextRange};
