//! dayline
//!
//! Terminal editor for daily notes. Time-stamped entries such as
//! `09:00 [[Standup]] with [[Anna]]` are shown as timeline cards, and an
//! entry turns back into raw text as soon as the caret touches it.
//!
//! The pure core (`document`, `parser`, `scan`, `overlay`, `position`) knows
//! nothing about terminals. `engine` and `scheduler` coalesce change
//! notifications into one decoration update per loop iteration, and `view`
//! is the crossterm host that drives them.

pub mod config;
pub mod document;
pub mod engine;
pub mod host;
pub mod logging;
pub mod model;
pub mod overlay;
pub mod parser;
pub mod position;
pub mod scan;
pub mod scheduler;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

// Dump mode and other non-interactive entry points
pub mod integration;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
