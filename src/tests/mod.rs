//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the terminal host through the acceptance harness and
//! check what the screen shows after each event-loop iteration.

// Harness-based acceptance tests
mod acceptance_editing;
