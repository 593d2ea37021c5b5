//! Coalescing overlay update scheduler.
//!
//! Candidates arrive synchronously with every document, viewport, or
//! selection change, often several per input burst. Only the newest one
//! matters, and it must not reach the surface while the surface is still
//! processing the change that produced it. The scheduler therefore keeps a
//! single pending slot (last write wins) and applies it one tick later,
//! when the host calls [`UpdateScheduler::run`] from its event loop.
//!
//! ```text
//!          submit                run (pending taken)
//!   Idle ─────────► Scheduled ─────────────────────► Applying ──► Idle
//!                     ▲   │ submit: overwrite pending
//!                     └───┘
//! ```

use crate::host::OverlaySink;
use crate::model::ApplyError;
use crate::overlay::DecorationSet;
use tracing::{debug, trace};

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Nothing queued.
    #[default]
    Idle,
    /// An apply is queued for the next tick.
    Scheduled,
    /// The pending candidate is being handed to the surface.
    Applying,
}

/// What caused a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Text was inserted or deleted.
    DocumentChanged,
    /// The visible line ranges moved.
    ViewportChanged,
    /// The caret or selection moved.
    SelectionChanged,
}

/// Result of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// No apply was queued.
    NothingQueued,
    /// The pending set reached the surface.
    Applied,
    /// The surface was gone; the set was dropped.
    SurfaceGone,
}

/// Last-write-wins scheduler with a one-tick deferral.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    state: SchedulerState,
    pending: Option<DecorationSet>,
    last_trigger: Option<Trigger>,
    applied_count: usize,
}

impl UpdateScheduler {
    /// Create an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Check if an apply is queued.
    pub fn is_scheduled(&self) -> bool {
        self.state == SchedulerState::Scheduled
    }

    /// Number of sets handed to the surface so far.
    pub fn applied_count(&self) -> usize {
        self.applied_count
    }

    /// Trigger of the most recent submission.
    pub fn last_trigger(&self) -> Option<Trigger> {
        self.last_trigger
    }

    /// Store `candidate` as the pending set, replacing any earlier one.
    ///
    /// Returns `true` if this call queued the apply (the scheduler was idle).
    pub fn submit(&mut self, trigger: Trigger, candidate: DecorationSet) -> bool {
        self.pending = Some(candidate);
        self.last_trigger = Some(trigger);

        if self.state == SchedulerState::Idle {
            self.state = SchedulerState::Scheduled;
            trace!(?trigger, "overlay apply scheduled");
            true
        } else {
            trace!(?trigger, "overlay candidate replaced");
            false
        }
    }

    /// Run the deferred tick.
    ///
    /// Hands whatever is pending right now to `sink`. A closed surface is
    /// not an error; the set is dropped and the scheduler returns to idle.
    pub fn run<S: OverlaySink + ?Sized>(&mut self, sink: &mut S) -> ApplyOutcome {
        if self.state != SchedulerState::Scheduled {
            return ApplyOutcome::NothingQueued;
        }
        let Some(set) = self.pending.take() else {
            self.state = SchedulerState::Idle;
            return ApplyOutcome::NothingQueued;
        };

        self.state = SchedulerState::Applying;
        let decorations = set.len();
        let outcome = match sink.apply(set) {
            Ok(()) => {
                self.applied_count += 1;
                debug!(decorations, trigger = ?self.last_trigger, "overlay applied");
                ApplyOutcome::Applied
            }
            Err(ApplyError::SurfaceClosed) => {
                debug!("overlay apply skipped, surface closed");
                ApplyOutcome::SurfaceGone
            }
        };
        self.state = SchedulerState::Idle;
        outcome
    }
}
