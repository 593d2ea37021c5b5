//! Timeline engine.
//!
//! Glue between the host and the pure pipeline: on every change it asks the
//! injected identity whether the document is a daily timeline, scans the
//! visible ranges, builds the decoration set, and hands the result to the
//! scheduler. This is the single place where internal failures are caught;
//! a failure degrades to "no overlay" and the raw text stays editable.

use crate::host::{DocumentClass, DocumentIdentity, EditorSurface, OverlaySink};
use crate::overlay::{build_decorations, DecorationSet};
use crate::parser::block::DEFAULT_MAX_LOOKBACK;
use crate::scan::scan_visible;
use crate::scheduler::{ApplyOutcome, SchedulerState, Trigger, UpdateScheduler};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// How many lines above a visible range to search for an owning header.
    pub max_lookback: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_lookback: DEFAULT_MAX_LOOKBACK,
        }
    }
}

/// Computes and schedules overlay updates for one editing surface.
pub struct TimelineEngine {
    identity: Box<dyn DocumentIdentity>,
    settings: EngineSettings,
    scheduler: UpdateScheduler,
}

impl TimelineEngine {
    /// Create an engine for documents classified by `identity`.
    pub fn new(identity: Box<dyn DocumentIdentity>, settings: EngineSettings) -> Self {
        Self {
            identity,
            settings,
            scheduler: UpdateScheduler::new(),
        }
    }

    /// Replace the identity, e.g. after the document was saved under a new
    /// path. Takes effect on the next `notify`.
    pub fn set_identity(&mut self, identity: Box<dyn DocumentIdentity>) {
        self.identity = identity;
    }

    /// Current classification of the document.
    pub fn classify(&self) -> DocumentClass {
        self.identity.classify()
    }

    /// Check if the engine decorates the current document.
    pub fn is_active(&self) -> bool {
        self.classify().is_active()
    }

    /// Engine settings.
    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Scheduler state, for status display and tests.
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Number of sets applied so far.
    pub fn applied_count(&self) -> usize {
        self.scheduler.applied_count()
    }

    /// Compute the decoration set for the surface's current state.
    ///
    /// Inert documents get the empty set. Any failure inside scanning or
    /// building, including a panic, is logged and also yields the empty set.
    pub fn compute<S: EditorSurface + ?Sized>(&self, surface: &S) -> DecorationSet {
        let class = self.classify();
        if !class.is_active() {
            debug!(?class, "document inert, no overlay");
            return DecorationSet::empty();
        }

        let max_lookback = self.settings.max_lookback;
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let doc = surface.document();
            let entries = scan_visible(doc, &surface.visible_ranges(), max_lookback);
            build_decorations(doc, &entries, &surface.selection())
        }));

        match result {
            Ok(Ok(set)) => set,
            Ok(Err(err)) => {
                error!(error = %err, "overlay build failed, showing raw text");
                DecorationSet::empty()
            }
            Err(payload) => {
                error!(
                    panic = panic_message(payload.as_ref()),
                    "overlay build panicked, showing raw text"
                );
                DecorationSet::empty()
            }
        }
    }

    /// Recompute for `trigger` and queue the result.
    ///
    /// Returns `true` if this call queued a new apply.
    pub fn notify<S: EditorSurface + ?Sized>(&mut self, surface: &S, trigger: Trigger) -> bool {
        let candidate = self.compute(surface);
        self.scheduler.submit(trigger, candidate)
    }

    /// Run the deferred apply, if any.
    pub fn tick<K: OverlaySink + ?Sized>(&mut self, sink: &mut K) -> ApplyOutcome {
        self.scheduler.run(sink)
    }
}

impl std::fmt::Debug for TimelineEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineEngine")
            .field("class", &self.classify())
            .field("settings", &self.settings)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
