//! Core state management traits and the demo's shared state
//!
//! State shared between the main loop and the frame clock follows a
//! snapshot discipline: the owning domain mutates atomics, the rendering
//! domain takes an immutable snapshot per frame and never writes back.

use std::{
    fmt::Debug,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};

use crate::counter::JobCounter;

/// Represents an immutable snapshot of application state
pub trait StateSnapshot: Clone + Send + Debug + 'static {
    /// Returns whether the application should quit
    fn should_quit(&self) -> bool;
}

/// Represents a thread-safe atomic application state
pub trait AtomicState: Send + Sync + Debug + 'static {
    /// The type of snapshot this state produces
    type Snapshot: StateSnapshot;

    /// Take a consistent snapshot of the current state
    fn snapshot(&self) -> Self::Snapshot;

    /// Signal the application to quit
    fn quit(&self);

    /// Check if the application is still running
    fn is_running(&self) -> bool;
}

/// Shared state behind an `Arc` still satisfies the state contract.
impl<S: AtomicState> AtomicState for Arc<S> {
    type Snapshot = S::Snapshot;

    fn snapshot(&self) -> Self::Snapshot {
        (**self).snapshot()
    }

    fn quit(&self) {
        (**self).quit()
    }

    fn is_running(&self) -> bool {
        (**self).is_running()
    }
}

/// State owned by the orchestrator and shared with the frame clock.
///
/// The bounce position crosses from the main loop to the frame clock through
/// an atomic bit cell: if the main loop stalls, the cell simply retains the
/// last published value.
#[derive(Debug)]
pub struct LabState {
    running: AtomicBool,
    jammed: AtomicBool,
    bounce_pos: AtomicU64,
    bound: f64,
    jobs: Arc<JobCounter>,
}

impl LabState {
    /// Creates running, un-jammed state with the bounce at rest.
    pub fn new(bound: f64) -> Self {
        Self {
            running: AtomicBool::new(true),
            jammed: AtomicBool::new(false),
            bounce_pos: AtomicU64::new(0f64.to_bits()),
            bound,
            jobs: Arc::new(JobCounter::new()),
        }
    }

    /// Upper edge of the bounce track, fixed at construction.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Handle to the job counter, for the worker and the frame bridge.
    pub fn jobs(&self) -> Arc<JobCounter> {
        self.jobs.clone()
    }

    /// Publishes a new bounce position. Main loop only.
    pub fn publish_bounce(&self, pos: f64) {
        self.bounce_pos.store(pos.to_bits(), Ordering::Release);
    }

    /// Last published bounce position.
    pub fn bounce_pos(&self) -> f64 {
        f64::from_bits(self.bounce_pos.load(Ordering::Acquire))
    }

    /// Flags the start or end of a main-loop jam.
    pub fn set_jammed(&self, jammed: bool) {
        self.jammed.store(jammed, Ordering::Release);
    }

    /// Whether the main loop is currently jammed.
    pub fn is_jammed(&self) -> bool {
        self.jammed.load(Ordering::Acquire)
    }
}

/// Per-frame view of [`LabState`].
#[derive(Debug, Clone)]
pub struct LabSnapshot {
    pub running: bool,
    pub jammed: bool,
    pub bounce_pos: f64,
    pub bound: f64,
}

impl StateSnapshot for LabSnapshot {
    fn should_quit(&self) -> bool {
        !self.running
    }
}

impl AtomicState for LabState {
    type Snapshot = LabSnapshot;

    fn snapshot(&self) -> Self::Snapshot {
        LabSnapshot {
            running: self.running.load(Ordering::Acquire),
            jammed: self.jammed.load(Ordering::Acquire),
            bounce_pos: self.bounce_pos(),
            bound: self.bound,
        }
    }

    fn quit(&self) {
        self.running.store(false, Ordering::Release);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
