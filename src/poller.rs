//! Frame poller bridging the worker to the frame clock
//!
//! Runs once per rendered frame on the frame-clock thread. Reads the job
//! counter without blocking, mirrors it into a frame-local count, and starts
//! the dip animation only when the count advanced.

use std::time::Instant;

use crate::{
    anim::Dip,
    counter::{CounterWatcher, JobCounter},
};

/// Frame-local mirror of the job counter plus the dip it drives.
#[derive(Debug)]
pub struct FrameBridge {
    watcher: CounterWatcher,
    shown: u64,
    dip: Dip,
}

impl FrameBridge {
    /// Creates a bridge synchronized with the counter's current value, with
    /// the dip at rest.
    pub fn new(counter: &JobCounter, dip: Dip) -> Self {
        let watcher = CounterWatcher::synced(counter);
        Self {
            shown: watcher.seen(),
            watcher,
            dip,
        }
    }

    /// Per-frame step: polls the counter and, if it moved, updates the
    /// mirrored count and starts the dip. Equal counts across frames do
    /// nothing, so the animation is never restarted by an unrelated frame.
    ///
    /// Runs before the frame draws, so a readout in the same frame sees the
    /// updated count.
    pub fn on_frame(&mut self, counter: &JobCounter, now: Instant) {
        if let Some(count) = self.watcher.poll(counter) {
            self.shown = count;
            self.dip.start(now);
        }
    }

    /// The mirrored job count for this frame's readout.
    pub fn shown(&self) -> u64 {
        self.shown
    }

    /// The dip's current offset from rest.
    pub fn offset(&mut self, now: Instant, bound: f64) -> f64 {
        self.dip.sample(now, bound)
    }
}
