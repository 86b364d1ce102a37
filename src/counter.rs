//! Cross-context job counter
//!
//! The one piece of state shared by all three scheduling domains: a monotone
//! counter written by the crunch worker and read by the frame clock. Writes
//! and reads are single atomic operations, so a reader never observes a torn
//! value and no increment is lost to a racing read.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotone count of completed background jobs.
///
/// Written only by the worker domain; readable from anywhere without
/// blocking.
#[derive(Debug, Default)]
pub struct JobCounter {
    completed: AtomicU64,
}

impl JobCounter {
    /// Creates a counter at zero.
    pub const fn new() -> Self {
        Self {
            completed: AtomicU64::new(0),
        }
    }

    /// Records one completed job and returns the new count.
    pub fn record(&self) -> u64 {
        self.completed.fetch_add(1, Ordering::Release) + 1
    }

    /// Returns the latest committed count. Never blocks.
    pub fn get(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }
}

/// Per-reader change detector over a [`JobCounter`].
///
/// Caches the last observed count so a poll can tell "changed since my last
/// look" apart from the raw value. Each reading domain keeps its own watcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct CounterWatcher {
    seen: u64,
}

impl CounterWatcher {
    /// Creates a watcher that has seen nothing yet.
    pub const fn new() -> Self {
        Self { seen: 0 }
    }

    /// Creates a watcher already synchronized with the counter's current
    /// value, so only future increments register as changes.
    pub fn synced(counter: &JobCounter) -> Self {
        Self {
            seen: counter.get(),
        }
    }

    /// Polls the counter; returns the new count when it moved since the last
    /// poll, `None` otherwise. Non-blocking.
    pub fn poll(&mut self, counter: &JobCounter) -> Option<u64> {
        let current = counter.get();
        if current != self.seen {
            self.seen = current;
            Some(current)
        } else {
            None
        }
    }

    /// The count observed by the most recent poll.
    pub fn seen(&self) -> u64 {
        self.seen
    }
}
