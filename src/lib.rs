#![forbid(unsafe_code)]

//! # Threadlab
//!
//! A terminal demonstration of three independent scheduling domains.
//!
//! ## Overview
//!
//! Three animated lanes, each driven from a different scheduler, and one
//! button that blocks the main loop solid for three seconds:
//!
//! - **Main loop**: a cooperative async executor thread hosting a 16 ms
//!   bounce ticker and the event handling, the only domain the jam touches
//! - **Frame clock**: a dedicated render thread repainting at ~60 fps,
//!   driving an eased ping-pong animation and a per-frame counter poll
//! - **Crunch worker**: a dedicated background thread completing one
//!   CPU-bound job every 1.5 s and bumping a shared counter
//!
//! While the main loop is jammed its lane freezes; the other two keep moving.
//! That contrast is the entire demo.
//!
//! ## Core Components
//!
//! - [`App`]: Main orchestrator wiring state, events, worker, and frame clock
//! - [`LabConfig`]: Every timing and layout constant, fixed at construction
//! - [`LabState`]: Atomic shared state with snapshot-based reads
//! - [`JobCounter`]: The one value visible to all three domains
//! - [`FrameBridge`]: Per-frame counter poll that triggers the dip animation
//! - [`CrunchWorker`]: The background computation loop
//! - [`Tui`]: Terminal interface manager handling setup, cleanup, and rendering
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use threadlab::{App, LabConfig};
//!
//! fn main() -> threadlab::ThreadlabResult<()> {
//!     smol::block_on(async {
//!         let mut app = App::new(LabConfig::default())?;
//!         app.run().await
//!     })
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `anim`: Easing, ping-pong, and dip animation primitives
//! - `app`: Application orchestration and the jam action
//! - `colors`: Color system with theme support
//! - `counter`: Cross-context job counter and change watcher
//! - `error`: Error types and handling
//! - `event`: Event processing system
//! - `frame`: Frame-clock thread and render cadence
//! - `poller`: Per-frame bridge from the counter to the dip
//! - `state`: State management traits and the shared demo state
//! - `ticker`: Main-loop bounce recurrence and cadence
//! - `tui`: Terminal interface management
//! - `ui`: Lane, jam bar, and legend rendering
//! - `worker`: Background crunch thread
//!
//! ## Error Handling
//!
//! The crate uses [`ThreadlabResult`] and [`ThreadlabError`] for error
//! handling with detailed diagnostics via `miette`.

pub use anim::{angle_for, ease_in_out, lerp, Dip, PingPong};
pub use app::{bounce_bound, busy_block, App, LabConfig};
pub use colors::{Color, ThemeColorize};
pub use counter::{CounterWatcher, JobCounter};
pub use error::{ThreadlabError, ThreadlabResult};
pub use event::{Event, EventHandler};
pub use frame::FrameLoop;
pub use poller::FrameBridge;
pub use state::{AtomicState, LabSnapshot, LabState, StateSnapshot};
pub use ticker::{Bounce, Cadence};
pub use tui::Tui;
pub use worker::{CrunchWorker, WorkerConfig};

/// Animation primitives for the frame clock
pub mod anim;
/// Application orchestration module
pub mod app;
/// Color system and theme management
pub mod colors;
/// Cross-context job counter
pub mod counter;
/// Error types and handling
pub mod error;
/// Event processing system
pub mod event;
/// Frame-clock thread
pub mod frame;
/// Frame poller bridging the worker to the frame clock
pub mod poller;
/// State management traits and shared state
pub mod state;
/// Main-loop bounce ticker
pub mod ticker;
/// Terminal interface management
pub mod tui;
/// Lane rendering
pub mod ui;
/// Background crunch worker
pub mod worker;

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::Arc,
        thread,
        time::{Duration, Instant},
    };

    /// The demo's central contrast, minus the terminal: while one thread is
    /// busy-blocked, the worker keeps recording jobs and a watcher on
    /// another thread keeps observing them.
    #[test]
    fn test_worker_advances_while_a_thread_is_blocked() {
        let state = Arc::new(LabState::new(250.0));
        let jobs = state.jobs();

        let config = WorkerConfig {
            period: Duration::from_millis(10),
            sqrt_iters: 1_000,
        };
        let mut worker = CrunchWorker::spawn(jobs.clone(), config).unwrap();

        let observer = {
            let jobs = state.jobs();
            thread::spawn(move || {
                let mut watcher = CounterWatcher::new();
                let deadline = Instant::now() + Duration::from_secs(2);
                let mut seen = 0;
                while seen < 5 && Instant::now() < deadline {
                    if let Some(n) = watcher.poll(&jobs) {
                        seen = n;
                    }
                    thread::sleep(Duration::from_millis(2));
                }
                seen
            })
        };

        // This thread is "the main loop": block it solid. The worker and the
        // observer do not care.
        busy_block(Duration::from_millis(200));

        let seen = observer.join().unwrap();
        worker.stop();
        assert!(seen >= 5, "observer saw only {} jobs", seen);
    }

    #[test]
    fn test_bounce_position_freezes_without_ticks() {
        let state = LabState::new(250.0);
        let mut bounce = Bounce::new();

        for _ in 0..10 {
            bounce.step(5.0, 250.0);
            state.publish_bounce(bounce.pos());
        }
        assert_eq!(state.bounce_pos(), 50.0);

        // No ticks arrive while the owning thread is blocked; the published
        // value just stays put.
        busy_block(Duration::from_millis(20));
        assert_eq!(state.bounce_pos(), 50.0);
    }
}
