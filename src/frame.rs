//! Frame clock
//!
//! A dedicated thread that owns the terminal and repaints at a fixed frame
//! cadence. The ping-pong animation, the counter bridge, and every per-frame
//! readout live here, so the screen keeps moving while the main loop is
//! jammed solid.

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{
    anim::{angle_for, Dip, PingPong},
    counter::JobCounter,
    error::{ThreadlabError, ThreadlabResult},
    poller::FrameBridge,
    state::{AtomicState, LabState},
    tui::Tui,
    ui::{self, FrameReadout},
};

/// Target frame period, roughly 60 frames per second.
pub const FRAME: Duration = Duration::from_millis(16);

/// Handle to the frame-clock thread.
pub struct FrameLoop {
    handle: Option<JoinHandle<ThreadlabResult<()>>>,
}

impl FrameLoop {
    /// Spawns the frame clock, taking ownership of the terminal. Runs until
    /// the shared state stops running.
    pub fn spawn(
        tui: Tui<Arc<LabState>>,
        spin: PingPong,
        dip: Dip,
    ) -> ThreadlabResult<Self> {
        let handle = thread::Builder::new()
            .name("frame-clock".into())
            .spawn(move || run_frames(tui, spin, dip))
            .map_err(|e| {
                ThreadlabError::worker(
                    "frame spawn",
                    (0, 0),
                    format!("Failed to spawn frame clock: {}", e),
                )
            })?;

        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Joins the frame thread, surfacing any render error it exited with.
    pub fn join(&mut self) -> ThreadlabResult<()> {
        match self.handle.take() {
            Some(handle) => match handle.join() {
                Ok(result) => result,
                Err(_) => Err(ThreadlabError::worker(
                    "frame join",
                    (0, 0),
                    "Frame clock panicked".to_string(),
                )
                .into()),
            },
            None => Ok(()),
        }
    }
}

fn run_frames(
    mut tui: Tui<Arc<LabState>>,
    spin: PingPong,
    dip: Dip,
) -> ThreadlabResult<()> {
    let jobs: Arc<JobCounter> = tui.state().jobs();
    let mut bridge = FrameBridge::new(&jobs, dip);
    let started = Instant::now();

    while tui.state().is_running() {
        let frame_start = Instant::now();

        tui.render(|snap, area, frame| {
            // Bridge first: a readout in this same frame must see the
            // updated count.
            bridge.on_frame(&jobs, frame_start);

            let spin_pos = spin.sample(frame_start - started, snap.bound);
            let readout = FrameReadout {
                spin_pos,
                angle: angle_for(spin_pos, snap.bound),
                dip_offset: bridge.offset(frame_start, snap.bound),
                jobs_done: bridge.shown(),
            };
            ui::draw(frame, area, snap, &readout);
        })?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }

    Ok(())
}
