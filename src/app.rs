//! Application orchestration module
//!
//! Wires the three scheduling domains together: builds the shared state,
//! hands the terminal to the frame clock, spawns the crunch worker, and then
//! runs the main loop. Event handling, the bounce ticker, and the jam
//! action all live on this one blockable thread.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::event::KeyCode;
use futures_lite::FutureExt;
use smol::Task;

use crate::{
    anim::{Dip, PingPong, DIP_LEG, SPIN_LEG},
    error::ThreadlabResult,
    event::{Event, EventHandler},
    frame::FrameLoop,
    state::{AtomicState, LabState},
    ticker::{Bounce, Cadence, STEP, TICK},
    tui::Tui,
    worker::{CrunchWorker, WorkerConfig},
};

/// Every timing and layout constant of the demo, fixed at construction.
#[derive(Debug, Clone)]
pub struct LabConfig {
    /// Main-loop bounce tick period.
    pub tick: Duration,
    /// Main-loop bounce step per tick.
    pub step: f64,
    /// Ping-pong leg duration on the frame clock.
    pub spin_leg: Duration,
    /// Dip leg duration on the frame clock.
    pub dip_leg: Duration,
    /// Crunch worker timing and workload.
    pub worker: WorkerConfig,
    /// Delay between raising the jammed flag and starting the block, long
    /// enough for a frame to paint the frozen bar first.
    pub jam_notice: Duration,
    /// Length of the busy-wait block.
    pub jam_hold: Duration,
    /// Poll period of the terminal event task.
    pub event_poll: Duration,
    /// Fraction of the viewport height used as the bounce bound.
    pub bound_fraction: f64,
    /// Bounce bound when the viewport height is unknown or degenerate.
    pub fallback_bound: f64,
    /// Nominal glyph height, scaling terminal rows into the animation's
    /// coordinate space.
    pub cell_px: f64,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            tick: TICK,
            step: STEP,
            spin_leg: SPIN_LEG,
            dip_leg: DIP_LEG,
            worker: WorkerConfig::default(),
            jam_notice: Duration::from_millis(50),
            jam_hold: Duration::from_millis(3000),
            event_poll: Duration::from_millis(16),
            bound_fraction: 0.35,
            fallback_bound: 250.0,
            cell_px: 16.0,
        }
    }
}

/// Upper edge of the bounce track for a given viewport height.
pub fn bounce_bound(view_h: f64, fraction: f64, fallback: f64) -> f64 {
    if view_h <= 0.0 {
        fallback
    } else {
        fraction * view_h
    }
}

/// Occupies the calling thread until the deadline passes. A busy-wait, not a
/// sleep: the thread must be unable to do anything else, timers included.
pub fn busy_block(hold: Duration) {
    let deadline = Instant::now() + hold;
    while Instant::now() < deadline {
        std::hint::spin_loop();
    }
}

/// The full jam sequence: raise the flag, give the frame clock a beat to
/// show it, block the calling thread solid, then lower the flag and drop any
/// key presses that queued up while frozen.
pub async fn run_jam(
    state: &LabState,
    events: &EventHandler,
    notice: Duration,
    hold: Duration,
) -> ThreadlabResult<()> {
    state.set_jammed(true);
    smol::Timer::after(notice).await;
    busy_block(hold);
    state.set_jammed(false);
    while events.try_recv()?.is_some() {}
    Ok(())
}

/// Core application struct managing all components
pub struct App {
    config: LabConfig,
    state: Arc<LabState>,
    events: Arc<EventHandler>,
    frame: FrameLoop,
    worker: CrunchWorker,
    bounce: Bounce,
}

impl App {
    /// Creates the shared state, takes over the terminal, and spawns the
    /// frame clock and the crunch worker.
    pub fn new(config: LabConfig) -> ThreadlabResult<Self> {
        let view_h = crossterm::terminal::size()
            .map(|(_cols, rows)| rows as f64 * config.cell_px)
            .unwrap_or(0.0);
        let bound = bounce_bound(view_h, config.bound_fraction, config.fallback_bound);

        let state = Arc::new(LabState::new(bound));
        let tui = Tui::new(state.clone())?;
        let worker = CrunchWorker::spawn(state.jobs(), config.worker.clone())?;
        let frame = FrameLoop::spawn(
            tui,
            PingPong::new(config.spin_leg),
            Dip::new(config.dip_leg),
        )?;

        Ok(Self {
            config,
            state,
            events: Arc::new(EventHandler::new()),
            frame,
            worker,
            bounce: Bounce::new(),
        })
    }

    /// Runs the main loop until quit: drains events, advances the bounce on
    /// its cadence, publishes the position, and yields.
    pub async fn run(&mut self) -> ThreadlabResult<()> {
        let events = self.events.clone();
        let poll = self.config.event_poll;
        let event_task = smol::spawn(async move { events.run(poll).await });

        let result = self.drive().await;

        // Unwind the other domains even when the loop errored, so the frame
        // clock releases the terminal before we return.
        self.state.quit();
        let shutdown = self.shutdown(event_task).await;
        result.and(shutdown)
    }

    async fn drive(&mut self) -> ThreadlabResult<()> {
        let mut cadence = Cadence::new(self.config.tick, Instant::now());

        while self.state.is_running() {
            while let Some(event) = self.events.try_recv()? {
                match event {
                    Event::Quit => self.state.quit(),
                    Event::Key(key) => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => self.state.quit(),
                        KeyCode::Char('j') => self.jam().await?,
                        _ => {}
                    },
                    Event::Resize(..) => {}
                }
            }

            if cadence.due(Instant::now()) {
                self.bounce.step(self.config.step, self.state.bound());
                self.state.publish_bounce(self.bounce.pos());
            }

            smol::Timer::after(Duration::from_millis(2)).await;
        }

        Ok(())
    }

    /// Blocks the main loop for the configured hold. The frame clock and the
    /// worker keep running; this thread does nothing until it is over.
    async fn jam(&self) -> ThreadlabResult<()> {
        run_jam(
            &self.state,
            &self.events,
            self.config.jam_notice,
            self.config.jam_hold,
        )
        .await
    }

    /// Total jobs the worker completed so far.
    pub fn jobs_done(&self) -> u64 {
        self.state.jobs().get()
    }

    async fn shutdown(&mut self, event_task: Task<ThreadlabResult<()>>) -> ThreadlabResult<()> {
        self.events.stop();
        self.worker.stop();

        // The poll task notices the stop flag within one poll period; give it
        // a bounded window before letting the task drop.
        let _ = event_task
            .or(async {
                smol::Timer::after(Duration::from_secs(1)).await;
                Ok(())
            })
            .await;

        self.frame.join()
    }
}
