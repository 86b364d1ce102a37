//! Event handling system
//!
//! Non-blocking event plumbing between the terminal and the main loop. A
//! polling task feeds a bounded channel; the main loop drains it with
//! non-blocking reads. While the main loop is jammed the channel simply
//! holds whatever arrives; nothing here can stall the frame clock.

use crossterm::event::{Event as CrosstermEvent, KeyEvent};
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use async_channel::{bounded, Receiver, Sender, TryRecvError};

use crate::error::{ThreadlabError, ThreadlabResult};

/// Maximum number of pending events in the channel
const MAX_EVENTS: usize = 1024;

/// Terminal events that can occur
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press events
    Key(KeyEvent),
    /// Terminal resize events
    Resize(u16, u16),
    /// Event indicating the event loop should terminate
    Quit,
}

/// Handles event polling and distribution
#[derive(Debug)]
pub struct EventHandler {
    /// Sender for event channel
    tx: Sender<Event>,
    /// Receiver for event channel
    rx: Receiver<Event>,
    /// Flag indicating if the event handler is running
    running: AtomicBool,
}

impl EventHandler {
    /// Creates a new event handler with bounded channel
    pub fn new() -> Self {
        let (tx, rx) = bounded(MAX_EVENTS);
        Self {
            tx,
            rx,
            running: AtomicBool::new(true),
        }
    }

    /// Attempts to send an event through the channel without blocking
    pub fn try_send(&self, event: Event) -> ThreadlabResult<()> {
        self.tx
            .try_send(event)
            .map_err(|_| ThreadlabError::channel_closed("event channel", (0, 0)).into())
    }

    /// Non-blocking attempt to receive an event
    pub fn try_recv(&self) -> ThreadlabResult<Option<Event>> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(_) => Err(ThreadlabError::channel_closed("event channel", (0, 0)).into()),
        }
    }

    /// Starts the event polling loop
    pub async fn run(&self, tick_rate: Duration) -> ThreadlabResult<()> {
        while self.running.load(Ordering::Acquire) {
            // Poll for crossterm events
            if self.poll_events(tick_rate)? {
                match self.read_event()? {
                    CrosstermEvent::Key(key) => {
                        self.try_send(Event::Key(key))?;
                    }
                    CrosstermEvent::Resize(width, height) => {
                        self.try_send(Event::Resize(width, height))?;
                    }
                    _ => {}
                }
            }

            // Allow other tasks to run
            smol::future::yield_now().await;
        }

        Ok(())
    }

    /// Polls for terminal events
    fn poll_events(&self, tick_rate: Duration) -> ThreadlabResult<bool> {
        crossterm::event::poll(tick_rate).map_err(|e| {
            ThreadlabError::event(
                "event polling",
                (0, 0),
                format!("Failed to poll events: {}", e),
            )
            .into()
        })
    }

    /// Reads a terminal event
    fn read_event(&self) -> ThreadlabResult<CrosstermEvent> {
        crossterm::event::read().map_err(|e| {
            ThreadlabError::event(
                "event reading",
                (0, 0),
                format!("Failed to read event: {}", e),
            )
            .into()
        })
    }

    /// Stops the event handler
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Checks if the event handler is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
