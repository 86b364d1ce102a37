//! Terminal interface management
//!
//! Owns the terminal for the lifetime of the frame clock: setup into raw
//! mode and the alternate screen, per-frame snapshot rendering, and
//! restoration on drop.

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Rect, Size},
    Terminal,
};

use crate::{
    error::{ThreadlabError, ThreadlabResult},
    state::AtomicState,
};

/// Terminal user interface manager
pub struct Tui<S: AtomicState> {
    /// Terminal instance for rendering
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state
    state: S,
}

impl<S: AtomicState> Tui<S> {
    /// Creates a new TUI instance
    pub fn new(state: S) -> ThreadlabResult<Self> {
        // Check if we're in a real terminal
        if !Self::is_real_terminal() {
            return Err(ThreadlabError::terminal(
                "terminal check",
                (0, 0),
                "Not a real terminal or terminal capabilities not available".to_string(),
            )
            .into());
        }

        let terminal = Self::setup_terminal()?;
        Ok(Self { terminal, state })
    }

    /// Check if we're in a real terminal
    fn is_real_terminal() -> bool {
        // Check if stdout is a tty
        if !atty::is(atty::Stream::Stdout) {
            return false;
        }

        // Check terminal environment
        match std::env::var("TERM") {
            Ok(term) if term == "dumb" => false,
            Ok(_) => true,
            Err(_) => false,
        }
    }

    /// Sets up the terminal for TUI operation
    fn setup_terminal() -> ThreadlabResult<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();

        execute!(stdout, EnterAlternateScreen).map_err(|e| {
            ThreadlabError::terminal(
                "terminal setup",
                (0, 0),
                format!("Failed to setup terminal: {}", e),
            )
        })?;

        terminal::enable_raw_mode().map_err(|e| {
            ThreadlabError::terminal(
                "terminal setup",
                (0, 0),
                format!("Failed to enable raw mode: {}", e),
            )
        })?;

        Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
            ThreadlabError::terminal(
                "terminal setup",
                (0, 0),
                format!("Failed to create terminal: {}", e),
            )
            .into()
        })
    }

    /// Restores terminal to original state
    fn restore_terminal(&mut self) -> ThreadlabResult<()> {
        terminal::disable_raw_mode().map_err(|e| {
            ThreadlabError::terminal(
                "terminal cleanup",
                (0, 0),
                format!("Failed to disable raw mode: {}", e),
            )
        })?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
            ThreadlabError::terminal(
                "terminal cleanup",
                (0, 0),
                format!("Failed to restore terminal: {}", e),
            )
        })?;

        Ok(self.terminal.show_cursor().map_err(|e| {
            ThreadlabError::terminal(
                "terminal cleanup",
                (0, 0),
                format!("Failed to show cursor: {}", e),
            )
        })?)
    }

    /// Renders a frame using the provided render function
    pub fn render<F>(&mut self, render_fn: F) -> ThreadlabResult<()>
    where
        F: FnOnce(&S::Snapshot, Rect, &mut ratatui::Frame<'_>),
    {
        let snapshot = self.state.snapshot();

        Ok(self
            .terminal
            .draw(|frame| {
                let area = frame.area();
                render_fn(&snapshot, area, frame);
            })
            .map(|_| ())
            .map_err(|e| {
                ThreadlabError::terminal(
                    "rendering",
                    (0, 0),
                    format!("Failed to render frame: {}", e),
                )
            })?)
    }

    /// Returns a reference to the state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Returns the terminal size
    pub fn size(&self) -> ThreadlabResult<Size> {
        Ok(self.terminal.size().map_err(|e| {
            ThreadlabError::terminal(
                "terminal size",
                (0, 0),
                format!("Failed to get terminal size: {}", e),
            )
        })?)
    }
}

impl<S: AtomicState> Drop for Tui<S> {
    fn drop(&mut self) {
        if let Err(e) = self.restore_terminal() {
            eprintln!("Failed to restore terminal: {}", e);
        }
    }
}
