//! Frame-clock animation primitives
//!
//! Everything here is a pure function of time, evaluated once per frame on
//! the frame-clock thread. Nothing in this module touches the main executor,
//! so these animations keep running while the main loop is jammed.

use std::time::{Duration, Instant};

/// Duration of one leg of the indefinite ping-pong animation.
pub const SPIN_LEG: Duration = Duration::from_millis(1000);

/// Duration of each leg of the one-shot dip animation.
pub const DIP_LEG: Duration = Duration::from_millis(500);

/// Cubic ease-in-out over `t` in `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Linear interpolation from `a` to `b` by `t` in `[0, 1]`.
pub fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + (b - a) * t
}

/// Maps a position in `[0, bound]` to a rotation angle in `[0, 360]` degrees,
/// rounded to the nearest whole degree. Inputs past either end are clamped,
/// and a degenerate bound maps everything to zero.
pub fn angle_for(pos: f64, bound: f64) -> u16 {
    if bound <= 0.0 {
        return 0;
    }
    let t = (pos / bound).clamp(0.0, 1.0);
    lerp(t, 0.0, 360.0).round() as u16
}

/// Indefinite ping-pong between 0 and a bound, eased per leg.
///
/// Stateless: the position is a pure function of elapsed time, so the
/// program is fixed once and never mutated afterwards.
#[derive(Debug, Clone, Copy)]
pub struct PingPong {
    leg: Duration,
}

impl PingPong {
    pub const fn new(leg: Duration) -> Self {
        Self { leg }
    }

    /// Position after `elapsed`, in `[0, bound]`.
    pub fn sample(&self, elapsed: Duration, bound: f64) -> f64 {
        let leg = self.leg.as_secs_f64();
        let phase = elapsed.as_secs_f64() % (2.0 * leg);
        let t = if phase < leg {
            phase / leg
        } else {
            2.0 - phase / leg
        };
        bound * ease_in_out(t)
    }
}

impl Default for PingPong {
    fn default() -> Self {
        Self::new(SPIN_LEG)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DipPhase {
    Idle,
    Down { since: Instant },
    Up { since: Instant },
}

/// One-shot two-phase dip: eased to the bound, then eased back to rest.
///
/// The return leg is chained at the sampled phase boundary, anchored at
/// `down_start + leg` so frame timing cannot drift the animation.
#[derive(Debug, Clone, Copy)]
pub struct Dip {
    leg: Duration,
    phase: DipPhase,
}

impl Dip {
    pub const fn new(leg: Duration) -> Self {
        Self {
            leg,
            phase: DipPhase::Idle,
        }
    }

    /// Starts (or restarts) the dip from its first leg.
    pub fn start(&mut self, now: Instant) {
        self.phase = DipPhase::Down { since: now };
    }

    /// True once the dip has returned to rest.
    pub fn is_idle(&self) -> bool {
        self.phase == DipPhase::Idle
    }

    /// Offset from rest at `now`, in `[0, bound]`. Advances the phase
    /// machine as legs complete.
    pub fn sample(&mut self, now: Instant, bound: f64) -> f64 {
        if let DipPhase::Down { since } = self.phase {
            let t = leg_fraction(since, now, self.leg);
            if t < 1.0 {
                return bound * ease_in_out(t);
            }
            self.phase = DipPhase::Up {
                since: since + self.leg,
            };
        }
        if let DipPhase::Up { since } = self.phase {
            let t = leg_fraction(since, now, self.leg);
            if t < 1.0 {
                return bound * ease_in_out(1.0 - t);
            }
            self.phase = DipPhase::Idle;
        }
        0.0
    }
}

impl Default for Dip {
    fn default() -> Self {
        Self::new(DIP_LEG)
    }
}

fn leg_fraction(since: Instant, now: Instant, leg: Duration) -> f64 {
    now.saturating_duration_since(since).as_secs_f64() / leg.as_secs_f64()
}
