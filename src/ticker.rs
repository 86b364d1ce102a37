//! Main-loop bounce ticker
//!
//! A reflecting oscillator advanced by ordinary state updates on the main
//! executor thread. Every update depends on that thread being free to run,
//! which is exactly what the jam action takes away: while the thread is
//! blocked the cadence simply skips, and the position freezes at its last
//! published value.

use std::time::{Duration, Instant};

/// Position update applied once per tick.
pub const STEP: f64 = 5.0;

/// Tick period for the main-loop bounce.
pub const TICK: Duration = Duration::from_millis(16);

/// Reflecting bounce state: a position in `[0, bound]` and a direction sign.
///
/// The recurrence is `next = pos + step * dir`, flipping `dir` when `next`
/// reaches either edge. `next` is stored without clamping, so a step that
/// lands past an edge briefly overshoots and the following tick corrects
/// course.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pos: f64,
    dir: f64,
}

impl Bounce {
    /// Starts at the top edge, heading down.
    pub const fn new() -> Self {
        Self { pos: 0.0, dir: 1.0 }
    }

    /// Applies one tick of the recurrence.
    pub fn step(&mut self, step: f64, bound: f64) {
        let next = self.pos + step * self.dir;
        if next >= bound || next <= 0.0 {
            self.dir = -self.dir;
        }
        self.pos = next;
    }

    /// Current position, possibly just past an edge.
    pub fn pos(&self) -> f64 {
        self.pos
    }

    /// Current direction sign: `1.0` heading toward the bound, `-1.0` back.
    pub fn dir(&self) -> f64 {
        self.dir
    }
}

impl Default for Bounce {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-period deadline that never queues missed firings.
///
/// `due` answers "has the deadline passed" and re-arms at `now + period`, so
/// a thread that was blocked for ten periods gets one firing on resume, not
/// ten.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    period: Duration,
    next: Instant,
}

impl Cadence {
    /// Arms the first deadline one period from `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next: now + period,
        }
    }

    /// Returns true at most once per elapsed deadline, re-arming relative to
    /// `now` rather than the missed deadline.
    pub fn due(&mut self, now: Instant) -> bool {
        if now >= self.next {
            self.next = now + self.period;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_fifty_ticks_land_on_bound_and_flip() {
        let mut bounce = Bounce::new();
        for _ in 0..49 {
            bounce.step(5.0, 250.0);
            assert_eq!(bounce.dir(), 1.0);
        }
        bounce.step(5.0, 250.0);
        assert_eq!(bounce.pos(), 250.0);
        assert_eq!(bounce.dir(), -1.0);
    }

    #[test]
    fn test_full_period_returns_to_zero() {
        let mut bounce = Bounce::new();
        for _ in 0..100 {
            bounce.step(5.0, 250.0);
        }
        assert_eq!(bounce.pos(), 0.0);
        assert_eq!(bounce.dir(), 1.0);
    }

    #[test]
    fn test_overshoot_is_kept_not_clamped() {
        let mut bounce = Bounce::new();
        // Step does not divide the bound: 7, 14, ... 98, then 105 > 100.
        for _ in 0..15 {
            bounce.step(7.0, 100.0);
        }
        assert_eq!(bounce.pos(), 105.0);
        assert_eq!(bounce.dir(), -1.0);
        // Next tick heads back inside.
        bounce.step(7.0, 100.0);
        assert_eq!(bounce.pos(), 98.0);
    }

    #[test]
    fn test_recurrence_matches_reference_fold() {
        let mut bounce = Bounce::new();
        let (mut pos, mut dir) = (0.0f64, 1.0f64);
        for _ in 0..1000 {
            bounce.step(5.0, 250.0);
            let next = pos + 5.0 * dir;
            if next >= 250.0 || next <= 0.0 {
                dir = -dir;
            }
            pos = next;
        }
        assert_eq!(bounce.pos(), pos);
        assert_eq!(bounce.dir(), dir);
    }

    #[test]
    fn test_position_stays_within_overshoot_band() {
        let mut rng = StdRng::seed_from_u64(0x0b0b);
        for _ in 0..50 {
            let step = rng.gen_range(1.0..20.0f64);
            let bound = rng.gen_range(50.0..400.0f64);
            let mut bounce = Bounce::new();
            for _ in 0..500 {
                bounce.step(step, bound);
                assert!(
                    bounce.pos() >= -step && bounce.pos() <= bound + step,
                    "pos {} escaped band for step {} bound {}",
                    bounce.pos(),
                    step,
                    bound
                );
            }
        }
    }

    #[test]
    fn test_cadence_fires_once_per_period() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_millis(16), start);

        assert!(!cadence.due(start));
        assert!(cadence.due(start + Duration::from_millis(16)));
        // Re-armed: same instant does not fire twice.
        assert!(!cadence.due(start + Duration::from_millis(16)));
    }

    #[test]
    fn test_cadence_skips_missed_periods() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_millis(16), start);

        // Three seconds late: one firing, not ~187.
        let late = start + Duration::from_secs(3);
        assert!(cadence.due(late));
        assert!(!cadence.due(late));
        assert!(!cadence.due(late + Duration::from_millis(15)));
        assert!(cadence.due(late + Duration::from_millis(16)));
    }
}
