//! Timed slide rotation for multi-slide screens.
//!
//! # Invariants
//! - `current()` is always `< slide_count`, or `0` when there are no slides.
//! - `poll()` advances one slide per whole elapsed interval and keeps the
//!   remainder, so a late poll catches up without drifting.
//! - Manual selection does not restart the interval.

use crate::resolver::clock::Clock;
use chrono::{NaiveDateTime, TimeDelta};
use log::debug;

/// Default time each slide stays on screen.
pub const DEFAULT_SLIDE_INTERVAL_MS: u32 = 5000;

pub struct SlideRotator<C: Clock> {
    clock: C,
    slide_count: usize,
    interval: TimeDelta,
    current: usize,
    advanced_at: NaiveDateTime,
}

impl<C: Clock> SlideRotator<C> {
    /// Starts on slide `0`.
    ///
    /// A non-positive `interval` is treated as one millisecond.
    pub fn new(clock: C, slide_count: usize, interval: TimeDelta) -> Self {
        let interval = interval.max(TimeDelta::milliseconds(1));
        let advanced_at = clock.now();
        Self {
            clock,
            slide_count,
            interval,
            current: 0,
            advanced_at,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Moves to the next slide, wrapping at the end.
    pub fn advance(&mut self) -> usize {
        self.step(1)
    }

    /// Jumps to `index` (wrapped into range).
    pub fn select(&mut self, index: usize) -> usize {
        if self.slide_count > 0 {
            self.current = index % self.slide_count;
        }
        self.current
    }

    /// Advances when at least one interval has elapsed since the last step.
    ///
    /// Returns the index after stepping, or `None` when no interval elapsed.
    /// A clock that moved backwards restarts the interval from now.
    pub fn poll(&mut self) -> Option<usize> {
        if self.slide_count == 0 {
            return None;
        }
        let now = self.clock.now();
        let elapsed = now - self.advanced_at;
        if elapsed < TimeDelta::zero() {
            self.advanced_at = now;
            return None;
        }

        let elapsed_ms = elapsed.num_milliseconds();
        let interval_ms = self.interval.num_milliseconds();
        let steps = elapsed_ms / interval_ms;
        if steps == 0 {
            return None;
        }
        self.advanced_at = now - TimeDelta::milliseconds(elapsed_ms % interval_ms);
        let step = usize::try_from(steps).unwrap_or(usize::MAX) % self.slide_count;
        Some(self.step(step))
    }

    fn step(&mut self, by: usize) -> usize {
        if self.slide_count == 0 {
            return 0;
        }
        self.current = (self.current + by % self.slide_count) % self.slide_count;
        debug!(
            "event=slide_advance module=resolver status=ok slide={} count={}",
            self.current, self.slide_count
        );
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::SlideRotator;
    use crate::resolver::clock::FixedClock;
    use chrono::{NaiveDate, TimeDelta};

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2026, 10, 14)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn advance_wraps_around() {
        let clock = clock();
        let mut rotator = SlideRotator::new(&clock, 2, TimeDelta::seconds(5));
        assert_eq!(rotator.current(), 0);
        assert_eq!(rotator.advance(), 1);
        assert_eq!(rotator.advance(), 0);
    }

    #[test]
    fn zero_slides_stay_at_zero() {
        let clock = clock();
        let mut rotator = SlideRotator::new(&clock, 0, TimeDelta::seconds(5));
        assert_eq!(rotator.advance(), 0);
        assert_eq!(rotator.select(3), 0);
        clock.advance(TimeDelta::seconds(60));
        assert_eq!(rotator.poll(), None);
    }

    #[test]
    fn select_wraps_index() {
        let clock = clock();
        let mut rotator = SlideRotator::new(&clock, 3, TimeDelta::seconds(5));
        assert_eq!(rotator.select(4), 1);
    }
}
