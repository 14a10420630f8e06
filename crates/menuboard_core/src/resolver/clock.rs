//! Wall-clock providers.

use chrono::{Local, NaiveDateTime, TimeDelta};
use std::cell::Cell;

/// Source of the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// System local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, delta: TimeDelta) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
