//! Where "now" comes from

use chrono::{Local, NaiveDate, NaiveDateTime};

/// A provider for the current local time
pub trait Clock {
    /// The current local, wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// The current local day
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The system clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that is stopped at a given time. This is mostly useful for tests
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: NaiveDateTime) {
        self.now = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
