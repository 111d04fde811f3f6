//! Test clocks — deterministic `Clock` implementations for tests.

use std::sync::Mutex;

use chrono::{DateTime, TimeDelta, Utc};
use stagehand_core::clock::Clock;

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A clock that stands still until a test moves it forward.
#[derive(Debug)]
pub struct AdjustableClock {
    now: Mutex<DateTime<Utc>>,
}

impl AdjustableClock {
    /// Create a clock reading `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `delta`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for AdjustableClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
