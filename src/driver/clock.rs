use std::{cell::Cell, time::Instant};

use crate::foundation::core::Millis;

/// Monotonic millisecond time source.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Wall-clock backed time, measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Millis {
        Millis::from_secs(self.origin.elapsed().as_secs_f64())
    }
}

/// Hand-advanced time for tests and offline rendering. Never moves backwards.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, t: Millis) {
        self.now.set(self.now.get().max(t));
    }

    pub fn advance(&self, by: Millis) {
        self.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}
