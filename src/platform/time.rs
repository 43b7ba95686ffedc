//! Injected clocks
//!
//! The simulation never reads wall time itself. Drivers hand it `now_ms`
//! from one of these.

use std::cell::Cell;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Hand-driven clock for tests and headless runs. Keeps fractional
/// milliseconds so 60 Hz frames do not drift.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms as f64),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get().floor() as u64
    }
}
