//! Time sources for event timestamps.
//!
//! Timestamps are milliseconds since the clock was created. [`MonotonicClock`]
//! is backed by [`std::time::Instant`]; [`ManualClock`] only moves when told
//! to and is what tests use to pin exact timestamps.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

/// A monotonic, non-decreasing time source.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now_micros(&self) -> i64;

    fn now_millis(&self) -> i64 {
        self.now_micros() / 1_000
    }
}

/// Wall-independent clock anchored at construction time.
#[derive(Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_micros(&self) -> i64 {
        i64::try_from(self.start.elapsed().as_micros()).unwrap_or(i64::MAX)
    }
}

/// Clock that advances only through [`ManualClock::advance_millis`].
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicI64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at_millis(millis: i64) -> Self {
        Self { micros: AtomicI64::new(millis.saturating_mul(1_000)) }
    }

    pub fn advance_millis(&self, millis: i64) {
        self.advance_micros(millis.saturating_mul(1_000));
    }

    /// Negative deltas are ignored so the clock never runs backwards.
    pub fn advance_micros(&self, micros: i64) {
        if micros > 0 {
            self.micros.fetch_add(micros, Ordering::SeqCst);
        }
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> i64 {
        self.micros.load(Ordering::SeqCst)
    }
}
