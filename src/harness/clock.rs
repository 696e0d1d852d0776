// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Time sources for the harness.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source. Only differences between readings mean anything.
pub trait Clock {
    fn now(&self) -> Duration;

    /// Run `f` and return its result with the time it took.
    fn time<T>(&self, f: impl FnOnce() -> T) -> (T, Duration)
    where
        Self: Sized,
    {
        let start = self.now();
        let value = f();
        (value, self.now().saturating_sub(start))
    }
}

/// Wall-clock time from [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests.
///
/// Time moves only through [`advance`](Self::advance), plus a fixed `step`
/// after every reading when built with [`ticking`](Self::ticking). With a
/// step of `s`, any start/stop pair measures exactly `s`.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
    step: u64,
}

impl ManualClock {
    /// Frozen at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances by `step` after each `now()`.
    pub fn ticking(step: Duration) -> Self {
        Self {
            nanos: AtomicU64::new(0),
            step: step.as_nanos() as u64,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.fetch_add(self.step, Ordering::SeqCst))
    }
}
