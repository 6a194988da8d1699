// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tick source for stamping and releasing events
//!
//! The bus never reads wall time directly. Every enqueue and every dispatcher
//! pass asks a [`Clock`] for the current [`Tick`], which keeps dispatch
//! deterministic under test.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time value in milliseconds
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Tick `duration` later, saturating at `u64::MAX` milliseconds
    pub fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration_millis(duration)))
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    pub fn saturating_since(self, earlier: Tick) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// A source of the current tick
///
/// Implementations must be non-decreasing.
pub trait Clock {
    fn now(&self) -> Tick;
}

/// Any `Fn() -> Tick` works as a clock, e.g. a wrapper around a hardware
/// tick counter.
impl<F> Clock for F
where
    F: Fn() -> Tick,
{
    fn now(&self) -> Tick {
        self()
    }
}

/// Real clock: milliseconds elapsed since the clock was created
#[derive(Clone, Debug)]
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
    fn now(&self) -> Tick {
        Tick(duration_millis(self.origin.elapsed()))
    }
}

/// Fake clock for testing with controllable time
///
/// Clones share the same counter, so a test can keep one handle while the bus
/// owns another.
#[derive(Clone, Debug, Default)]
pub struct FakeClock {
    current: Arc<AtomicU64>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at a specific tick
    pub fn starting_at(tick: Tick) -> Self {
        Self {
            current: Arc::new(AtomicU64::new(tick.0)),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let millis = duration_millis(duration);
        // fetch_update only fails when the closure returns None
        let _ = self
            .current
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| {
                Some(t.saturating_add(millis))
            });
    }

    /// Set the clock to a specific tick
    ///
    /// Moving the clock backwards breaks the monotonic contract; callers in
    /// tests use this only to jump forward.
    pub fn set(&self, tick: Tick) {
        self.current.store(tick.0, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Tick {
        Tick(self.current.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
