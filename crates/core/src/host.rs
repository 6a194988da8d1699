// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Polling host loop
//!
//! Drives a bus the way a firmware main loop would: poll producers, run the
//! dispatcher, pause, repeat.

use crate::bus::{DispatchReport, EventBus};
use crate::config::HostConfig;
use crate::kind::EventKind;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable flag that asks a running [`HostLoop`] to stop
///
/// This is the one piece meant to cross threads, e.g. from a signal handler.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Why the loop returned
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The stop handle was triggered
    Stopped,
    /// The poll callback returned `ControlFlow::Break`
    PollFinished,
    /// `max_iterations` passes have run
    IterationLimit,
}

/// Totals across every pass of one [`HostLoop::run`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostStats {
    pub iterations: u64,
    pub dispatched: u64,
    pub skipped: u64,
    pub invocations: u64,
    pub reason: StopReason,
}

impl HostStats {
    fn new() -> Self {
        Self {
            iterations: 0,
            dispatched: 0,
            skipped: 0,
            invocations: 0,
            reason: StopReason::Stopped,
        }
    }

    fn record(&mut self, report: &DispatchReport) {
        self.iterations += 1;
        self.dispatched += report.dispatched as u64;
        self.skipped += report.skipped as u64;
        self.invocations += report.invocations as u64;
    }
}

pub struct HostLoop {
    config: HostConfig,
    stop: StopHandle,
}

impl HostLoop {
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            stop: StopHandle::default(),
        }
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Run until stopped
    ///
    /// Each iteration calls `poll` (producers enqueue here), then runs one
    /// dispatcher pass. `poll` is called before the first pass too, while the
    /// bus may still be inactive.
    pub fn run<E, P>(&self, bus: &mut EventBus<E>, mut poll: P) -> HostStats
    where
        E: EventKind,
        P: FnMut(&mut EventBus<E>, u64) -> ControlFlow<()>,
    {
        let mut stats = HostStats::new();
        tracing::info!(
            poll_interval = ?self.config.poll_interval,
            max_iterations = ?self.config.max_iterations,
            "host loop started"
        );

        loop {
            if self.stop.is_stopped() {
                stats.reason = StopReason::Stopped;
                break;
            }
            if self
                .config
                .max_iterations
                .is_some_and(|max| stats.iterations >= max)
            {
                stats.reason = StopReason::IterationLimit;
                break;
            }

            if poll(&mut *bus, stats.iterations).is_break() {
                stats.reason = StopReason::PollFinished;
                break;
            }

            let report = bus.run_dispatcher();
            stats.record(&report);
            if report.dispatched > 0 {
                tracing::debug!(
                    iteration = stats.iterations,
                    now = %report.now,
                    dispatched = report.dispatched,
                    pending = report.pending,
                    "dispatcher pass"
                );
            }

            if !self.config.poll_interval.is_zero() {
                std::thread::sleep(self.config.poll_interval);
            }
        }

        tracing::info!(
            iterations = stats.iterations,
            dispatched = stats.dispatched,
            reason = ?stats.reason,
            "host loop finished"
        );
        stats
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
