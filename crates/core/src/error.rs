// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for bus operations

use thiserror::Error;

/// Errors returned by event bus operations
///
/// Removing something that is not there is not an error; those operations
/// report `None` or `false` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    #[error("event bus is inactive: run the dispatcher once before adding events")]
    Inactive,
    #[error("event queue is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
    #[error("failed to allocate {bytes} bytes")]
    Allocation { bytes: usize },
    #[error("event type {kind} has index {index}, outside its declared set")]
    UnknownKind { kind: &'static str, index: usize },
}

impl BusError {
    /// True for errors caused by the queue or the allocator running out of
    /// room, as opposed to calling the bus in the wrong state.
    pub fn is_backpressure(&self) -> bool {
        matches!(
            self,
            BusError::CapacityExceeded { .. } | BusError::Allocation { .. }
        )
    }
}
