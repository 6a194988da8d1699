// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queued events and their handles

use crate::clock::Tick;
use crate::error::BusError;
use crate::kind::EventKind;
use std::fmt;

/// Handle to a queued event
///
/// Ids are handed out in enqueue order and never reused by the queue that
/// issued them, so a stale handle can never alias a newer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub(crate) u64);

impl EventId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ev-{}", self.0)
    }
}

/// An event owned by the bus
///
/// The payload is a private copy of the bytes handed to `add_event`. It is
/// dropped together with the event.
#[derive(Debug, PartialEq, Eq)]
pub struct Event<E: EventKind> {
    id: EventId,
    kind: E,
    tick: Tick,
    payload: Option<Box<[u8]>>,
}

impl<E: EventKind> Event<E> {
    pub(crate) fn new(
        id: EventId,
        kind: E,
        tick: Tick,
        payload: Option<&[u8]>,
    ) -> Result<Self, BusError> {
        let payload = payload.map(copy_payload).transpose()?;
        Ok(Self {
            id,
            kind,
            tick,
            payload,
        })
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn kind(&self) -> E {
        self.kind
    }

    /// Tick at which the event was enqueued
    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Payload interpreted as UTF-8, if present and valid
    pub fn payload_str(&self) -> Option<&str> {
        self.payload().and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    /// Whether the event may be dispatched at `now`
    pub fn is_due(&self, now: Tick) -> bool {
        self.tick <= now
    }
}

fn copy_payload(bytes: &[u8]) -> Result<Box<[u8]>, BusError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())
        .map_err(|_| BusError::Allocation { bytes: bytes.len() })?;
    buf.extend_from_slice(bytes);
    Ok(buf.into_boxed_slice())
}
