// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus: queue, listener registry and dispatcher in one instance
//!
//! The bus is built for a single cooperative control loop. Producers call
//! [`EventBus::add_event`]; the host loop calls [`EventBus::run_dispatcher`]
//! repeatedly. Nothing here locks or blocks, and the bus is not `Send`:
//! callers sharing it with an interrupt-like context must provide their own
//! exclusion.

use crate::clock::{Clock, Tick};
use crate::config::BusConfig;
use crate::error::BusError;
use crate::event::{Event, EventId};
use crate::kind::EventKind;
use crate::listener::{Listener, ListenerRegistry, Registration};
use crate::queue::EventQueue;

/// Dispatcher activation state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatcherState {
    /// The dispatcher has never run; events are rejected
    Inactive,
    /// The dispatcher has run at least once; stays active for good
    Active,
}

/// Summary of one dispatcher pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Tick captured at the start of the pass
    pub now: Tick,
    /// Events handed to their listeners and released
    pub dispatched: usize,
    /// Due events removed by a listener before their turn came
    pub skipped: usize,
    /// Total listener calls
    pub invocations: usize,
    /// Events still queued after the pass
    pub pending: usize,
}

/// In-process publish/subscribe bus
pub struct EventBus<E: EventKind> {
    queue: EventQueue<E>,
    listeners: ListenerRegistry<E>,
    clock: Box<dyn Clock>,
    state: DispatcherState,
}

impl<E: EventKind> EventBus<E> {
    pub fn new(config: &BusConfig, clock: impl Clock + 'static) -> Result<Self, BusError> {
        Self::with_capacity(config.capacity, clock)
    }

    /// Create a bus whose queue holds at most `capacity` events
    pub fn with_capacity(capacity: usize, clock: impl Clock + 'static) -> Result<Self, BusError> {
        Ok(Self {
            queue: EventQueue::new(capacity)?,
            listeners: ListenerRegistry::new(),
            clock: Box::new(clock),
            state: DispatcherState::Inactive,
        })
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == DispatcherState::Active
    }

    /// Current tick according to the bus clock
    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    // -- events --

    /// Enqueue an event stamped with the current tick
    ///
    /// The payload is copied; the caller keeps no obligation towards the
    /// original buffer. Fails without touching the queue if the dispatcher
    /// has not run yet, the queue is full, or the copy cannot be allocated.
    pub fn add_event(&mut self, kind: E, payload: Option<&[u8]>) -> Result<EventId, BusError> {
        if !self.is_active() {
            tracing::debug!(kind = kind.name(), "event rejected: bus inactive");
            return Err(BusError::Inactive);
        }

        let tick = self.clock.now();
        match self.queue.push(kind, tick, payload) {
            Ok(id) => {
                tracing::debug!(
                    %id,
                    kind = kind.name(),
                    %tick,
                    bytes = payload.map_or(0, <[u8]>::len),
                    depth = self.queue.len(),
                    "event queued"
                );
                Ok(id)
            }
            Err(e) => {
                tracing::warn!(kind = kind.name(), error = %e, "event dropped");
                Err(e)
            }
        }
    }

    /// Bus-owned copy of an event's payload
    pub fn payload(&self, id: EventId) -> Option<&[u8]> {
        self.queue.get(id).and_then(Event::payload)
    }

    pub fn event(&self, id: EventId) -> Option<&Event<E>> {
        self.queue.get(id)
    }

    /// Pending events in dispatch order
    pub fn events(&self) -> impl Iterator<Item = &Event<E>> {
        self.queue.iter()
    }

    /// Remove the oldest pending event
    pub fn remove_front(&mut self) -> Option<EventId> {
        self.queue.remove_front()
    }

    /// Remove the newest pending event
    pub fn remove_back(&mut self) -> Option<EventId> {
        self.queue.remove_back()
    }

    /// Remove a pending event by handle; false if it is no longer queued
    pub fn remove_event(&mut self, id: EventId) -> bool {
        self.queue.remove(id)
    }

    /// Number of live events, including one being dispatched
    pub fn count(&self) -> usize {
        self.queue.len()
    }

    pub fn capacity(&self) -> usize {
        self.queue.capacity()
    }

    // -- listeners --

    pub fn add_listener(
        &mut self,
        kind: E,
        listener: &Listener<E>,
    ) -> Result<Registration, BusError> {
        let registration = self.listeners.add(kind, listener)?;
        tracing::debug!(
            kind = kind.name(),
            ?registration,
            listeners = self.listeners.len(kind),
            "listener registered"
        );
        Ok(registration)
    }

    /// Wrap `callback` in a [`Listener`], register it for `kind` and return
    /// the handle for later removal.
    pub fn on(
        &mut self,
        kind: E,
        callback: impl Fn(&mut EventBus<E>, &Event<E>) + 'static,
    ) -> Result<Listener<E>, BusError> {
        let listener = Listener::new(callback);
        self.add_listener(kind, &listener)?;
        Ok(listener)
    }

    pub fn remove_listener_front(&mut self, kind: E) -> Option<Listener<E>> {
        self.listeners.remove_front(kind)
    }

    pub fn remove_listener_back(&mut self, kind: E) -> Option<Listener<E>> {
        self.listeners.remove_back(kind)
    }

    pub fn remove_listener(&mut self, kind: E, listener: &Listener<E>) -> bool {
        self.listeners.remove(kind, listener)
    }

    pub fn remove_all_listeners(&mut self, kind: E) -> usize {
        self.listeners.remove_all(kind)
    }

    pub fn listener_count(&self, kind: E) -> usize {
        self.listeners.len(kind)
    }

    pub fn has_listener(&self, kind: E, listener: &Listener<E>) -> bool {
        self.listeners.contains(kind, listener)
    }

    // -- dispatch --

    /// Run one dispatcher pass
    ///
    /// Activates the bus on first call. Every event queued at the start of
    /// the pass with a tick at or before "now" is handed, in FIFO order, to
    /// the listeners registered for its type, then released. The event in
    /// flight still occupies its queue slot and counts towards [`count`](Self::count),
    /// but is no longer reachable by id. Events enqueued
    /// by listeners wait for the next pass. A listener that removes a later
    /// due event cancels its dispatch. Listener changes apply from the next
    /// event onwards.
    pub fn run_dispatcher(&mut self) -> DispatchReport {
        if self.state == DispatcherState::Inactive {
            self.state = DispatcherState::Active;
            tracing::info!(capacity = self.capacity(), "event bus activated");
        }

        let now = self.clock.now();
        let due = self.queue.due_ids(now);
        let mut report = DispatchReport {
            now,
            ..DispatchReport::default()
        };

        for id in due {
            let Some(event) = self.queue.check_out(id) else {
                report.skipped += 1;
                continue;
            };

            let listeners = self.listeners.snapshot(event.kind());
            for listener in &listeners {
                listener.call(self, &event);
            }

            tracing::trace!(
                id = %event.id(),
                kind = event.kind().name(),
                tick = %event.tick(),
                listeners = listeners.len(),
                "event dispatched"
            );
            report.dispatched += 1;
            report.invocations += listeners.len();
            self.queue.release(event);
        }

        report.pending = self.queue.len();
        report
    }
}

impl<E: EventKind> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("state", &self.state)
            .field("queue", &self.queue)
            .field("listeners", &self.listeners)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
