// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-capacity FIFO of pending events
//!
//! Storage is a ring buffer allocated once, at construction, for the full
//! capacity. Pushing never grows it; a full queue rejects the push instead.
//! Events checked out for dispatch keep their slot until they are released.

use crate::clock::Tick;
use crate::error::BusError;
use crate::event::{Event, EventId};
use crate::kind::EventKind;
use std::collections::VecDeque;

/// Pending events in enqueue order
#[derive(Debug)]
pub struct EventQueue<E: EventKind> {
    events: VecDeque<Event<E>>,
    capacity: usize,
    in_flight: usize,
    next_id: u64,
}

impl<E: EventKind> EventQueue<E> {
    /// Create an empty queue holding at most `capacity` events
    ///
    /// Fails with [`BusError::Allocation`] if the ring buffer cannot be
    /// reserved up front.
    pub fn new(capacity: usize) -> Result<Self, BusError> {
        let mut events = VecDeque::new();
        events
            .try_reserve_exact(capacity)
            .map_err(|_| BusError::Allocation {
                bytes: capacity.saturating_mul(std::mem::size_of::<Event<E>>()),
            })?;
        Ok(Self {
            events,
            capacity,
            in_flight: 0,
            next_id: 1,
        })
    }

    /// Live events: queued plus checked out for dispatch
    pub fn len(&self) -> usize {
        self.events.len() + self.in_flight
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Events checked out and not yet released
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Append an event to the tail, copying `payload` into queue-owned storage
    pub fn push(
        &mut self,
        kind: E,
        tick: Tick,
        payload: Option<&[u8]>,
    ) -> Result<EventId, BusError> {
        if self.is_full() {
            return Err(BusError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let id = EventId(self.next_id);
        let event = Event::new(id, kind, tick, payload)?;
        self.next_id += 1;
        self.events.push_back(event);
        Ok(id)
    }

    /// Remove the head event, releasing its payload
    pub fn remove_front(&mut self) -> Option<EventId> {
        self.events.pop_front().map(|event| event.id())
    }

    /// Remove the tail event, releasing its payload
    pub fn remove_back(&mut self) -> Option<EventId> {
        self.events.pop_back().map(|event| event.id())
    }

    /// Remove an arbitrary event by handle
    ///
    /// Returns false if no queued event has this id.
    pub fn remove(&mut self, id: EventId) -> bool {
        self.take(id).is_some()
    }

    /// Unlink an event and hand it over to the caller
    pub fn take(&mut self, id: EventId) -> Option<Event<E>> {
        let position = self.position(id)?;
        self.events.remove(position)
    }

    /// Unlink an event for dispatch while it keeps counting against capacity
    ///
    /// The event is no longer reachable by id; hand it back with
    /// [`EventQueue::release`] once its listeners have run.
    pub fn check_out(&mut self, id: EventId) -> Option<Event<E>> {
        let event = self.take(id)?;
        self.in_flight += 1;
        Some(event)
    }

    /// Free a checked-out event and its slot
    pub fn release(&mut self, event: Event<E>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        drop(event);
    }

    pub fn front(&self) -> Option<&Event<E>> {
        self.events.front()
    }

    pub fn back(&self) -> Option<&Event<E>> {
        self.events.back()
    }

    pub fn get(&self, id: EventId) -> Option<&Event<E>> {
        self.position(id).and_then(|position| self.events.get(position))
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event<E>> {
        self.events.iter()
    }

    /// Ids of the leading events whose tick is at or before `now`
    ///
    /// Scanning stops at the first event that is not yet due, so a later event
    /// with an earlier tick never overtakes it.
    pub fn due_ids(&self, now: Tick) -> Vec<EventId> {
        self.events
            .iter()
            .take_while(|event| event.is_due(now))
            .map(Event::id)
            .collect()
    }

    fn position(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|event| event.id() == id)
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
