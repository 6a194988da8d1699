// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener handles and the per-type registry

use crate::bus::EventBus;
use crate::error::BusError;
use crate::event::Event;
use crate::kind::EventKind;
use std::fmt;
use std::rc::Rc;

/// Callback signature for listeners
///
/// Listeners get the bus back so they can enqueue follow-up events or change
/// registrations while a dispatch pass is running.
pub type ListenerFn<E> = dyn Fn(&mut EventBus<E>, &Event<E>);

/// Shared handle to a listener callback
///
/// Identity is the underlying allocation: clones of one `Listener` are the
/// same listener, two `Listener::new` calls with identical closures are not.
/// Keep a clone around to unregister it later.
pub struct Listener<E: EventKind> {
    callback: Rc<ListenerFn<E>>,
}

impl<E: EventKind> Listener<E> {
    pub fn new(callback: impl Fn(&mut EventBus<E>, &Event<E>) + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
        }
    }

    pub(crate) fn call(&self, bus: &mut EventBus<E>, event: &Event<E>) {
        (self.callback)(bus, event)
    }

    /// Whether `self` and `other` are the same listener
    pub fn same_as(&self, other: &Listener<E>) -> bool {
        // Compare data pointers only; vtable pointers are not unique
        std::ptr::addr_eq(Rc::as_ptr(&self.callback), Rc::as_ptr(&other.callback))
    }
}

impl<E: EventKind> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<E: EventKind> PartialEq for Listener<E> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<E: EventKind> Eq for Listener<E> {}

impl<E: EventKind> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Outcome of registering a listener
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// The listener was already registered for this type; nothing changed
    AlreadyRegistered,
}

/// Ordered listener collections, one per event type
#[derive(Debug)]
pub struct ListenerRegistry<E: EventKind> {
    slots: Vec<Vec<Listener<E>>>,
}

impl<E: EventKind> ListenerRegistry<E> {
    pub fn new() -> Self {
        Self {
            slots: (0..E::count()).map(|_| Vec::new()).collect(),
        }
    }

    /// Append `listener` to the collection for `kind` unless already present
    ///
    /// Fails with [`BusError::UnknownKind`] when `kind.index()` is not below
    /// `E::count()`.
    pub fn add(&mut self, kind: E, listener: &Listener<E>) -> Result<Registration, BusError> {
        let Some(slot) = self.slot_mut(kind) else {
            return Err(BusError::UnknownKind {
                kind: kind.name(),
                index: kind.index(),
            });
        };
        if slot.iter().any(|l| l.same_as(listener)) {
            return Ok(Registration::AlreadyRegistered);
        }

        slot.try_reserve(1).map_err(|_| BusError::Allocation {
            bytes: std::mem::size_of::<Listener<E>>(),
        })?;
        slot.push(listener.clone());
        Ok(Registration::Added)
    }

    pub fn remove_front(&mut self, kind: E) -> Option<Listener<E>> {
        let slot = self.slot_mut(kind)?;
        if slot.is_empty() {
            return None;
        }
        Some(slot.remove(0))
    }

    pub fn remove_back(&mut self, kind: E) -> Option<Listener<E>> {
        self.slot_mut(kind)?.pop()
    }

    /// Remove `listener` from the collection for `kind`
    ///
    /// Returns false when it was not registered, including when the
    /// collection is empty.
    pub fn remove(&mut self, kind: E, listener: &Listener<E>) -> bool {
        let Some(slot) = self.slot_mut(kind) else {
            return false;
        };
        match slot.iter().position(|l| l.same_as(listener)) {
            Some(position) => {
                slot.remove(position);
                true
            }
            None => false,
        }
    }

    /// Clear every listener for `kind`, returning how many were removed
    pub fn remove_all(&mut self, kind: E) -> usize {
        self.slot_mut(kind).map_or(0, |slot| {
            let removed = slot.len();
            slot.clear();
            removed
        })
    }

    pub fn len(&self, kind: E) -> usize {
        self.slot(kind).len()
    }

    pub fn is_empty(&self, kind: E) -> bool {
        self.slot(kind).is_empty()
    }

    pub fn contains(&self, kind: E, listener: &Listener<E>) -> bool {
        self.slot(kind).iter().any(|l| l.same_as(listener))
    }

    /// Listeners for `kind` in registration order
    pub fn listeners(&self, kind: E) -> &[Listener<E>] {
        self.slot(kind)
    }

    /// Owned copy of the collection for `kind`, unaffected by later changes
    pub fn snapshot(&self, kind: E) -> Vec<Listener<E>> {
        self.slot(kind).to_vec()
    }

    fn slot(&self, kind: E) -> &[Listener<E>] {
        self.slots
            .get(kind.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Slots are sized once from E::count(); an index outside that range has
    // no collection.
    fn slot_mut(&mut self, kind: E) -> Option<&mut Vec<Listener<E>>> {
        self.slots.get_mut(kind.index())
    }
}

impl<E: EventKind> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
