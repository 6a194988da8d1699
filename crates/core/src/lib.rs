// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! tickbus: in-process event bus for cooperative control loops
//!
//! This crate provides:
//! - A fixed-capacity FIFO of tick-stamped events with owned payloads
//! - Per-type listener registries over a closed set of event types
//! - A dispatcher that drains due events once per host-loop pass
//! - A polling host loop and TOML configuration
//!
//! ```
//! use tickbus::{EventBus, FakeClock};
//!
//! tickbus::event_kinds! {
//!     pub enum Panel {
//!         Button => "panel:button",
//!     }
//! }
//!
//! let mut bus = EventBus::with_capacity(8, FakeClock::new())?;
//! bus.run_dispatcher(); // activates the bus
//!
//! bus.on(Panel::Button, |_, event| {
//!     assert_eq!(event.payload(), Some(&b"down"[..]));
//! })?;
//! bus.add_event(Panel::Button, Some(b"down".as_slice()))?;
//!
//! let report = bus.run_dispatcher();
//! assert_eq!(report.dispatched, 1);
//! assert_eq!(bus.count(), 0);
//! # Ok::<(), tickbus::BusError>(())
//! ```

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod clock;
pub mod config;
pub mod error;
pub mod kind;

// Bus components (order matters for dependencies)
pub mod event;
pub mod queue;
pub mod listener;
pub mod bus;
pub mod host;

#[cfg(test)]
mod testing;

// Re-exports
pub use bus::{DispatchReport, DispatcherState, EventBus};
pub use clock::{Clock, FakeClock, SystemClock, Tick};
pub use config::{BusConfig, Config, ConfigError, HostConfig};
pub use error::BusError;
pub use event::{Event, EventId};
pub use host::{HostLoop, HostStats, StopHandle, StopReason};
pub use kind::EventKind;
pub use listener::{Listener, ListenerFn, ListenerRegistry, Registration};
pub use queue::EventQueue;
