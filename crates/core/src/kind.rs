// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Closed set of event types
//!
//! The set of event types is fixed at build time. Declare it with
//! [`event_kinds!`](crate::event_kinds), which generates a fieldless enum and
//! its [`EventKind`] implementation:
//!
//! ```
//! tickbus::event_kinds! {
//!     /// Events raised by the front panel
//!     pub enum PanelEvent {
//!         ButtonPressed => "button:pressed",
//!         ButtonReleased => "button:released",
//!     }
//! }
//!
//! use tickbus::EventKind;
//! assert_eq!(PanelEvent::ButtonReleased.index(), 1);
//! assert_eq!(PanelEvent::from_name("button:pressed"), Some(PanelEvent::ButtonPressed));
//! ```

use std::fmt::Debug;

/// A member of a closed, compile-time enumeration of event types
pub trait EventKind: Copy + Eq + Debug + 'static {
    /// Every event type, in declaration order
    const ALL: &'static [Self];

    /// Dense index of this type, unique and below `ALL.len()`
    fn index(self) -> usize;

    /// Stable name used in logs and scenario files
    fn name(self) -> &'static str;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    fn count() -> usize {
        Self::ALL.len()
    }
}

/// Declare an event type enumeration and implement [`EventKind`] for it.
///
/// Each variant is paired with its stable name. Explicit discriminants are not
/// accepted, so `index()` is always the declaration position.
#[macro_export]
macro_rules! event_kinds {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::EventKind for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn index(self) -> usize {
                self as usize
            }

            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::EventKind::name(*self))
            }
        }
    };
}

#[cfg(test)]
#[path = "kind_tests.rs"]
mod tests;
