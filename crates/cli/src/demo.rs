// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event types available to scenario files

tickbus::event_kinds! {
    /// Events a scripted front panel and sensor board can raise
    pub enum DemoEvent {
        ButtonPressed => "button:pressed",
        ButtonReleased => "button:released",
        SensorSample => "sensor:sample",
        TimerExpired => "timer:expired",
        Fault => "fault",
    }
}
