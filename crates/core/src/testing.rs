// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for unit tests

crate::event_kinds! {
    pub(crate) enum Sensor {
        Sample => "sensor:sample",
        Alarm => "sensor:alarm",
        Fault => "sensor:fault",
    }
}
