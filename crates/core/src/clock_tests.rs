// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_is_non_decreasing() {
    let clock = SystemClock::new();
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(2));
    let t2 = clock.now();
    assert!(t2 >= t1);
    assert!(t2.as_millis() >= 1);
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    assert_eq!(clock.now(), Tick::ZERO);
    clock.advance(Duration::from_millis(250));
    assert_eq!(clock.now(), Tick(250));
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::starting_at(Tick(10));
    let clock2 = clock1.clone();
    clock2.advance(Duration::from_secs(1));
    assert_eq!(clock1.now(), Tick(1010));

    clock1.set(Tick(5000));
    assert_eq!(clock2.now(), Tick(5000));
}

#[test]
fn closures_are_clocks() {
    let clock = || Tick(42);
    assert_eq!(Clock::now(&clock), Tick(42));
}

#[test]
fn tick_arithmetic_saturates() {
    let tick = Tick(u64::MAX - 1);
    assert_eq!(tick.saturating_add(Duration::from_millis(10)), Tick(u64::MAX));
    assert_eq!(Tick(5).saturating_since(Tick(10)), Duration::ZERO);
    assert_eq!(Tick(15).saturating_since(Tick(10)), Duration::from_millis(5));
}

#[test]
fn tick_displays_as_millis() {
    assert_eq!(Tick(1500).to_string(), "1500ms");
}
