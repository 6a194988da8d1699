// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::testing::Sensor;

fn queue_with(ticks: &[u64]) -> (EventQueue<Sensor>, Vec<EventId>) {
    let mut queue = EventQueue::new(16).unwrap();
    let ids = ticks
        .iter()
        .map(|t| queue.push(Sensor::Sample, Tick(*t), None).unwrap())
        .collect();
    (queue, ids)
}

#[test]
fn queue_starts_empty() {
    let queue: EventQueue<Sensor> = EventQueue::new(4).unwrap();
    assert!(queue.is_empty());
    assert_eq!(queue.len(), 0);
    assert_eq!(queue.capacity(), 4);
    assert!(queue.front().is_none());
}

#[test]
fn push_copies_payload() {
    let mut queue = EventQueue::new(4).unwrap();
    let mut data = b"hello".to_vec();
    let id = queue.push(Sensor::Alarm, Tick(3), Some(data.as_slice())).unwrap();

    data.clear();

    let event = queue.get(id).unwrap();
    assert_eq!(event.payload(), Some(&b"hello"[..]));
    assert_eq!(event.payload_str(), Some("hello"));
    assert_eq!(event.kind(), Sensor::Alarm);
    assert_eq!(event.tick(), Tick(3));
}

#[test]
fn push_without_payload() {
    let mut queue = EventQueue::new(4).unwrap();
    let id = queue.push(Sensor::Fault, Tick(0), None).unwrap();
    assert_eq!(queue.get(id).unwrap().payload(), None);
}

#[test]
fn push_rejects_when_full_without_mutation() {
    let mut queue = EventQueue::new(2).unwrap();
    queue.push(Sensor::Sample, Tick(0), None).unwrap();
    queue.push(Sensor::Sample, Tick(0), None).unwrap();

    let err = queue.push(Sensor::Alarm, Tick(0), Some(b"x".as_slice())).unwrap_err();

    assert_eq!(err, BusError::CapacityExceeded { capacity: 2 });
    assert_eq!(queue.len(), 2);
    assert!(queue.iter().all(|e| e.kind() == Sensor::Sample));
}

#[test]
fn zero_capacity_rejects_everything() {
    let mut queue = EventQueue::new(0).unwrap();
    assert!(queue.is_full());
    assert!(queue.push(Sensor::Sample, Tick(0), None).is_err());
}

#[test]
fn ids_are_never_reused() {
    let mut queue = EventQueue::new(1).unwrap();
    let first = queue.push(Sensor::Sample, Tick(0), None).unwrap();
    queue.remove_front();
    let second = queue.push(Sensor::Sample, Tick(0), None).unwrap();
    assert_ne!(first, second);
    assert!(!queue.remove(first));
    assert!(queue.contains(second));
}

#[test]
fn remove_front_is_fifo() {
    let (mut queue, ids) = queue_with(&[1, 2, 3]);
    assert_eq!(queue.remove_front(), Some(ids[0]));
    assert_eq!(queue.front().map(Event::id), Some(ids[1]));
    assert_eq!(queue.len(), 2);
}

#[test]
fn remove_back_takes_tail() {
    let (mut queue, ids) = queue_with(&[1, 2, 3]);
    assert_eq!(queue.remove_back(), Some(ids[2]));
    assert_eq!(queue.back().map(Event::id), Some(ids[1]));
}

#[test]
fn removals_on_empty_queue_are_noops() {
    let mut queue: EventQueue<Sensor> = EventQueue::new(4).unwrap();
    assert_eq!(queue.remove_front(), None);
    assert_eq!(queue.remove_back(), None);
    assert!(!queue.remove(EventId(1)));
    assert_eq!(queue.len(), 0);
}

#[test]
fn remove_by_reference_unlinks_middle() {
    let (mut queue, ids) = queue_with(&[1, 2, 3]);
    assert!(queue.remove(ids[1]));
    let remaining: Vec<_> = queue.iter().map(Event::id).collect();
    assert_eq!(remaining, vec![ids[0], ids[2]]);
    assert!(!queue.remove(ids[1]));
}

#[test]
fn take_hands_over_event() {
    let mut queue = EventQueue::new(4).unwrap();
    let id = queue.push(Sensor::Alarm, Tick(9), Some(b"payload".as_slice())).unwrap();
    let event = queue.take(id).unwrap();
    assert_eq!(event.payload(), Some(&b"payload"[..]));
    assert!(queue.is_empty());
}

#[test]
fn checked_out_event_keeps_its_slot_until_released() {
    let mut queue = EventQueue::new(2).unwrap();
    let first = queue.push(Sensor::Sample, Tick(1), None).unwrap();
    queue.push(Sensor::Alarm, Tick(2), None).unwrap();

    let event = queue.check_out(first).unwrap();
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.in_flight(), 1);
    assert!(queue.is_full());
    assert!(!queue.contains(first));
    assert_eq!(
        queue.push(Sensor::Fault, Tick(3), None),
        Err(BusError::CapacityExceeded { capacity: 2 })
    );

    queue.release(event);
    assert_eq!(queue.len(), 1);
    assert_eq!(queue.in_flight(), 0);
    assert!(queue.push(Sensor::Fault, Tick(3), None).is_ok());
}

#[test]
fn check_out_of_unknown_id_reserves_nothing() {
    let (mut queue, ids) = queue_with(&[1]);
    queue.remove(ids[0]);
    assert!(queue.check_out(ids[0]).is_none());
    assert_eq!(queue.in_flight(), 0);
    assert!(queue.is_empty());
}

#[test]
fn unreservable_capacity_is_an_allocation_error() {
    let err = EventQueue::<Sensor>::new(usize::MAX).unwrap_err();
    assert!(matches!(err, BusError::Allocation { .. }));
}

use yare::parameterized;

#[parameterized(
    nothing_due = { &[5, 6, 7], 4, 0 },
    boundary_is_due = { &[5, 6, 7], 5, 1 },
    some_due = { &[1, 2, 9], 3, 2 },
    all_due = { &[1, 2, 3], 100, 3 },
    stops_at_first_future = { &[1, 10, 2], 5, 1 },
    equal_ticks = { &[4, 4, 4], 4, 3 },
)]
fn due_ids_counts(ticks: &[u64], now: u64, expected: usize) {
    let (queue, ids) = queue_with(ticks);
    let due = queue.due_ids(Tick(now));
    assert_eq!(due.len(), expected);
    assert_eq!(due, ids[..expected].to_vec());
}

// Property-based tests
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(u64),
    RemoveFront,
    RemoveBack,
    RemoveNth(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..100u64).prop_map(Op::Push),
        1 => Just(Op::RemoveFront),
        1 => Just(Op::RemoveBack),
        1 => (0..8usize).prop_map(Op::RemoveNth),
    ]
}

proptest! {
    #[test]
    fn len_tracks_adds_minus_removes(ops in proptest::collection::vec(arb_op(), 0..60)) {
        let mut queue = EventQueue::new(8).unwrap();
        let mut expected = 0usize;

        for op in ops {
            match op {
                Op::Push(t) => {
                    if queue.push(Sensor::Sample, Tick(t), None).is_ok() {
                        expected += 1;
                    } else {
                        prop_assert_eq!(expected, 8);
                    }
                }
                Op::RemoveFront => {
                    if queue.remove_front().is_some() {
                        expected -= 1;
                    }
                }
                Op::RemoveBack => {
                    if queue.remove_back().is_some() {
                        expected -= 1;
                    }
                }
                Op::RemoveNth(n) => {
                    let id = queue.iter().nth(n).map(Event::id);
                    if let Some(id) = id {
                        prop_assert!(queue.remove(id));
                        expected -= 1;
                    }
                }
            }
            prop_assert_eq!(queue.len(), expected);
            prop_assert!(queue.len() <= queue.capacity());
        }
    }

    #[test]
    fn insertion_order_is_preserved(ticks in proptest::collection::vec(0..50u64, 0..16)) {
        let mut sorted = ticks.clone();
        sorted.sort_unstable();

        let (queue, ids) = queue_with(&sorted);
        let order: Vec<_> = queue.iter().map(Event::id).collect();
        prop_assert_eq!(order, ids);
    }
}
