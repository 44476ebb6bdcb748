mod support;

use ride_core::clock::{secs_to_ms, EventKind, EventSubject, SimulationClock, ONE_SEC_MS};

#[test]
fn clock_pops_events_in_time_order() {
    let mut clock = SimulationClock::default();
    clock.schedule_at(20, EventKind::CustomerArrival, None);
    clock.schedule_at(5, EventKind::CustomerArrival, None);
    clock.schedule_at(20, EventKind::CycleStart, Some(EventSubject::Cycle(1)));
    clock.schedule_at(10, EventKind::CustomerArrival, None);

    let first = clock.pop_next().expect("first event");
    assert_eq!(first.timestamp, 5);
    assert_eq!(clock.now(), 5);

    let second = clock.pop_next().expect("second event");
    assert_eq!(second.timestamp, 10);
    assert_eq!(clock.now(), 10);

    let third = clock.pop_next().expect("third event");
    assert_eq!(third.timestamp, 20);
    assert_eq!(third.kind, EventKind::CustomerArrival);
    let fourth = clock.pop_next().expect("fourth event");
    assert_eq!(fourth.timestamp, 20);
    assert_eq!(fourth.kind, EventKind::CycleStart);
    assert_eq!(fourth.cycle_index(), Some(1));

    assert!(clock.pop_next().is_none());
    assert!(clock.is_empty());
}

#[test]
fn schedule_in_secs_converts_to_milliseconds() {
    let mut clock = SimulationClock::default();
    clock.schedule_in_secs(1, EventKind::CustomerArrival, None);
    let e = clock.pop_next().expect("event");
    assert_eq!(e.timestamp, ONE_SEC_MS);
    assert_eq!(clock.now(), ONE_SEC_MS);
    assert_eq!(secs_to_ms(276.0), 276 * ONE_SEC_MS);
}

#[test]
fn horizon_is_inclusive() {
    let horizon = secs_to_ms(28_800.0);
    let mut clock = SimulationClock::with_horizon(horizon);
    assert_eq!(clock.horizon_ms(), Some(horizon));

    assert!(clock.schedule_at(horizon, EventKind::CycleStart, Some(EventSubject::Cycle(104))));
    assert!(!clock.schedule_at(horizon + 1, EventKind::CustomerArrival, None));
    assert!(clock.schedule_at(
        horizon + 276_000,
        EventKind::CycleComplete,
        Some(EventSubject::Cycle(104))
    ));
    assert_eq!(clock.pending_event_count(), 2);
    assert_eq!(clock.discarded_event_count(), 1);

    let last = std::iter::from_fn(|| clock.pop_next()).last().expect("events");
    assert_eq!(last.kind, EventKind::CycleComplete);
    assert_eq!(clock.now(), horizon + 276_000);
}
