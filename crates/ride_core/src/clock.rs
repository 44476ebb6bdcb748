//! Discrete-event clock: a min-heap of timestamped events.
//!
//! Time is an integer count of milliseconds since simulation start. Events with
//! equal timestamps pop in the order they were scheduled, so a run is fully
//! determined by its seed and scenario.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use bevy_ecs::prelude::Resource;

pub const ONE_SEC_MS: u64 = 1000;
pub const ONE_HOUR_MS: u64 = 60 * 60 * ONE_SEC_MS;

/// Convert seconds to simulation milliseconds (rounded to the nearest ms).
pub fn secs_to_ms(secs: f64) -> u64 {
    if !secs.is_finite() || secs <= 0.0 {
        return 0;
    }
    (secs * ONE_SEC_MS as f64).round() as u64
}

/// Convert simulation milliseconds to seconds.
pub fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / ONE_SEC_MS as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    SimulationStarted,
    CustomerArrival,
    CycleStart,
    CycleComplete,
}

impl EventKind {
    /// Completions of batches that were admitted before the horizon still fire.
    pub fn runs_past_horizon(self) -> bool {
        matches!(self, EventKind::CycleComplete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSubject {
    /// Zero-based index of the ride cycle the event belongs to.
    Cycle(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    /// Insertion order; breaks ties between equal timestamps.
    pub seq: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
}

impl Event {
    pub fn cycle_index(&self) -> Option<u64> {
        match self.subject {
            Some(EventSubject::Cycle(index)) => Some(index),
            None => None,
        }
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap by (timestamp, seq).
        other
            .timestamp
            .cmp(&self.timestamp)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The event currently being dispatched by the runner.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_seq: u64,
    events: BinaryHeap<Event>,
    horizon_ms: Option<u64>,
    discarded: u64,
}

impl SimulationClock {
    /// Clock that refuses events scheduled after `horizon_ms`
    /// (except kinds that [EventKind::runs_past_horizon]).
    pub fn with_horizon(horizon_ms: u64) -> Self {
        Self {
            horizon_ms: Some(horizon_ms),
            ..Default::default()
        }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn horizon_ms(&self) -> Option<u64> {
        self.horizon_ms
    }

    /// Schedule an event at an absolute timestamp. Returns `false` when the event
    /// falls beyond the horizon and was discarded instead of enqueued.
    pub fn schedule_at(
        &mut self,
        timestamp: u64,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) -> bool {
        debug_assert!(
            timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        if let Some(horizon) = self.horizon_ms {
            if timestamp > horizon && !kind.runs_past_horizon() {
                self.discarded += 1;
                return false;
            }
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(Event {
            timestamp,
            seq,
            kind,
            subject,
        });
        true
    }

    pub fn schedule_in(
        &mut self,
        delay_ms: u64,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) -> bool {
        self.schedule_at(self.now.saturating_add(delay_ms), kind, subject)
    }

    pub fn schedule_in_secs(
        &mut self,
        delay_secs: u64,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) -> bool {
        self.schedule_in(delay_secs.saturating_mul(ONE_SEC_MS), kind, subject)
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek().map(|e| e.timestamp)
    }

    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    /// Events refused because they fell beyond the horizon.
    pub fn discarded_event_count(&self) -> u64 {
        self.discarded
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
