//! Arrival systems: kick off the run and feed visitors into the queue.

use bevy_ecs::prelude::{Res, ResMut};
use tracing::trace;

use crate::arrivals::ArrivalGenerator;
use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::queue::RideQueue;
use crate::telemetry::RideTelemetry;

/// Reacts to SimulationStarted: schedules cycle 0 at t=0 and the first arrival
/// one sampled interval later.
pub fn simulation_started_system(
    mut clock: ResMut<SimulationClock>,
    mut generator: ResMut<ArrivalGenerator>,
    event: Res<CurrentEvent>,
) {
    if event.0.kind != EventKind::SimulationStarted {
        return;
    }

    let now = clock.now();
    clock.schedule_at(now, EventKind::CycleStart, Some(EventSubject::Cycle(0)));

    let interval = generator.next_interval_ms();
    clock.schedule_in(interval, EventKind::CustomerArrival, None);
}

/// Appends the arriving customer to the queue tail and schedules the next
/// arrival. The clock drops that event if it lands beyond the horizon, which
/// ends the arrival stream.
pub fn arrival_system(
    mut clock: ResMut<SimulationClock>,
    mut generator: ResMut<ArrivalGenerator>,
    mut queue: ResMut<RideQueue>,
    mut telemetry: ResMut<RideTelemetry>,
    event: Res<CurrentEvent>,
) {
    if event.0.kind != EventKind::CustomerArrival {
        return;
    }

    let now = clock.now();
    let customer = generator.next_customer(now);
    queue.push_back(customer);
    telemetry.record_queue_sample(now, queue.len());
    trace!(now_ms = now, customer = customer.id, queue_len = queue.len(), "customer arrived");

    let interval = generator.next_interval_ms();
    clock.schedule_in(interval, EventKind::CustomerArrival, None);
}
