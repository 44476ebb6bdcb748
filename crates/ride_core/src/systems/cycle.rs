//! Ride cycle systems: board at each timetabled departure, finalize riders when
//! the cycle ends.

use bevy_ecs::prelude::{Res, ResMut};
use tracing::{debug, warn};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::queue::RideQueue;
use crate::server::BatchServer;
use crate::telemetry::RideTelemetry;

/// Handles CycleStart(k): boards up to capacity from the queue head, schedules
/// this batch's completion and the next departure, both one cycle later.
pub fn cycle_start_system(
    mut clock: ResMut<SimulationClock>,
    mut server: ResMut<BatchServer>,
    mut queue: ResMut<RideQueue>,
    mut telemetry: ResMut<RideTelemetry>,
    event: Res<CurrentEvent>,
) {
    if event.0.kind != EventKind::CycleStart {
        return;
    }
    let Some(index) = event.0.cycle_index() else {
        warn!(at_ms = event.0.timestamp, "cycle start without a cycle index");
        return;
    };

    let now = clock.now();
    let boarded = queue.board(server.capacity(), now, server.cycle_duration_ms());
    let boarded_count = boarded.len();
    telemetry.record_cycle(index, now, boarded_count);
    telemetry.record_queue_sample(now, queue.len());

    let end_ms = server.start_cycle(index, now, boarded);
    debug!(
        cycle = index,
        now_ms = now,
        boarded = boarded_count,
        queue_len = queue.len(),
        "cycle started"
    );

    // Completion is enqueued before the next start so that, at the shared
    // timestamp, the finishing batch is finalized first.
    clock.schedule_at(end_ms, EventKind::CycleComplete, Some(EventSubject::Cycle(index)));
    let next_start = server.cycle_start_time(index + 1);
    clock.schedule_at(next_start, EventKind::CycleStart, Some(EventSubject::Cycle(index + 1)));
}

/// Handles CycleComplete(k): every rider of batch k becomes a completed record.
pub fn cycle_complete_system(
    mut server: ResMut<BatchServer>,
    mut telemetry: ResMut<RideTelemetry>,
    event: Res<CurrentEvent>,
) {
    if event.0.kind != EventKind::CycleComplete {
        return;
    }
    let Some(index) = event.0.cycle_index() else {
        warn!(at_ms = event.0.timestamp, "cycle completion without a cycle index");
        return;
    };
    let Some(batch) = server.complete_cycle(index) else {
        warn!(cycle = index, "completion for a cycle that is not in flight");
        return;
    };

    for customer in &batch.customers {
        telemetry.record_completion(customer, batch.cycle);
    }
}
