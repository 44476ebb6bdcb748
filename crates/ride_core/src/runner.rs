//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each step
//! pops the next event from [SimulationClock], inserts it as [CurrentEvent],
//! then runs the schedule. Run-time invariants (event order, cycle cadence,
//! batch capacity) are checked around every step; a violation aborts the run.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs};
use tracing::{debug, info, info_span, warn};

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock, ONE_SEC_MS};
use crate::error::{InvariantViolation, SimulationError};
use crate::profiling::EventMetrics;
use crate::scenario::{build_scenario, Scenario, ScenarioConfig};
use crate::server::BatchServer;
use crate::stats::{build_result, SimulationResult};
use crate::systems::{
    arrival::{arrival_system, simulation_started_system},
    cycle::{cycle_complete_system, cycle_start_system},
};

fn is_simulation_started(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::SimulationStarted)
        .unwrap_or(false)
}

fn is_customer_arrival(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CustomerArrival)
        .unwrap_or(false)
}

fn is_cycle_start(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CycleStart)
        .unwrap_or(false)
}

fn is_cycle_complete(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CycleComplete)
        .unwrap_or(false)
}

/// Builds the simulation schedule: one system per event kind, run conditionally
/// on [CurrentEvent]. The executor is single-threaded so each run is strictly
/// sequential.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((
        simulation_started_system.run_if(is_simulation_started),
        arrival_system.run_if(is_customer_arrival),
        cycle_start_system.run_if(is_cycle_start),
        cycle_complete_system.run_if(is_cycle_complete),
    ));
    schedule
}

/// Schedules the SimulationStarted event at time 0.
/// Call this after building the scenario and before running events.
pub fn initialize_simulation(world: &mut World) {
    let mut clock = world.resource_mut::<SimulationClock>();
    clock.schedule_at(0, EventKind::SimulationStarted, None);
}

fn check_before_dispatch(
    world: &World,
    event: &Event,
    previous_now: u64,
) -> Result<(), InvariantViolation> {
    if event.timestamp < previous_now {
        return Err(InvariantViolation::EventOutOfOrder {
            now_ms: previous_now,
            event_ms: event.timestamp,
        });
    }
    if event.kind == EventKind::CycleStart {
        let server = world
            .get_resource::<BatchServer>()
            .ok_or(InvariantViolation::MissingResource("BatchServer"))?;
        let cycle = event.cycle_index().unwrap_or(server.cycles_started());
        let expected_ms = server.cycle_start_time(cycle);
        if event.timestamp != expected_ms {
            return Err(InvariantViolation::CycleOffCadence {
                cycle,
                expected_ms,
                actual_ms: event.timestamp,
            });
        }
    }
    Ok(())
}

fn check_after_dispatch(world: &World, event: &Event) -> Result<(), InvariantViolation> {
    if event.kind != EventKind::CycleStart {
        return Ok(());
    }
    let server = world
        .get_resource::<BatchServer>()
        .ok_or(InvariantViolation::MissingResource("BatchServer"))?;
    if let Some(batch) = server.in_flight().find(|b| b.len() > server.capacity()) {
        return Err(InvariantViolation::BatchOverCapacity {
            cycle: batch.cycle,
            boarded: batch.len(),
            capacity: server.capacity(),
        });
    }
    Ok(())
}

/// Runs one simulation step: pops the next event, inserts it as [CurrentEvent],
/// then runs the schedule. Returns `Ok(false)` once the clock is empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> Result<bool, SimulationError> {
    let previous_now = {
        let clock = world
            .get_resource::<SimulationClock>()
            .ok_or(InvariantViolation::MissingResource("SimulationClock"))?;
        clock.now()
    };

    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return Ok(false),
    };

    if let Err(violation) = check_before_dispatch(world, &event, previous_now) {
        warn!(%violation, "aborting run");
        return Err(violation.into());
    }

    world.insert_resource(CurrentEvent(event));
    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(event.kind);
    }

    schedule.run(world);

    if let Err(violation) = check_after_dispatch(world, &event) {
        warn!(%violation, "aborting run");
        return Err(violation.into());
    }
    Ok(true)
}

/// Runs simulation steps until the event queue is empty.
/// Returns the number of steps executed, or an error if `max_steps` is
/// reached with events still pending.
pub fn run_until_empty(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
) -> Result<usize, SimulationError> {
    let mut steps = 0;
    while steps < max_steps {
        if !run_next_event(world, schedule)? {
            return Ok(steps);
        }
        steps += 1;
    }
    let drained = world
        .get_resource::<SimulationClock>()
        .map(|clock| clock.is_empty())
        .unwrap_or(true);
    if drained {
        Ok(steps)
    } else {
        Err(InvariantViolation::StepLimitExceeded(max_steps).into())
    }
}

/// Upper bound on the events one run can process: arrivals are at least one
/// second apart and cycles are back-to-back.
pub fn step_budget(config: &ScenarioConfig) -> usize {
    let horizon_ms = config.horizon_ms();
    let arrivals = horizon_ms / ONE_SEC_MS + 1;
    let cycles = horizon_ms / config.cycle_duration_ms().max(1) + 2;
    (arrivals + 2 * cycles + 16) as usize
}

/// Runs `scenario` from t=0 to its horizon and returns the aggregated result.
/// The only entry point reporting and export code needs.
pub fn run_scenario(scenario: &Scenario) -> Result<SimulationResult, SimulationError> {
    let span = info_span!("run_scenario", scenario = %scenario.name, seed = scenario.config.seed);
    let _guard = span.enter();

    let mut world = World::new();
    build_scenario(&mut world, scenario)?;
    initialize_simulation(&mut world);

    info!(
        mean_interarrival_secs = scenario.config.mean_interarrival_secs,
        spread_secs = scenario.config.interarrival_spread_secs,
        distribution = scenario.config.distribution.as_str(),
        capacity = scenario.config.capacity,
        cycle_secs = scenario.config.cycle_duration_secs,
        horizon_secs = scenario.config.horizon_secs,
        "starting simulation"
    );

    let mut schedule = simulation_schedule();
    let steps = run_until_empty(&mut world, &mut schedule, step_budget(&scenario.config))?;

    if let Some(metrics) = world.get_resource::<EventMetrics>() {
        debug!(
            steps,
            events_per_second = metrics.events_per_second(),
            "event queue drained"
        );
    }

    let result = build_result(&world)?;
    info!(
        arrived = result.arrived,
        served = result.served,
        still_queued = result.still_queued,
        mean_wait_secs = result.wait.mean_secs,
        "simulation complete"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::EventSubject;

    #[test]
    fn off_cadence_cycle_start_is_rejected() {
        let mut world = World::new();
        build_scenario(&mut world, &Scenario::low_season()).expect("valid");
        world
            .resource_mut::<SimulationClock>()
            .schedule_at(1_000, EventKind::CycleStart, Some(EventSubject::Cycle(0)));

        let mut schedule = simulation_schedule();
        let err = run_next_event(&mut world, &mut schedule).expect_err("off cadence");
        assert_eq!(
            err,
            SimulationError::InvariantViolation(InvariantViolation::CycleOffCadence {
                cycle: 0,
                expected_ms: 0,
                actual_ms: 1_000,
            })
        );
    }

    #[test]
    fn step_limit_is_reported() {
        let mut world = World::new();
        build_scenario(&mut world, &Scenario::low_season()).expect("valid");
        initialize_simulation(&mut world);

        let mut schedule = simulation_schedule();
        let err = run_until_empty(&mut world, &mut schedule, 3).expect_err("limit");
        assert_eq!(
            err,
            SimulationError::InvariantViolation(InvariantViolation::StepLimitExceeded(3))
        );
    }

    #[test]
    fn run_next_event_without_clock_is_an_error() {
        let mut world = World::new();
        let mut schedule = simulation_schedule();
        assert_eq!(
            run_next_event(&mut world, &mut schedule),
            Err(SimulationError::InvariantViolation(
                InvariantViolation::MissingResource("SimulationClock")
            ))
        );
    }

    #[test]
    fn step_budget_covers_a_full_day() {
        let config = ScenarioConfig::default();
        // 28 800 one-second arrivals at most, plus ~105 cycles of two events each.
        assert!(step_budget(&config) > 28_800 + 2 * 105);
    }
}
