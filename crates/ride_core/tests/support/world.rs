use bevy_ecs::prelude::World;
use ride_core::runner::{initialize_simulation, run_until_empty, simulation_schedule, step_budget};
use ride_core::scenario::{build_scenario, Scenario, ScenarioConfig};
use ride_core::stats::{build_result, SimulationResult};
use ride_core::telemetry::RideTelemetry;

/// A finished run with its world kept around for inspecting telemetry.
pub struct FinishedRun {
    pub world: World,
    pub result: SimulationResult,
}

impl FinishedRun {
    pub fn telemetry(&self) -> &RideTelemetry {
        self.world.resource::<RideTelemetry>()
    }
}

/// Build, run to completion, and collect `scenario`, keeping the world.
pub fn run_to_completion(scenario: &Scenario) -> FinishedRun {
    let mut world = World::new();
    build_scenario(&mut world, scenario).expect("valid scenario");
    initialize_simulation(&mut world);
    let mut schedule = simulation_schedule();
    run_until_empty(&mut world, &mut schedule, step_budget(&scenario.config)).expect("run drains");
    let result = build_result(&world).expect("result");
    FinishedRun { world, result }
}

pub fn run_config(name: &str, config: ScenarioConfig) -> FinishedRun {
    run_to_completion(&Scenario::custom(name, config))
}
