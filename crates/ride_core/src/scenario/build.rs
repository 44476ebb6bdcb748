use bevy_ecs::prelude::World;

use crate::arrivals::ArrivalGenerator;
use crate::clock::SimulationClock;
use crate::error::ConfigError;
use crate::profiling::EventMetrics;
use crate::queue::RideQueue;
use crate::scenario::params::Scenario;
use crate::server::BatchServer;
use crate::telemetry::RideTelemetry;

/// Populates `world` with the clock (bounded by the horizon), queue, server,
/// arrival generator and telemetry for `scenario`.
/// Nothing is inserted when the configuration is invalid.
pub fn build_scenario(world: &mut World, scenario: &Scenario) -> Result<(), ConfigError> {
    let config = &scenario.config;
    config.validate()?;

    world.insert_resource(SimulationClock::with_horizon(config.horizon_ms()));
    world.insert_resource(RideQueue::default());
    world.insert_resource(BatchServer::new(config.capacity, config.cycle_duration_ms()));
    world.insert_resource(ArrivalGenerator::from_config(config));
    world.insert_resource(RideTelemetry::default());
    world.insert_resource(EventMetrics::default());
    world.insert_resource(config.clone());
    world.insert_resource(scenario.clone());
    Ok(())
}
