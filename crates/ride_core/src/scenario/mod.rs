//! Scenario setup: parameters, named presets, and world construction.
//!
//! A scenario is validated before anything is inserted into the world, so an
//! invalid configuration never schedules a single event.

mod build;
mod params;

pub use build::build_scenario;
pub use params::{
    ArrivalDistributionKind, Scenario, ScenarioConfig, DEFAULT_CAPACITY,
    DEFAULT_CYCLE_DURATION_SECS, DEFAULT_HORIZON_SECS, DEFAULT_SEED,
};
