use thiserror::Error;

/// Invalid scenario parameters. Raised before any event is scheduled.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Mean inter-arrival time must be positive and finite, got {0}s")]
    InvalidMeanInterArrival(f64),

    #[error("Inter-arrival spread must be positive and finite, got {0}s")]
    InvalidSpread(f64),

    #[error("Ride capacity must be at least 1 customer per cycle")]
    ZeroCapacity,

    #[error("Cycle duration must be at least 1ms, got {0}s")]
    InvalidCycleDuration(f64),

    #[error("Simulation horizon must be at least 1ms, got {0}s")]
    InvalidHorizon(f64),

    #[error("Unknown scenario preset '{0}'")]
    UnknownScenario(String),
}

/// Internal defects detected while a run is in progress.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("Event at {event_ms}ms dispatched after clock reached {now_ms}ms")]
    EventOutOfOrder { now_ms: u64, event_ms: u64 },

    #[error("Cycle {cycle} boarded {boarded} customers, capacity is {capacity}")]
    BatchOverCapacity {
        cycle: u64,
        boarded: usize,
        capacity: usize,
    },

    #[error("Cycle {cycle} started at {actual_ms}ms, expected {expected_ms}ms")]
    CycleOffCadence {
        cycle: u64,
        expected_ms: u64,
        actual_ms: u64,
    },

    #[error("Run did not drain its event queue within {0} steps")]
    StepLimitExceeded(usize),

    #[error("Resource {0} is missing from the simulation world")]
    MissingResource(&'static str),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Simulation invariant violated: {0}")]
    InvariantViolation(#[from] InvariantViolation),
}
