//! Discrete-event simulation of a single FIFO queue in front of a periodic
//! batch server: an amusement ride that departs every cycle with up to
//! `capacity` visitors on board.
//!
//! ```no_run
//! use ride_core::runner::run_scenario;
//! use ride_core::scenario::Scenario;
//!
//! let result = run_scenario(&Scenario::low_season()).expect("valid preset");
//! println!("mean wait: {:.1}s", result.wait.mean_secs);
//! ```

pub mod arrivals;
pub mod clock;
pub mod customer;
pub mod distributions;
pub mod error;
pub mod profiling;
pub mod queue;
pub mod runner;
pub mod scenario;
pub mod server;
pub mod stats;
pub mod systems;
pub mod telemetry;

pub use error::{ConfigError, InvariantViolation, SimulationError};
pub use runner::run_scenario;
pub use scenario::{Scenario, ScenarioConfig};
pub use stats::SimulationResult;
