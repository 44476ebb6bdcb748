//! Arrival generator: a seeded renewal process of visitor arrivals.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::secs_to_ms;
use crate::customer::Customer;
use crate::distributions::{build_distribution, clamp_interval_secs, InterArrivalDistribution};
use crate::scenario::ScenarioConfig;

/// Owns the run's only random source. Two generators built from the same
/// config produce the same interval sequence.
#[derive(Debug, Resource)]
pub struct ArrivalGenerator {
    rng: StdRng,
    distribution: Box<dyn InterArrivalDistribution>,
    next_id: u64,
}

impl ArrivalGenerator {
    pub fn new(seed: u64, distribution: Box<dyn InterArrivalDistribution>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            distribution,
            next_id: 1,
        }
    }

    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self::new(config.seed, build_distribution(config))
    }

    /// Draw the gap to the next arrival, clamped to the minimum interval.
    pub fn next_interval_ms(&mut self) -> u64 {
        let secs = clamp_interval_secs(self.distribution.sample_secs(&mut self.rng));
        secs_to_ms(secs).max(1)
    }

    /// Create the customer arriving at `now_ms`.
    pub fn next_customer(&mut self, now_ms: u64) -> Customer {
        let customer = Customer::new(self.next_id, now_ms);
        self.next_id += 1;
        customer
    }

    pub fn arrived_count(&self) -> u64 {
        self.next_id - 1
    }
}
