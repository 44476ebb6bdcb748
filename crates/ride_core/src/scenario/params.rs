use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::secs_to_ms;
use crate::error::ConfigError;

/// Seats per ride cycle.
pub const DEFAULT_CAPACITY: usize = 20;
/// Ride duration (96 s) plus boarding and unboarding (180 s).
pub const DEFAULT_CYCLE_DURATION_SECS: f64 = 276.0;
/// One operating day: 8 hours.
pub const DEFAULT_HORIZON_SECS: f64 = 8.0 * 60.0 * 60.0;
pub const DEFAULT_SEED: u64 = 42;

/// Shape of the inter-arrival distribution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalDistributionKind {
    /// Uniform on `[mean - spread, mean + spread]`.
    #[default]
    UniformJitter,
    /// Normal with `std_dev = spread`.
    Normal,
    /// Exponential with the given mean; spread is ignored.
    Exponential,
}

impl ArrivalDistributionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArrivalDistributionKind::UniformJitter => "uniform_jitter",
            ArrivalDistributionKind::Normal => "normal",
            ArrivalDistributionKind::Exponential => "exponential",
        }
    }
}

/// Parameters for one simulation run. Read-only once the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct ScenarioConfig {
    pub mean_interarrival_secs: f64,
    pub interarrival_spread_secs: f64,
    pub distribution: ArrivalDistributionKind,
    /// Customers admitted per cycle.
    pub capacity: usize,
    pub cycle_duration_secs: f64,
    pub horizon_secs: f64,
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            mean_interarrival_secs: 120.0,
            interarrival_spread_secs: 30.0,
            distribution: ArrivalDistributionKind::default(),
            capacity: DEFAULT_CAPACITY,
            cycle_duration_secs: DEFAULT_CYCLE_DURATION_SECS,
            horizon_secs: DEFAULT_HORIZON_SECS,
            seed: DEFAULT_SEED,
        }
    }
}

impl ScenarioConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_horizon_secs(mut self, secs: f64) -> Self {
        self.horizon_secs = secs;
        self
    }

    pub fn with_horizon_hours(mut self, hours: f64) -> Self {
        self.horizon_secs = hours * 60.0 * 60.0;
        self
    }

    pub fn with_interarrival(mut self, mean_secs: f64, spread_secs: f64) -> Self {
        self.mean_interarrival_secs = mean_secs;
        self.interarrival_spread_secs = spread_secs;
        self
    }

    pub fn with_distribution(mut self, distribution: ArrivalDistributionKind) -> Self {
        self.distribution = distribution;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_cycle_duration_secs(mut self, secs: f64) -> Self {
        self.cycle_duration_secs = secs;
        self
    }

    pub fn cycle_duration_ms(&self) -> u64 {
        secs_to_ms(self.cycle_duration_secs)
    }

    pub fn horizon_ms(&self) -> u64 {
        secs_to_ms(self.horizon_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mean = self.mean_interarrival_secs;
        if !mean.is_finite() || mean <= 0.0 {
            return Err(ConfigError::InvalidMeanInterArrival(mean));
        }
        let spread = self.interarrival_spread_secs;
        if !spread.is_finite() || spread <= 0.0 {
            return Err(ConfigError::InvalidSpread(spread));
        }
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.cycle_duration_ms() == 0 {
            return Err(ConfigError::InvalidCycleDuration(self.cycle_duration_secs));
        }
        if self.horizon_ms() == 0 {
            return Err(ConfigError::InvalidHorizon(self.horizon_secs));
        }
        Ok(())
    }
}

/// A labelled configuration. Name and description never affect behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub config: ScenarioConfig,
}

impl Scenario {
    pub const LOW_SEASON: &'static str = "low_season";
    pub const HIGH_SEASON: &'static str = "high_season";

    /// March to June: one visitor every 2 minutes (± 30 s).
    pub fn low_season() -> Self {
        Self {
            name: Self::LOW_SEASON.to_string(),
            description: "Low season (Mar-Jun): one visitor every 2 minutes".to_string(),
            config: ScenarioConfig::default().with_interarrival(120.0, 30.0),
        }
    }

    /// January, July and December: one visitor every 30 seconds (± 10 s).
    pub fn high_season() -> Self {
        Self {
            name: Self::HIGH_SEASON.to_string(),
            description: "High season (Jan, Jul, Dec): one visitor every 30 seconds".to_string(),
            config: ScenarioConfig::default().with_interarrival(30.0, 10.0),
        }
    }

    pub fn custom(name: impl Into<String>, config: ScenarioConfig) -> Self {
        let name = name.into();
        Self {
            description: format!("Custom scenario '{name}'"),
            name,
            config,
        }
    }

    /// Look up a preset by name. The Portuguese season labels are accepted too.
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            Self::LOW_SEASON | "baixa_temporada" => Ok(Self::low_season()),
            Self::HIGH_SEASON | "alta_temporada" => Ok(Self::high_season()),
            other => Err(ConfigError::UnknownScenario(other.to_string())),
        }
    }

    pub fn preset_names() -> &'static [&'static str] {
        &[Self::LOW_SEASON, Self::HIGH_SEASON]
    }

    pub fn with_config(mut self, config: ScenarioConfig) -> Self {
        self.config = config;
        self
    }
}
