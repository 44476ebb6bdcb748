use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use ride_core::scenario::{ArrivalDistributionKind, Scenario, ScenarioConfig};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "ride-sim",
    about = "Queue simulation of a periodic batch-service ride",
    long_about = "Simulates visitors queueing for an amusement ride that departs every\n\
                  cycle with a fixed number of seats, and reports waiting times,\n\
                  queue lengths and throughput per scenario."
)]
pub struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one scenario and print its report
    Run(RunArgs),
    /// Run several scenarios in parallel and compare them with the first
    Compare {
        /// Scenarios to run; the first one is the baseline
        #[arg(long, value_delimiter = ',', default_values_t = default_scenarios())]
        scenarios: Vec<String>,
        #[command(flatten)]
        parallel: ParallelArgs,
    },
    /// Run scenarios and write their results to files
    Export {
        /// Output directory (created if missing)
        #[arg(long)]
        out_dir: PathBuf,
        #[arg(long, value_delimiter = ',', default_values_t = default_scenarios())]
        scenarios: Vec<String>,
        #[arg(long, value_enum, default_value_t = ExportFormat::All)]
        format: ExportFormat,
        #[command(flatten)]
        parallel: ParallelArgs,
    },
    /// List the recognized preset names
    Presets,
}

#[derive(Args)]
pub struct RunArgs {
    /// Preset name
    #[arg(long, default_value = Scenario::LOW_SEASON)]
    pub scenario: String,
    /// JSON file with a scenario config; replaces the preset's parameters
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long, env = "RIDE_SIM_SEED")]
    pub seed: Option<u64>,
    /// Simulated hours
    #[arg(long)]
    pub hours: Option<f64>,
    /// Seats per cycle
    #[arg(long)]
    pub capacity: Option<usize>,
    /// Cycle length in seconds (ride plus boarding)
    #[arg(long)]
    pub cycle_secs: Option<f64>,
    #[arg(long, value_enum)]
    pub distribution: Option<DistributionArg>,
}

#[derive(Args)]
pub struct ParallelArgs {
    /// Worker threads (defaults to one per core)
    #[arg(long, env = "RIDE_SIM_THREADS")]
    pub threads: Option<usize>,
    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DistributionArg {
    /// Uniform on [mean - spread, mean + spread]
    UniformJitter,
    /// Normal with std-dev = spread
    Normal,
    /// Exponential with the given mean
    Exponential,
}

impl From<DistributionArg> for ArrivalDistributionKind {
    fn from(arg: DistributionArg) -> Self {
        match arg {
            DistributionArg::UniformJitter => ArrivalDistributionKind::UniformJitter,
            DistributionArg::Normal => ArrivalDistributionKind::Normal,
            DistributionArg::Exponential => ArrivalDistributionKind::Exponential,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    All,
}

impl ExportFormat {
    pub fn includes_csv(self) -> bool {
        matches!(self, Self::Csv | Self::All)
    }

    pub fn includes_json(self) -> bool {
        matches!(self, Self::Json | Self::All)
    }
}

fn default_scenarios() -> Vec<String> {
    vec![
        Scenario::LOW_SEASON.to_string(),
        Scenario::HIGH_SEASON.to_string(),
    ]
}

// ── scenario resolution ────────────────────────────────────────────

pub fn load_config(path: &Path) -> Result<ScenarioConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
    let config = serde_json::from_str(&contents)
        .map_err(|err| format!("Invalid scenario config {}: {err}", path.display()))?;
    Ok(config)
}

impl RunArgs {
    /// Preset, then the config file, then individual flags.
    pub fn resolve_scenario(&self) -> Result<Scenario, Box<dyn std::error::Error>> {
        let mut scenario = Scenario::preset(&self.scenario)?;
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => scenario.config.clone(),
        };

        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(hours) = self.hours {
            config = config.with_horizon_hours(hours);
        }
        if let Some(capacity) = self.capacity {
            config = config.with_capacity(capacity);
        }
        if let Some(secs) = self.cycle_secs {
            config = config.with_cycle_duration_secs(secs);
        }
        if let Some(distribution) = self.distribution {
            config = config.with_distribution(distribution.into());
        }

        config.validate()?;
        scenario.config = config;
        Ok(scenario)
    }
}

pub fn resolve_presets(names: &[String]) -> Result<Vec<Scenario>, Box<dyn std::error::Error>> {
    if names.is_empty() {
        return Err("No scenarios given".into());
    }
    names
        .iter()
        .map(|name| Scenario::preset(name.trim()).map_err(Into::into))
        .collect()
}
