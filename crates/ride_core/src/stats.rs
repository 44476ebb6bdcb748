//! Aggregated run statistics.
//!
//! [build_result] reads the drained world once and produces the immutable
//! [SimulationResult] consumed by reporting and export code.

use bevy_ecs::prelude::World;
use serde::{Deserialize, Serialize};

use crate::arrivals::ArrivalGenerator;
use crate::clock::{ms_to_secs, SimulationClock, ONE_HOUR_MS};
use crate::error::InvariantViolation;
use crate::profiling::EventMetrics;
use crate::queue::RideQueue;
use crate::scenario::Scenario;
use crate::server::BatchServer;
use crate::telemetry::{QueueSample, RideTelemetry};

/// Summary of the waiting-time sample, in seconds. All zero when nobody was served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitStats {
    pub mean_secs: f64,
    pub min_secs: f64,
    pub max_secs: f64,
    /// Sample standard deviation (n - 1); 0 for fewer than two samples.
    pub std_dev_secs: f64,
    pub median_secs: f64,
    pub p90_secs: f64,
    pub p95_secs: f64,
}

impl WaitStats {
    /// Order statistics and spread of `samples`. The mean, min and max are
    /// computed here too; [build_result] overrides them with the collector's
    /// running aggregates, which agree up to rounding.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };
        let std_dev = if n > 1 {
            let var = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };

        Self {
            mean_secs: mean,
            min_secs: sorted[0],
            max_secs: sorted[n - 1],
            std_dev_secs: std_dev,
            median_secs: median,
            p90_secs: percentile(&sorted, 0.90),
            p95_secs: percentile(&sorted, 0.95),
        }
    }
}

/// Nearest-rank percentile on a sorted, non-empty slice: index `floor(q * (n - 1))`.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let idx = ((sorted.len() - 1) as f64 * q) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueLengthPoint {
    pub time_secs: f64,
    pub length: usize,
}

/// Aggregated metrics from a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub scenario: String,
    pub description: String,
    pub seed: u64,
    pub horizon_secs: f64,
    pub capacity: usize,
    pub cycle_duration_secs: f64,
    /// Customers that entered the queue before the horizon.
    pub arrived: u64,
    /// Customers whose ride completed (including batches finishing after the horizon).
    pub served: u64,
    /// Customers still waiting in the queue at the horizon.
    pub still_queued: u64,
    pub cycles_run: u64,
    pub non_empty_cycles: u64,
    pub events_processed: u64,
    pub events_discarded: u64,
    pub wait: WaitStats,
    pub mean_sojourn_secs: f64,
    pub max_sojourn_secs: f64,
    /// Time-weighted over `[0, horizon]`.
    pub mean_queue_length: f64,
    pub max_queue_length: usize,
    /// Served customers per simulated hour.
    pub throughput_per_hour: f64,
    /// Fraction of departed cycles that carried at least one customer.
    pub utilization: f64,
    /// Boarded customers over offered seats (`cycles_run * capacity`).
    pub seat_occupancy: f64,
    /// Waiting time of every served customer, in service order.
    pub wait_times_secs: Vec<f64>,
    pub queue_length_series: Vec<QueueLengthPoint>,
}

impl SimulationResult {
    pub fn horizon_hours(&self) -> f64 {
        self.horizon_secs / 3600.0
    }
}

/// Integrate the queue-length step function over `[0, horizon_ms]` and divide
/// by the horizon. The queue is empty before the first sample.
pub fn time_weighted_mean_length(samples: &[QueueSample], horizon_ms: u64) -> f64 {
    if horizon_ms == 0 {
        return 0.0;
    }
    let mut area: u128 = 0;
    let mut last_time = 0u64;
    let mut last_len = 0usize;
    for sample in samples {
        let t = sample.timestamp_ms.min(horizon_ms);
        area += last_len as u128 * t.saturating_sub(last_time) as u128;
        last_time = last_time.max(t);
        last_len = sample.length;
    }
    area += last_len as u128 * horizon_ms.saturating_sub(last_time) as u128;
    area as f64 / horizon_ms as f64
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Extract the aggregated result from a drained simulation world.
pub fn build_result(world: &World) -> Result<SimulationResult, InvariantViolation> {
    let scenario = world
        .get_resource::<Scenario>()
        .ok_or(InvariantViolation::MissingResource("Scenario"))?;
    let telemetry = world
        .get_resource::<RideTelemetry>()
        .ok_or(InvariantViolation::MissingResource("RideTelemetry"))?;
    let queue = world
        .get_resource::<RideQueue>()
        .ok_or(InvariantViolation::MissingResource("RideQueue"))?;
    let server = world
        .get_resource::<BatchServer>()
        .ok_or(InvariantViolation::MissingResource("BatchServer"))?;
    let generator = world
        .get_resource::<ArrivalGenerator>()
        .ok_or(InvariantViolation::MissingResource("ArrivalGenerator"))?;
    let clock = world
        .get_resource::<SimulationClock>()
        .ok_or(InvariantViolation::MissingResource("SimulationClock"))?;
    let events_processed = world
        .get_resource::<EventMetrics>()
        .map(|m| m.events_processed)
        .unwrap_or(0);

    let config = &scenario.config;
    let horizon_ms = config.horizon_ms();
    let served = telemetry.served_count() as u64;

    let wait_times_secs: Vec<f64> = telemetry
        .completed
        .iter()
        .map(|c| ms_to_secs(c.wait_ms()))
        .collect();
    let mut wait = WaitStats::from_samples(&wait_times_secs);
    if served > 0 {
        wait.mean_secs = telemetry.mean_wait_ms() / 1000.0;
        wait.min_secs = ms_to_secs(telemetry.min_wait_ms());
        wait.max_secs = ms_to_secs(telemetry.max_wait_ms());
    }

    let queue_length_series = telemetry
        .queue_samples
        .iter()
        .map(|s| QueueLengthPoint {
            time_secs: ms_to_secs(s.timestamp_ms),
            length: s.length,
        })
        .collect();

    let cycles_run = server.cycles_started();
    let offered_seats = cycles_run as f64 * server.capacity() as f64;

    Ok(SimulationResult {
        scenario: scenario.name.clone(),
        description: scenario.description.clone(),
        seed: config.seed,
        horizon_secs: ms_to_secs(horizon_ms),
        capacity: server.capacity(),
        cycle_duration_secs: ms_to_secs(server.cycle_duration_ms()),
        arrived: generator.arrived_count(),
        served,
        still_queued: queue.len() as u64,
        cycles_run,
        non_empty_cycles: server.non_empty_cycles(),
        events_processed,
        events_discarded: clock.discarded_event_count(),
        wait,
        mean_sojourn_secs: telemetry.mean_sojourn_ms() / 1000.0,
        max_sojourn_secs: ms_to_secs(telemetry.max_sojourn_ms()),
        mean_queue_length: time_weighted_mean_length(&telemetry.queue_samples, horizon_ms),
        max_queue_length: telemetry
            .queue_samples
            .iter()
            .map(|s| s.length)
            .max()
            .unwrap_or(0),
        throughput_per_hour: ratio(served as f64, horizon_ms as f64 / ONE_HOUR_MS as f64),
        utilization: ratio(server.non_empty_cycles() as f64, cycles_run as f64),
        seat_occupancy: ratio(server.boarded_total() as f64, offered_seats),
        wait_times_secs,
        queue_length_series,
    })
}
