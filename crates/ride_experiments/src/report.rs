//! Console report and baseline comparison of simulation results.

use std::fmt::Write;

use ride_core::SimulationResult;
use serde::{Deserialize, Serialize};

const RULE_WIDTH: usize = 50;

fn minutes(secs: f64) -> f64 {
    secs / 60.0
}

/// Render the human-readable report of one run.
///
/// Sections: customers, waiting times, time in system, queue, performance.
/// Durations are given in seconds with minutes alongside.
pub fn format_report(result: &SimulationResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "SIMULATION REPORT");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Scenario: {} ({})", result.scenario, result.description);
    let _ = writeln!(
        out,
        "Simulated time: {:.1} hours (seed {})",
        result.horizon_hours(),
        result.seed
    );
    let _ = writeln!(
        out,
        "Ride: {} seats every {:.0}s",
        result.capacity, result.cycle_duration_secs
    );

    let _ = writeln!(out, "\nCUSTOMERS:");
    let _ = writeln!(out, "  - Arrived: {}", result.arrived);
    let _ = writeln!(out, "  - Served: {}", result.served);
    let _ = writeln!(out, "  - Still in queue: {}", result.still_queued);

    let wait = &result.wait;
    let _ = writeln!(out, "\nWAITING TIMES:");
    let _ = writeln!(
        out,
        "  - Mean: {:.1}s ({:.1} min)",
        wait.mean_secs,
        minutes(wait.mean_secs)
    );
    let _ = writeln!(out, "  - Minimum: {:.1}s", wait.min_secs);
    let _ = writeln!(
        out,
        "  - Maximum: {:.1}s ({:.1} min)",
        wait.max_secs,
        minutes(wait.max_secs)
    );
    let _ = writeln!(out, "  - Std deviation: {:.1}s", wait.std_dev_secs);
    let _ = writeln!(
        out,
        "  - Median / p90 / p95: {:.1}s / {:.1}s / {:.1}s",
        wait.median_secs, wait.p90_secs, wait.p95_secs
    );

    let _ = writeln!(out, "\nTIME IN SYSTEM:");
    let _ = writeln!(
        out,
        "  - Mean: {:.1}s ({:.1} min)",
        result.mean_sojourn_secs,
        minutes(result.mean_sojourn_secs)
    );
    let _ = writeln!(
        out,
        "  - Maximum: {:.1}s ({:.1} min)",
        result.max_sojourn_secs,
        minutes(result.max_sojourn_secs)
    );

    let _ = writeln!(out, "\nQUEUE:");
    let _ = writeln!(out, "  - Max length: {} people", result.max_queue_length);
    let _ = writeln!(
        out,
        "  - Mean length: {:.1} people",
        result.mean_queue_length
    );

    let _ = writeln!(out, "\nPERFORMANCE:");
    let _ = writeln!(
        out,
        "  - Throughput: {:.1} customers/hour",
        result.throughput_per_hour
    );
    let _ = writeln!(
        out,
        "  - Utilization: {:.1}% of {} cycles departed with riders",
        result.utilization * 100.0,
        result.cycles_run
    );
    let _ = writeln!(
        out,
        "  - Seat occupancy: {:.1}%",
        result.seat_occupancy * 100.0
    );
    out
}

/// Difference of one run against a baseline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub baseline: String,
    pub other: String,
    /// `other - baseline` mean wait, in minutes.
    pub mean_wait_diff_mins: f64,
    /// `other - baseline` throughput, in customers per hour.
    pub throughput_diff_per_hour: f64,
    pub served_diff: i64,
    pub still_queued_diff: i64,
}

pub fn compare(baseline: &SimulationResult, other: &SimulationResult) -> Comparison {
    Comparison {
        baseline: baseline.scenario.clone(),
        other: other.scenario.clone(),
        mean_wait_diff_mins: minutes(other.wait.mean_secs - baseline.wait.mean_secs),
        throughput_diff_per_hour: other.throughput_per_hour - baseline.throughput_per_hour,
        served_diff: other.served as i64 - baseline.served as i64,
        still_queued_diff: other.still_queued as i64 - baseline.still_queued as i64,
    }
}

pub fn format_comparison(comparison: &Comparison) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "COMPARISON: {} vs {}",
        comparison.other, comparison.baseline
    );
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "Waiting time difference: {:+.1} minutes in {}",
        comparison.mean_wait_diff_mins, comparison.other
    );
    let _ = writeln!(
        out,
        "Throughput difference: {:+.1} customers/hour",
        comparison.throughput_diff_per_hour
    );
    let _ = writeln!(
        out,
        "Served difference: {:+} customers ({:+} left in queue)",
        comparison.served_diff, comparison.still_queued_diff
    );
    out
}
