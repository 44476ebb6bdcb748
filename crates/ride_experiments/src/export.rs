//! Result export utilities.
//!
//! One summary row per scenario, the per-customer waiting times, and the
//! queue-length series go to CSV; full results go to JSON.

use std::path::Path;

use ride_core::SimulationResult;

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

/// Export one summary row per result to CSV.
///
/// Columns are the scenario labels followed by every scalar metric.
///
/// # Errors
///
/// Returns an error if `results` is empty or file creation or CSV writing fails.
pub fn export_summary_csv(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_summary_csv_impl(results, file)
}

/// Export every served customer's waiting time to CSV, in long format
/// (`scenario, index, wait_secs, wait_mins`).
///
/// # Errors
///
/// Returns an error if `results` is empty or file creation or CSV writing fails.
pub fn export_wait_times_csv(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_wait_times_csv_impl(results, file)
}

/// Export the queue-length samples to CSV (`scenario, time_secs, time_hours, length`).
///
/// # Errors
///
/// Returns an error if `results` is empty or file creation or CSV writing fails.
pub fn export_queue_series_csv(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_queue_series_csv_impl(results, file)
}

/// Export simulation results to JSON format.
///
/// Creates a JSON file with an array of all results (serialized as JSON objects).
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_to_json(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_to_json_impl(results, file)
}
