use ride_core::SimulationResult;

const SUMMARY_HEADERS: [&str; 27] = [
    "scenario",
    "description",
    "seed",
    "horizon_secs",
    "capacity",
    "cycle_duration_secs",
    "arrived",
    "served",
    "still_queued",
    "cycles_run",
    "non_empty_cycles",
    "events_processed",
    "events_discarded",
    "mean_wait_secs",
    "min_wait_secs",
    "max_wait_secs",
    "std_dev_wait_secs",
    "median_wait_secs",
    "p90_wait_secs",
    "p95_wait_secs",
    "mean_sojourn_secs",
    "max_sojourn_secs",
    "mean_queue_length",
    "max_queue_length",
    "throughput_per_hour",
    "utilization",
    "seat_occupancy",
];

pub(crate) fn export_summary_csv_impl(
    results: &[SimulationResult],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(SUMMARY_HEADERS)?;

    for result in results {
        let wait = &result.wait;
        wtr.write_record([
            &result.scenario,
            &result.description,
            &result.seed.to_string(),
            &result.horizon_secs.to_string(),
            &result.capacity.to_string(),
            &result.cycle_duration_secs.to_string(),
            &result.arrived.to_string(),
            &result.served.to_string(),
            &result.still_queued.to_string(),
            &result.cycles_run.to_string(),
            &result.non_empty_cycles.to_string(),
            &result.events_processed.to_string(),
            &result.events_discarded.to_string(),
            &wait.mean_secs.to_string(),
            &wait.min_secs.to_string(),
            &wait.max_secs.to_string(),
            &wait.std_dev_secs.to_string(),
            &wait.median_secs.to_string(),
            &wait.p90_secs.to_string(),
            &wait.p95_secs.to_string(),
            &result.mean_sojourn_secs.to_string(),
            &result.max_sojourn_secs.to_string(),
            &result.mean_queue_length.to_string(),
            &result.max_queue_length.to_string(),
            &result.throughput_per_hour.to_string(),
            &result.utilization.to_string(),
            &result.seat_occupancy.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_wait_times_csv_impl(
    results: &[SimulationResult],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(["scenario", "index", "wait_secs", "wait_mins"])?;

    for result in results {
        for (index, wait_secs) in result.wait_times_secs.iter().enumerate() {
            wtr.write_record([
                &result.scenario,
                &index.to_string(),
                &wait_secs.to_string(),
                &(wait_secs / 60.0).to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_queue_series_csv_impl(
    results: &[SimulationResult],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(["scenario", "time_secs", "time_hours", "length"])?;

    for result in results {
        for point in &result.queue_length_series {
            wtr.write_record([
                &result.scenario,
                &point.time_secs.to_string(),
                &(point.time_secs / 3600.0).to_string(),
                &point.length.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
