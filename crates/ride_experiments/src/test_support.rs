//! Hand-built results shared by unit tests.

use ride_core::stats::{QueueLengthPoint, WaitStats};
use ride_core::SimulationResult;

pub(crate) fn sample_result(name: &str, mean_wait_secs: f64, served: u64) -> SimulationResult {
    SimulationResult {
        scenario: name.to_string(),
        description: format!("{name} test run"),
        seed: 42,
        horizon_secs: 7_200.0,
        capacity: 20,
        cycle_duration_secs: 276.0,
        arrived: served + 3,
        served,
        still_queued: 3,
        cycles_run: 27,
        non_empty_cycles: 26,
        events_processed: 500,
        events_discarded: 2,
        wait: WaitStats {
            mean_secs: mean_wait_secs,
            min_secs: 1.0,
            max_secs: 270.0,
            std_dev_secs: 70.0,
            median_secs: 130.0,
            p90_secs: 240.0,
            p95_secs: 255.0,
        },
        mean_sojourn_secs: mean_wait_secs + 276.0,
        max_sojourn_secs: 546.0,
        mean_queue_length: 2.5,
        max_queue_length: 9,
        throughput_per_hour: served as f64 / 2.0,
        utilization: 26.0 / 27.0,
        seat_occupancy: served as f64 / 540.0,
        wait_times_secs: vec![1.0, 130.0, 270.0],
        queue_length_series: vec![QueueLengthPoint {
            time_secs: 30.0,
            length: 1,
        }],
    }
}
