mod support;

use ride_core::runner::run_scenario;
use ride_core::scenario::{ArrivalDistributionKind, Scenario, ScenarioConfig};

use support::world::{run_config, run_to_completion};

fn scenarios_under_test() -> Vec<Scenario> {
    vec![
        Scenario::low_season(),
        Scenario::high_season(),
        Scenario::custom(
            "overloaded",
            ScenarioConfig::default().with_interarrival(10.0, 3.0),
        ),
        Scenario::custom(
            "normal_arrivals",
            ScenarioConfig::default()
                .with_interarrival(30.0, 10.0)
                .with_distribution(ArrivalDistributionKind::Normal),
        ),
        Scenario::custom(
            "small_ride",
            ScenarioConfig::default()
                .with_interarrival(20.0, 15.0)
                .with_capacity(4)
                .with_cycle_duration_secs(90.0)
                .with_distribution(ArrivalDistributionKind::Exponential),
        ),
    ]
}

#[test]
fn boarding_never_precedes_arrival_and_preserves_fifo() {
    for scenario in scenarios_under_test() {
        let run = run_to_completion(&scenario);
        let mut completed = run.telemetry().completed.clone();
        assert!(
            completed
                .iter()
                .all(|c| c.service_start_ms >= c.arrival_ms),
            "{}: boarded before arriving",
            scenario.name
        );
        completed.sort_by_key(|c| c.customer_id);
        for pair in completed.windows(2) {
            assert!(pair[0].arrival_ms <= pair[1].arrival_ms);
            assert!(
                pair[0].service_start_ms <= pair[1].service_start_ms,
                "{}: customer {} boarded after customer {}",
                scenario.name,
                pair[0].customer_id,
                pair[1].customer_id
            );
        }
    }
}

#[test]
fn batches_never_exceed_capacity() {
    for scenario in scenarios_under_test() {
        let run = run_to_completion(&scenario);
        let capacity = scenario.config.capacity;
        assert!(run.telemetry().cycles.iter().all(|c| c.boarded <= capacity));

        let mut per_cycle = std::collections::BTreeMap::<u64, usize>::new();
        for record in &run.telemetry().completed {
            *per_cycle.entry(record.cycle).or_default() += 1;
        }
        assert!(per_cycle.values().all(|&n| n <= capacity), "{}", scenario.name);
    }
}

#[test]
fn cycles_start_at_exact_multiples_of_the_cycle_duration() {
    for scenario in scenarios_under_test() {
        let run = run_to_completion(&scenario);
        let cycle_ms = scenario.config.cycle_duration_ms();
        let horizon_ms = scenario.config.horizon_ms();
        let cycles = &run.telemetry().cycles;

        for (k, cycle) in cycles.iter().enumerate() {
            assert_eq!(cycle.cycle, k as u64);
            assert_eq!(cycle.start_ms, k as u64 * cycle_ms);
        }
        // The timetable covers the whole horizon.
        assert_eq!(cycles.len() as u64, horizon_ms / cycle_ms + 1);
        for record in &run.telemetry().completed {
            assert_eq!(record.service_start_ms % cycle_ms, 0);
            assert_eq!(record.service_end_ms, record.service_start_ms + cycle_ms);
        }
    }
}

#[test]
fn customers_are_conserved() {
    for scenario in scenarios_under_test() {
        let run = run_to_completion(&scenario);
        let result = &run.result;
        assert_eq!(
            result.arrived,
            result.served + result.still_queued,
            "{}",
            scenario.name
        );

        let mut ids: Vec<u64> = run
            .telemetry()
            .completed
            .iter()
            .map(|c| c.customer_id)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len() as u64, result.served, "duplicate completion");
    }
}

#[test]
fn same_seed_gives_identical_results() {
    for scenario in scenarios_under_test() {
        let first = run_scenario(&scenario).expect("first run");
        let second = run_scenario(&scenario).expect("second run");
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).expect("json"),
            serde_json::to_string(&second).expect("json")
        );
    }
}

#[test]
fn different_seeds_give_different_arrival_streams() {
    let a = run_scenario(&Scenario::high_season()).expect("a");
    let b = run_scenario(
        &Scenario::high_season().with_config(Scenario::high_season().config.with_seed(7)),
    )
    .expect("b");
    assert_ne!(a.queue_length_series, b.queue_length_series);
}

#[test]
fn less_demand_never_means_more_waiting() {
    // Same seed, spread, ride and horizon; only the mean inter-arrival differs.
    let pairs = [(120.0, 10.0), (60.0, 8.0), (30.0, 10.0)];
    for (light_mean, heavy_mean) in pairs {
        let light = run_config(
            "light",
            ScenarioConfig::default().with_interarrival(light_mean, 5.0),
        )
        .result;
        let heavy = run_config(
            "heavy",
            ScenarioConfig::default().with_interarrival(heavy_mean, 5.0),
        )
        .result;
        assert!(
            light.wait.mean_secs <= heavy.wait.mean_secs,
            "mean {light_mean}s waited {} but mean {heavy_mean}s waited {}",
            light.wait.mean_secs,
            heavy.wait.mean_secs
        );
    }
}

#[test]
fn arrivals_stop_at_the_horizon_but_rides_in_flight_finish() {
    let run = run_to_completion(&Scenario::high_season());
    let horizon_ms = Scenario::high_season().config.horizon_ms();
    let telemetry = run.telemetry();

    assert!(telemetry
        .queue_samples
        .iter()
        .all(|s| s.timestamp_ms <= horizon_ms));
    assert!(telemetry.cycles.iter().all(|c| c.start_ms <= horizon_ms));
    // The last departure finishes after the horizon and is still counted.
    let last_end = telemetry
        .completed
        .iter()
        .map(|c| c.service_end_ms)
        .max()
        .expect("someone rode");
    assert!(last_end > horizon_ms);
    assert!(run.result.events_discarded >= 2);
}
