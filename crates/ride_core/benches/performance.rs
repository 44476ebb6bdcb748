//! Performance benchmarks for ride_core using Criterion.rs.

use bevy_ecs::prelude::World;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ride_core::clock::{EventKind, SimulationClock};
use ride_core::distributions::{build_distribution, InterArrivalDistribution};
use ride_core::runner::{initialize_simulation, run_until_empty, simulation_schedule, step_budget};
use ride_core::scenario::{build_scenario, ArrivalDistributionKind, Scenario, ScenarioConfig};

fn bench_simulation_run(c: &mut Criterion) {
    let scenarios = vec![
        ("low_season", 120.0, 30.0),
        ("high_season", 30.0, 10.0),
        ("overloaded", 10.0, 3.0),
    ];

    let mut group = c.benchmark_group("simulation_run");
    for (name, mean, spread) in scenarios {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(mean, spread),
            |b, &(mean, spread)| {
                b.iter(|| {
                    let mut world = World::new();
                    let scenario = Scenario::custom(
                        name,
                        ScenarioConfig::default()
                            .with_seed(42)
                            .with_interarrival(mean, spread),
                    );
                    build_scenario(&mut world, &scenario).expect("valid scenario");
                    initialize_simulation(&mut world);
                    let mut schedule = simulation_schedule();
                    black_box(run_until_empty(
                        &mut world,
                        &mut schedule,
                        step_budget(&scenario.config),
                    ))
                });
            },
        );
    }
    group.finish();
}

fn bench_distributions(c: &mut Criterion) {
    let mut group = c.benchmark_group("interarrival_sampling");
    for kind in [
        ArrivalDistributionKind::UniformJitter,
        ArrivalDistributionKind::Normal,
        ArrivalDistributionKind::Exponential,
    ] {
        let distribution =
            build_distribution(&ScenarioConfig::default().with_distribution(kind));
        let mut rng = StdRng::seed_from_u64(42);
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| black_box(distribution.sample_secs(&mut rng)));
        });
    }
    group.finish();
}

fn bench_clock(c: &mut Criterion) {
    c.bench_function("clock_schedule_pop_10k", |b| {
        b.iter(|| {
            let mut clock = SimulationClock::default();
            for i in 0..10_000u64 {
                clock.schedule_at((i * 7_919) % 100_000, EventKind::CustomerArrival, None);
            }
            while let Some(event) = clock.pop_next() {
                black_box(event);
            }
        });
    });
}

criterion_group!(benches, bench_simulation_run, bench_distributions, bench_clock);
criterion_main!(benches);
