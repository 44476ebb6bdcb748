//! Run both season presets and print the first few boarded visitors.
//!
//! Run with: cargo run -p ride_core --example scenario_run

use bevy_ecs::prelude::World;
use ride_core::clock::{ms_to_secs, SimulationClock};
use ride_core::runner::{initialize_simulation, run_until_empty, simulation_schedule, step_budget};
use ride_core::scenario::{build_scenario, Scenario};
use ride_core::stats::build_result;
use ride_core::telemetry::RideTelemetry;

fn main() {
    const SAMPLE: usize = 10;

    for scenario in [Scenario::low_season(), Scenario::high_season()] {
        let mut world = World::new();
        if let Err(err) = build_scenario(&mut world, &scenario) {
            eprintln!("{}: {err}", scenario.name);
            continue;
        }
        initialize_simulation(&mut world);

        let mut schedule = simulation_schedule();
        let steps = match run_until_empty(&mut world, &mut schedule, step_budget(&scenario.config)) {
            Ok(steps) => steps,
            Err(err) => {
                eprintln!("{}: {err}", scenario.name);
                continue;
            }
        };

        let clock = world.resource::<SimulationClock>();
        println!(
            "--- {} (seed {}) ---",
            scenario.name, scenario.config.seed
        );
        println!("Steps executed: {steps}");
        println!("Simulation ended at {:.0} s", ms_to_secs(clock.now()));

        let telemetry = world.resource::<RideTelemetry>();
        for (i, r) in telemetry.completed.iter().take(SAMPLE).enumerate() {
            println!(
                "  {}  visitor={}  cycle={}  arrived={:.1} s  waited={:.1} s",
                i + 1,
                r.customer_id,
                r.cycle,
                ms_to_secs(r.arrival_ms),
                ms_to_secs(r.wait_ms()),
            );
        }
        if telemetry.completed.len() > SAMPLE {
            println!("  ... and {} more", telemetry.completed.len() - SAMPLE);
        }

        if let Ok(result) = build_result(&world) {
            println!(
                "Served {} of {} visitors, mean wait {:.1} s, utilization {:.1}%",
                result.served,
                result.arrived,
                result.wait.mean_secs,
                result.utilization * 100.0
            );
        }
        println!();
    }
}
