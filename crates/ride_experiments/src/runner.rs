//! Parallel scenario execution using rayon.
//!
//! Every run owns its own `World`, so runs share no state and each result is
//! identical to what a sequential `run_scenario` call would produce.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use ride_core::runner::run_scenario;
use ride_core::scenario::Scenario;
use ride_core::{SimulationError, SimulationResult};
use tracing::{info, warn};

/// Run a single scenario to completion.
pub fn run_single_scenario(scenario: &Scenario) -> Result<SimulationResult, SimulationError> {
    let result = run_scenario(scenario);
    if let Err(err) = &result {
        warn!(scenario = %scenario.name, error = %err, "scenario failed");
    }
    result
}

fn progress_bar(total: usize) -> Option<ProgressBar> {
    let bar = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .ok()?
        .progress_chars("#>-");
    bar.set_style(style);
    Some(bar)
}

/// Run multiple scenarios in parallel with an optional progress bar.
///
/// # Arguments
///
/// * `scenarios` - Scenarios to run
/// * `num_threads` - Optional number of threads. If None, uses rayon's default.
/// * `show_progress` - Whether to display a progress bar
///
/// # Returns
///
/// One result per scenario, in the same order as the input. A failing
/// scenario does not stop the others.
pub fn run_parallel_scenarios(
    scenarios: Vec<Scenario>,
    num_threads: Option<usize>,
    show_progress: bool,
) -> Vec<Result<SimulationResult, SimulationError>> {
    let total = scenarios.len();
    let pb = if show_progress && total > 0 {
        progress_bar(total)
    } else {
        None
    };

    let run_all = || -> Vec<Result<SimulationResult, SimulationError>> {
        scenarios
            .par_iter()
            .map(|scenario| {
                let result = run_single_scenario(scenario);
                if let Some(ref progress_bar) = pb {
                    progress_bar.inc(1);
                }
                result
            })
            .collect()
    };

    let builder = match num_threads {
        Some(threads) => rayon::ThreadPoolBuilder::new().num_threads(threads),
        None => rayon::ThreadPoolBuilder::new(),
    };
    let results = match builder.build() {
        Ok(pool) => pool.install(run_all),
        Err(err) => {
            warn!(error = %err, "could not build a dedicated thread pool, using the global one");
            run_all()
        }
    };

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }
    info!(
        scenarios = total,
        failed = results.iter().filter(|r| r.is_err()).count(),
        "parallel scenarios finished"
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use ride_core::error::ConfigError;
    use ride_core::scenario::ScenarioConfig;

    fn short(name: &str, mean: f64) -> Scenario {
        Scenario::custom(
            name,
            ScenarioConfig::default()
                .with_interarrival(mean, 5.0)
                .with_horizon_hours(1.0),
        )
    }

    #[test]
    fn test_parallel_results_keep_input_order() {
        let scenarios = vec![short("a", 120.0), short("b", 30.0), short("c", 60.0)];
        let results = run_parallel_scenarios(scenarios, Some(2), false);

        let names: Vec<&str> = results
            .iter()
            .map(|r| r.as_ref().expect("valid scenario").scenario.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let scenarios = vec![Scenario::low_season(), Scenario::high_season()];
        let parallel = run_parallel_scenarios(scenarios.clone(), Some(2), false);
        for (scenario, result) in scenarios.iter().zip(parallel) {
            assert_eq!(result, run_scenario(scenario));
        }
    }

    #[test]
    fn test_failing_scenario_does_not_stop_others() {
        let broken = Scenario::custom("broken", ScenarioConfig::default().with_capacity(0));
        let results = run_parallel_scenarios(vec![broken, short("ok", 60.0)], None, false);

        assert_eq!(
            results[0],
            Err(SimulationError::Config(ConfigError::ZeroCapacity))
        );
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert!(run_parallel_scenarios(Vec::new(), None, true).is_empty());
    }
}
