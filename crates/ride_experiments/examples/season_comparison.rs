//! Example: compare the low and high season presets.
//!
//! Runs both presets in parallel, prints their reports and the comparison,
//! then writes the summary CSV next to the current directory.

use ride_core::Scenario;
use ride_experiments::{
    compare, export_summary_csv, format_comparison, format_report, run_parallel_scenarios,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Running season presets in parallel...");
    let results = run_parallel_scenarios(
        vec![Scenario::low_season(), Scenario::high_season()],
        None,
        true,
    )
    .into_iter()
    .collect::<Result<Vec<_>, _>>()?;

    for result in &results {
        println!("\n{}", format_report(result));
    }
    println!("{}", format_comparison(&compare(&results[0], &results[1])));

    export_summary_csv(&results, "season_summary.csv")?;
    println!("Summary written to season_summary.csv");
    Ok(())
}
