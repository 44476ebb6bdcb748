//! Multi-scenario experimentation on top of `ride_core`.
//!
//! Runs several ride scenarios in parallel, renders console reports and
//! side-by-side comparisons, and exports results to CSV and JSON.
//!
//! # Quick Start
//!
//! ```no_run
//! use ride_core::Scenario;
//! use ride_experiments::{compare, format_comparison, run_parallel_scenarios};
//!
//! let scenarios = vec![Scenario::low_season(), Scenario::high_season()];
//! let results = run_parallel_scenarios(scenarios, None, false);
//!
//! let low = results[0].as_ref().expect("low season runs");
//! let high = results[1].as_ref().expect("high season runs");
//! println!("{}", format_comparison(&compare(low, high)));
//! ```
//!
//! # Architecture
//!
//! - [`runner`]: parallel scenario execution using rayon
//! - [`report`]: console report and baseline comparison
//! - [`export`]: result export to CSV/JSON

pub mod export;
pub mod report;
pub mod runner;

#[cfg(test)]
mod test_support;

pub use export::{
    export_queue_series_csv, export_summary_csv, export_to_json, export_wait_times_csv,
};
pub use report::{compare, format_comparison, format_report, Comparison};
pub use runner::{run_parallel_scenarios, run_single_scenario};
