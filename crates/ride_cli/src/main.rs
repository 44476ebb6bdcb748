use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use ride_core::runner::run_scenario;
use ride_core::scenario::Scenario;
use ride_core::SimulationResult;
use ride_experiments::{
    compare, export_queue_series_csv, export_summary_csv, export_to_json, export_wait_times_csv,
    format_comparison, format_report, run_parallel_scenarios,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{resolve_presets, Cli, Commands, ExportFormat, ParallelArgs};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

// ── helpers ────────────────────────────────────────────────────────

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_all(scenarios: Vec<Scenario>, parallel: &ParallelArgs) -> CliResult<Vec<SimulationResult>> {
    let results = run_parallel_scenarios(scenarios, parallel.threads, !parallel.no_progress);
    Ok(results.into_iter().collect::<Result<Vec<_>, _>>()?)
}

fn step(label: &str) {
    println!("\n{}\n{label}\n{}", "=".repeat(60), "=".repeat(60));
}

// ── commands ───────────────────────────────────────────────────────

fn run_command(scenario: Scenario) -> CliResult<()> {
    step(&format!("SIMULATION - {}", scenario.name.to_uppercase()));
    let result = run_scenario(&scenario)?;
    println!("{}", format_report(&result));
    Ok(())
}

fn compare_command(names: &[String], parallel: &ParallelArgs) -> CliResult<()> {
    let results = run_all(resolve_presets(names)?, parallel)?;

    step("DETAILED REPORTS");
    for result in &results {
        println!("{}", format_report(result));
        println!("{}", "-".repeat(50));
    }

    if let Some((baseline, others)) = results.split_first() {
        for other in others {
            println!("{}", format_comparison(&compare(baseline, other)));
        }
    }
    Ok(())
}

fn export_command(
    out_dir: &Path,
    names: &[String],
    format: ExportFormat,
    parallel: &ParallelArgs,
) -> CliResult<()> {
    let results = run_all(resolve_presets(names)?, parallel)?;
    std::fs::create_dir_all(out_dir)
        .map_err(|err| format!("Failed to create {}: {err}", out_dir.display()))?;

    let mut written = Vec::new();
    if format.includes_csv() {
        let summary = out_dir.join("summary.csv");
        export_summary_csv(&results, &summary)?;
        let waits = out_dir.join("wait_times.csv");
        export_wait_times_csv(&results, &waits)?;
        let queue = out_dir.join("queue_length.csv");
        export_queue_series_csv(&results, &queue)?;
        written.extend([summary, waits, queue]);
    }
    if format.includes_json() {
        let json = out_dir.join("results.json");
        export_to_json(&results, &json)?;
        written.push(json);
    }

    info!(files = written.len(), out_dir = %out_dir.display(), "export finished");
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn presets_command() {
    for name in Scenario::preset_names() {
        match Scenario::preset(name) {
            Ok(scenario) => println!(
                "{:<12} {} ({}s ± {}s)",
                name,
                scenario.description,
                scenario.config.mean_interarrival_secs,
                scenario.config.interarrival_spread_secs
            ),
            Err(_) => println!("{name}"),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Run(args) => args.resolve_scenario().and_then(run_command),
        Commands::Compare {
            scenarios,
            parallel,
        } => compare_command(&scenarios, &parallel),
        Commands::Export {
            out_dir,
            scenarios,
            format,
            parallel,
        } => export_command(&out_dir, &scenarios, format, &parallel),
        Commands::Presets => {
            presets_command();
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
