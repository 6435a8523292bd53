//! Tournament CLI
//!
//! Replay scenario files against a chess system and report the outcome.

use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tournament::{
    ChessSystem, RunnerConfig, ScenarioConfig, ScenarioOutcome, ScenarioRunner, SystemReport,
};

fn print_usage() {
    println!("Chess Tournament Runner");
    println!();
    println!("Usage:");
    println!("  tournament run <scenario.toml> [--json] [--strict]");
    println!("  tournament help");
    println!();
    println!("Options:");
    println!("  --json      - Print the report as JSON");
    println!("  --strict    - Stop at the first rejected step");
    println!();
    println!("Logging is controlled by RUST_LOG (default: info).");
    println!();
    println!("Examples:");
    println!("  tournament run crates/tournament/scenarios/london.toml");
    println!("  RUST_LOG=debug tournament run scenario.toml --json");
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn print_outcome(outcome: &ScenarioOutcome) {
    println!("=== Scenario result ===");
    println!(
        "Applied {} steps, rejected {}",
        outcome.applied,
        outcome.rejections.len()
    );
    for rejection in &outcome.rejections {
        println!(
            "  step {} ({}): {}",
            rejection.step, rejection.action, rejection.reason
        );
    }
    for entry in &outcome.winners {
        println!("Tournament {} won by player {}", entry.tournament, entry.winner);
    }
    println!();
}

fn run_scenario(args: &[String]) -> Result<()> {
    let Some(path) = args.first() else {
        print_usage();
        bail!("run requires a scenario file");
    };

    let mut json = false;
    let mut strict = false;
    for arg in &args[1..] {
        match arg.as_str() {
            "--json" | "-j" => json = true,
            "--strict" | "-s" => strict = true,
            other => bail!("Unknown option: {}", other),
        }
    }

    let scenario = ScenarioConfig::load(Path::new(path))
        .with_context(|| format!("Failed to load scenario {}", path))?;
    let name = if scenario.name.is_empty() {
        path.as_str()
    } else {
        scenario.name.as_str()
    };

    let mut system = ChessSystem::new();
    let runner = ScenarioRunner::new(RunnerConfig {
        stop_on_rejection: strict,
    });
    let outcome = runner
        .run(&scenario, &mut system)
        .with_context(|| format!("Scenario {} aborted", name))?;

    let report = SystemReport::collect(name, &system).context("Failed to collect report")?;
    if json {
        let output = serde_json::json!({
            "outcome": outcome,
            "report": report,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize report")?
        );
    } else {
        print_outcome(&outcome);
        report.print_report();
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "run" => run_scenario(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            bail!("Unknown command: {}", args[1])
        }
    }
}
