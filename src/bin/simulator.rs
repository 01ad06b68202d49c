//! Headless balance simulator.
//!
//! Plays many sessions with an automatic strategy and prints aggregate
//! results. Uses the same `Simulator` as interactive play.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]

use clap::Parser;
use infra_risk_sim::balance::{run_balance, BalanceConfig, BalanceReport, Strategy};
use infra_risk_sim::config::SimulatorConfig;
use infra_risk_sim::core::constants::DEFAULT_MAX_TURNS;
use infra_risk_sim::{logging, ActionCatalog, ScenarioCatalog};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Headless balance runner for the incident-response simulator",
    long_about = None
)]
struct Cli {
    /// Number of sessions to play.
    #[arg(long, default_value_t = 1000)]
    runs: u32,
    /// RNG seed; run N uses seed + N.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Turn limit per session.
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,
    /// best-expectation, highest-success-rate or random.
    #[arg(long, default_value = "best-expectation")]
    strategy: Strategy,
    /// Play only this scenario (random per run when omitted).
    #[arg(long)]
    scenario: Option<String>,
    /// CSV file with action rows.
    #[arg(long)]
    actions_file: Option<PathBuf>,
    /// CSV file with scenario and event rows.
    #[arg(long)]
    scenarios_file: Option<PathBuf>,
    /// Per-run log lines.
    #[arg(long)]
    verbose: bool,
    /// Only the final summary line.
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbosity = if cli.quiet {
        0
    } else if cli.verbose {
        2
    } else {
        1
    };
    logging::init(verbosity);

    let defaults = SimulatorConfig::default();
    let scenarios_file = cli.scenarios_file.unwrap_or(defaults.scenarios_file);
    let actions_file = cli.actions_file.unwrap_or(defaults.actions_file);
    let scenarios = ScenarioCatalog::load(&scenarios_file);
    let actions = ActionCatalog::load(&actions_file);

    let config = BalanceConfig {
        runs: cli.runs,
        seed: Some(cli.seed),
        max_turns: cli.max_turns,
        strategy: cli.strategy,
        scenario_id: cli.scenario,
        verbosity,
    };

    if !cli.quiet {
        eprintln!(
            "Balance run: {} session(s), seed={}, strategy={}, max_turns={}",
            config.runs, cli.seed, config.strategy, config.max_turns
        );
    }

    let report = match run_balance(&config, &scenarios, &actions) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if cli.quiet {
        print_summary_line(&report, cli.seed);
    } else {
        print!("{}", report.to_text());
    }
    ExitCode::SUCCESS
}

fn print_summary_line(report: &BalanceReport, seed: u64) {
    println!(
        "seed={seed} runs={} survived={} critical={} avg_score={:.1} min={} max={} \
         avg_turns={:.1} success={:.1}%",
        report.num_runs,
        report.runs_survived,
        report.runs_critical,
        report.avg_score,
        report.min_score,
        report.max_score,
        report.avg_turns,
        report.action_success_ratio * 100.0,
    );
}
