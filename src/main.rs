//! Interactive incident-response drill.
//!
//! Line-oriented front end over the library: pick a scenario, then each turn
//! read the event, choose an action by number, and get a debrief at the end.

use clap::Parser;
use infra_risk_sim::catalog::Scenario;
use infra_risk_sim::config::{default_log_dir, SimulatorConfig};
use infra_risk_sim::core::random::RngSource;
use infra_risk_sim::core::state::SystemState;
use infra_risk_sim::game::{AvailableAction, EventLog, TurnResult};
use infra_risk_sim::{logging, ActionCatalog, GameReport, ScenarioCatalog, Simulator, VERSION};
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Infrastructure risk incident-response simulator",
    long_about = None
)]
struct Cli {
    /// Scenario id to play (prompted when omitted).
    #[arg(long)]
    scenario: Option<String>,
    /// CSV file with action rows.
    #[arg(long)]
    actions_file: Option<PathBuf>,
    /// CSV file with scenario and event rows.
    #[arg(long)]
    scenarios_file: Option<PathBuf>,
    /// JSON config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,
    /// Turn limit.
    #[arg(long)]
    max_turns: Option<u32>,
    /// Do not write the per-session event log.
    #[arg(long)]
    no_log: bool,
    /// Print the final report as JSON instead of text.
    #[arg(long)]
    report_json: bool,
    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose.saturating_add(1));

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> Result<SimulatorConfig, infra_risk_sim::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => SimulatorConfig::from_json_file(path)?,
        None => SimulatorConfig::default(),
    };
    if let Some(path) = &cli.actions_file {
        config.actions_file = path.clone();
    }
    if let Some(path) = &cli.scenarios_file {
        config.scenarios_file = path.clone();
    }
    if let Some(max_turns) = cli.max_turns {
        config.max_turns = max_turns;
    }
    if cli.no_log {
        config.log_dir = None;
    } else if config.log_dir.is_none() {
        config.log_dir = default_log_dir();
    }
    Ok(config)
}

fn run(cli: &Cli, config: &SimulatorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let scenarios = ScenarioCatalog::load(&config.scenarios_file);
    let actions = ActionCatalog::load(&config.actions_file);

    let rng = match cli.seed {
        Some(seed) => RngSource::<ChaCha8Rng>::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let mut sim = Simulator::new(scenarios, actions, config, rng);
    if let Some(dir) = &config.log_dir {
        match EventLog::create(dir, sim.session_id()) {
            Ok(log) => sim = sim.with_event_log(log),
            Err(err) => warn!(dir = %dir.display(), %err, "event log disabled"),
        }
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("{}", banner(&format!("Infrastructure Risk Simulator v{VERSION}")));

    let scenario_id = match &cli.scenario {
        Some(id) => Some(id.clone()),
        None => select_scenario(sim.scenarios().scenarios(), &mut input)?,
    };
    let scenario = sim.start_scenario(scenario_id.as_deref())?;
    show_scenario(&scenario);
    wait_for_enter(&mut input)?;

    while !sim.is_game_over() {
        let turn = sim.next_turn();
        if turn.game_over {
            if let Some(message) = &turn.message {
                println!("\n{message}");
            }
            break;
        }
        show_turn(&turn, sim.max_turns());

        let offered = sim.available_actions();
        let Some(choice) = select_action(&offered, &mut input)? else {
            if confirm("End the simulation?", &mut input)? {
                break;
            }
            continue;
        };

        let outcome = sim.take_action(&offered[choice].action.id);
        let mark = if outcome.success { "[OK]" } else { "[FAILED]" };
        println!("\n{mark} {}", outcome.message);
        if !outcome.state_changes.is_empty() {
            println!("State changes: {}", outcome.state_changes);
        }
        if outcome.game_over {
            if let Some(message) = &outcome.critical_message {
                println!("\n{message}");
            }
            break;
        }
        wait_for_enter(&mut input)?;
    }

    let report = GameReport::new(&sim.game_summary(), sim.history());
    println!("\n{}", banner("Simulation finished"));
    println!("Final score: {}  Rating: {}\n", report.score, report.rating);
    if cli.report_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }
    if let Some(log) = sim.event_log() {
        println!("\nEvent log: {}", log.path().display());
    }
    Ok(())
}

fn banner(title: &str) -> String {
    let rule = "=".repeat(60);
    format!("{rule}\n{title:^60}\n{rule}")
}

fn bar(value: u32) -> String {
    let filled = (value.min(100) / 5) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}

fn show_scenario(scenario: &Scenario) {
    println!("\n{}", banner(&format!("Scenario: {}", scenario.name)));
    println!("\n{}\n", scenario.description);
    println!("Difficulty: {}", scenario.difficulty);
    println!("Category: {}", scenario.category);
    println!("\nInitial state:");
    println!("  CPU usage:      {}%", scenario.initial_cpu);
    println!("  Memory usage:   {}%", scenario.initial_memory);
    println!("  Disk usage:     {}%", scenario.initial_disk);
    println!("  Network load:   {}%", scenario.initial_network);
    println!("  Services:       {}", scenario.initial_services);
}

fn show_state(state: &SystemState) {
    println!("  CPU      {} {:>3}%", bar(state.cpu), state.cpu);
    println!("  Memory   {} {:>3}%", bar(state.memory), state.memory);
    println!("  Disk     {} {:>3}%", bar(state.disk), state.disk);
    println!("  Network  {} {:>3}%", bar(state.network), state.network);
    println!("  Services {}", state.services);
    println!("  Alerts   {}", state.alerts);
    println!("  SLA risk {} {:>3}%", bar(state.sla_risk), state.sla_risk);
}

fn show_turn(turn: &TurnResult, max_turns: u32) {
    println!("\n{}", banner(&format!("Turn {}/{}", turn.turn, max_turns)));
    if let Some(event) = &turn.event {
        println!("\nEvent: {}", event.name);
        if !event.description.is_empty() {
            println!("  {}", event.description);
        }
        if let Some(effect) = &turn.effect {
            println!("  Effect: {effect}");
        }
    }
    println!("\nSystem state:");
    show_state(&turn.state);
}

fn prompt(message: &str, input: &mut impl BufRead) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn wait_for_enter(input: &mut impl BufRead) -> io::Result<()> {
    prompt("\nPress Enter to continue...", input).map(|_| ())
}

fn select_scenario(
    scenarios: &[Scenario],
    input: &mut impl BufRead,
) -> io::Result<Option<String>> {
    if scenarios.is_empty() {
        return Ok(None);
    }
    println!("\nScenarios:");
    for (i, scenario) in scenarios.iter().enumerate() {
        println!(
            "{}. {} ({}) - {}",
            i + 1,
            scenario.name,
            scenario.difficulty,
            scenario.description
        );
    }
    loop {
        let Some(line) = prompt("\nChoose (number): ", input)? else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(n) if (1..=scenarios.len()).contains(&n) => {
                return Ok(Some(scenarios[n - 1].id.clone()))
            }
            Ok(_) => println!("Enter a listed number"),
            Err(_) => println!("Enter a number"),
        }
    }
}

/// `Ok(None)` means the player cancelled (0 or end of input).
fn select_action(
    offered: &[AvailableAction],
    input: &mut impl BufRead,
) -> io::Result<Option<usize>> {
    println!("\nAvailable actions:");
    for (i, available) in offered.iter().enumerate() {
        let action = &available.action;
        println!(
            "{}. {} [{}] success {:.0}%  expectation {:+.1}",
            i + 1,
            action.name,
            action.category.label(),
            available.success_rate * 100.0,
            available.risk_expectation
        );
        if !action.description.is_empty() {
            println!("     {}", action.description);
        }
    }
    println!("0. Cancel");
    loop {
        let Some(line) = prompt("\nChoose (number): ", input)? else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(0) => return Ok(None),
            Ok(n) if n <= offered.len() => return Ok(Some(n - 1)),
            Ok(_) => println!("Enter a listed number"),
            Err(_) => println!("Enter a number"),
        }
    }
}

fn confirm(message: &str, input: &mut impl BufRead) -> io::Result<bool> {
    loop {
        let Some(line) = prompt(&format!("\n{message} (y/n): "), input)? else {
            return Ok(true);
        };
        match line.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Answer y or n"),
        }
    }
}
