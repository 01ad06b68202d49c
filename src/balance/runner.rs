//! Balance runner using the real simulator.

use super::config::BalanceConfig;
use super::report::{BalanceReport, RunStats};
use super::strategy::Strategy;
use crate::catalog::{ActionCatalog, ScenarioCatalog};
use crate::config::SimulatorConfig;
use crate::core::random::{RandomSource, RngSource};
use crate::error::GameError;
use crate::game::Simulator;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Play `config.runs` sessions and aggregate the results.
///
/// Each run gets fresh copies of the catalogs (so cooldowns never leak
/// between runs) and its own RNG seeded with `seed + run_index`.
pub fn run_balance(
    config: &BalanceConfig,
    scenarios: &ScenarioCatalog,
    actions: &ActionCatalog,
) -> Result<BalanceReport, GameError> {
    let sim_config = SimulatorConfig {
        max_turns: config.max_turns,
        ..Default::default()
    };
    let mut all_runs = Vec::with_capacity(config.runs as usize);

    for run_idx in 0..config.runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(u64::from(run_idx))),
            None => ChaCha8Rng::from_entropy(),
        };
        let game_rng = RngSource(ChaCha8Rng::seed_from_u64(rng.gen()));
        let mut player_rng = RngSource(rng);

        let mut sim = Simulator::new(scenarios.clone(), actions.clone(), &sim_config, game_rng);
        sim.start_scenario(config.scenario_id.as_deref())?;
        let stats = play_session(&mut sim, config.strategy, &mut player_rng);

        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                runs = config.runs,
                scenario = %stats.scenario_id,
                score = stats.score,
                turns = stats.turns,
                critical = stats.critical,
                "run finished"
            );
        }
        all_runs.push(stats);
    }

    let report = BalanceReport::from_runs(all_runs, config.strategy);
    if config.verbosity >= 1 {
        info!(
            runs = report.num_runs,
            critical = report.runs_critical,
            avg_score = report.avg_score,
            "balance run complete"
        );
    }
    Ok(report)
}

/// Play a started session to the end with `strategy`.
pub fn play_session<R: RandomSource>(
    sim: &mut Simulator<R>,
    strategy: Strategy,
    player_rng: &mut impl RandomSource,
) -> RunStats {
    let mut actions_taken = 0;
    let mut actions_succeeded = 0;

    while !sim.is_game_over() {
        let turn = sim.next_turn();
        if turn.game_over {
            break;
        }

        let offered = sim.available_actions();
        let Some(choice) = strategy.choose(&offered, player_rng) else {
            debug!(turn = sim.turn(), "no action available, waiting");
            continue;
        };

        let outcome = sim.take_action(&offered[choice].action.id);
        actions_taken += 1;
        if outcome.success {
            actions_succeeded += 1;
        }
    }

    let summary = sim.game_summary();
    RunStats {
        scenario_id: summary.scenario.map(|s| s.id).unwrap_or_default(),
        score: summary.score,
        turns: summary.turn_count,
        critical: summary.final_state.is_critical(),
        actions_taken,
        actions_succeeded,
        final_state: summary.final_state,
    }
}
