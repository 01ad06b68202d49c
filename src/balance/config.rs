//! Balance run configuration.

use super::strategy::Strategy;
use crate::core::constants::DEFAULT_MAX_TURNS;

/// Configuration for a balance run.
#[derive(Debug, Clone)]
pub struct BalanceConfig {
    /// Number of sessions to play
    pub runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Turn limit per session
    pub max_turns: u32,

    /// How the automatic player picks actions
    pub strategy: Strategy,

    /// Fixed scenario id (None = random scenario per run)
    pub scenario_id: Option<String>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            runs: 1000,
            seed: None,
            max_turns: DEFAULT_MAX_TURNS,
            strategy: Strategy::BestExpectation,
            scenario_id: None,
            verbosity: 1,
        }
    }
}

impl BalanceConfig {
    /// Quick config for checking one scenario
    pub fn scenario_check(scenario_id: &str, runs: u32) -> Self {
        Self {
            runs,
            scenario_id: Some(scenario_id.to_string()),
            ..Default::default()
        }
    }

    /// Quick config for comparing a strategy against the baseline
    pub fn strategy_comparison(strategy: Strategy, seed: u64) -> Self {
        Self {
            runs: 200,
            seed: Some(seed),
            strategy,
            ..Default::default()
        }
    }
}
