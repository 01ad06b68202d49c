//! Automatic action selection for headless play.

use crate::core::random::RandomSource;
use crate::game::AvailableAction;
use std::fmt;
use std::str::FromStr;

/// How the automatic player chooses among offered actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Highest risk expectation
    BestExpectation,
    /// Highest success rate
    HighestSuccessRate,
    /// Uniformly random
    Random,
}

impl Strategy {
    /// Index of the chosen action, or `None` when nothing is offered.
    pub fn choose(self, offered: &[AvailableAction], rng: &mut impl RandomSource) -> Option<usize> {
        if offered.is_empty() {
            return None;
        }
        match self {
            Strategy::BestExpectation => argmax(offered, |a| a.risk_expectation),
            Strategy::HighestSuccessRate => argmax(offered, |a| a.success_rate),
            Strategy::Random => Some(rng.pick_index(offered.len())),
        }
    }
}

/// First index with the largest key.
fn argmax(offered: &[AvailableAction], key: impl Fn(&AvailableAction) -> f64) -> Option<usize> {
    offered
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, a)| {
            let k = key(a);
            match best {
                Some((_, best_k)) if best_k >= k => best,
                _ => Some((i, k)),
            }
        })
        .map(|(i, _)| i)
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "best" | "expectation" | "best-expectation" => Ok(Strategy::BestExpectation),
            "rate" | "highest-rate" | "highest-success-rate" => Ok(Strategy::HighestSuccessRate),
            "random" => Ok(Strategy::Random),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BestExpectation => write!(f, "best-expectation"),
            Strategy::HighestSuccessRate => write!(f, "highest-success-rate"),
            Strategy::Random => write!(f, "random"),
        }
    }
}
