//! Headless balance runner for Monte Carlo analysis.
//!
//! Plays many seeded sessions with an automatic strategy to analyze:
//! - How often each scenario ends in a critical state
//! - Score distribution for a given strategy
//! - How often actions succeed in practice
//!
//! Every run drives the same [`Simulator`](crate::game::Simulator) used for
//! interactive play, so results match real gameplay behavior.

mod config;
mod report;
mod runner;
mod strategy;

pub use config::BalanceConfig;
pub use report::{BalanceReport, RunStats};
pub use runner::{play_session, run_balance};
pub use strategy::Strategy;
