//! Session orchestration: the turn loop, its results and its history.

pub mod history;
pub mod outcome;
pub mod simulator;

pub use history::{EventLog, HistoryEntry, HistoryRecord};
pub use outcome::{ActionOutcome, AvailableAction, GameSummary, Phase, TurnResult, TurnStatus};
pub use simulator::{score_for, Simulator};
