//! Simulation core: state transitions, randomness and outcome math.

pub mod constants;
pub mod probability;
pub mod random;
pub mod state;

pub use probability::{risk_expectation, roll_success, success_modifiers, success_rate, Modifier};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use state::{CriticalReason, StateDelta, SystemState};
