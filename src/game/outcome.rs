//! Plain result records returned by the simulator.
//!
//! Everything here is `Serialize` so a CLI or HTTP layer can hand results
//! straight to its output format.

use crate::catalog::{Action, Event, Scenario};
use crate::core::state::{StateDelta, SystemState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    GameOver,
}

/// How a `next_turn` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    /// Turn advanced and the system survived the event.
    Advanced,
    /// The event pushed the system into a critical state.
    Critical,
    /// The turn limit was passed; no event was drawn.
    MaxTurnsReached,
    /// The session had already ended.
    AlreadyOver,
    /// No scenario has been started.
    NotStarted,
}

/// Result of advancing one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub status: TurnStatus,
    pub game_over: bool,
    pub turn: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<StateDelta>,
    pub state: SystemState,
}

impl TurnResult {
    pub(crate) fn terminal(
        status: TurnStatus,
        turn: u32,
        message: &str,
        state: SystemState,
    ) -> Self {
        Self {
            status,
            game_over: status != TurnStatus::NotStarted,
            turn,
            message: Some(message.to_string()),
            event: None,
            effect: None,
            state,
        }
    }
}

/// An offered action annotated for the current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableAction {
    #[serde(flatten)]
    pub action: Action,
    /// Success probability in the state the action was offered in
    pub success_rate: f64,
    /// Advisory expected value (higher is better)
    pub risk_expectation: f64,
}

/// Result of taking an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
    /// Whether the action was actually resolved (false for rejected calls)
    pub resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
    pub state_changes: StateDelta,
    pub state: SystemState,
    pub game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_message: Option<String>,
}

impl ActionOutcome {
    pub(crate) fn rejected(message: String, state: SystemState, game_over: bool) -> Self {
        Self {
            success: false,
            message,
            resolved: false,
            success_rate: None,
            state_changes: StateDelta::default(),
            state,
            game_over,
            critical_message: None,
        }
    }
}

/// End-of-session (or in-progress) summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub session_id: Uuid,
    pub scenario: Option<Scenario>,
    pub turn_count: u32,
    pub max_turns: u32,
    pub final_state: SystemState,
    pub score: i64,
    pub game_over: bool,
    pub phase: Phase,
}
