//! The turn loop.
//!
//! A [`Simulator`] owns one playthrough: the system state, both catalogs
//! (including cooldowns), the random source and the history. Each turn the
//! system decays, a random event lands, and the caller may resolve one
//! action against the resulting state.

use super::history::{EventLog, HistoryEntry, HistoryRecord};
use super::outcome::{ActionOutcome, AvailableAction, GameSummary, Phase, TurnResult, TurnStatus};
use crate::catalog::{ActionCatalog, Event, Scenario, ScenarioCatalog};
use crate::config::SimulatorConfig;
use crate::core::constants::*;
use crate::core::probability::{risk_expectation, roll_success, success_rate};
use crate::core::random::{RandomSource, RngSource};
use crate::core::state::SystemState;
use crate::error::GameError;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use uuid::Uuid;

/// Score for a state at a given turn.
///
/// `services*100 + 50 (cpu and memory both under 60) + max(0, (10-turn)*30) - sla_risk*5`
pub fn score_for(state: &SystemState, turn: u32) -> i64 {
    let base = i64::from(state.services) * SCORE_PER_SERVICE;
    let stability = if state.cpu < SCORE_STABILITY_THRESHOLD
        && state.memory < SCORE_STABILITY_THRESHOLD
    {
        SCORE_STABILITY_BONUS
    } else {
        0
    };
    let speed = ((SCORE_SPEED_TURNS - i64::from(turn)) * SCORE_SPEED_PER_TURN).max(0);
    let sla_penalty = i64::from(state.sla_risk) * SCORE_SLA_PENALTY;
    base + stability + speed - sla_penalty
}

/// One playthrough of the incident-response game.
#[derive(Debug)]
pub struct Simulator<R> {
    state: SystemState,
    scenarios: ScenarioCatalog,
    actions: ActionCatalog,
    rng: R,
    max_turns: u32,
    max_actions_offered: usize,
    turn: u32,
    phase: Phase,
    history: Vec<HistoryEntry>,
    scenario: Option<Scenario>,
    current_event: Option<Event>,
    session_id: Uuid,
    event_log: Option<EventLog>,
}

impl Simulator<RngSource<ChaCha8Rng>> {
    /// Session with a reproducible random stream.
    pub fn seeded(
        scenarios: ScenarioCatalog,
        actions: ActionCatalog,
        config: &SimulatorConfig,
        seed: u64,
    ) -> Self {
        Self::new(scenarios, actions, config, RngSource::seeded(seed))
    }

    /// Session with an entropy-seeded random stream.
    pub fn from_entropy(
        scenarios: ScenarioCatalog,
        actions: ActionCatalog,
        config: &SimulatorConfig,
    ) -> Self {
        Self::new(scenarios, actions, config, RngSource::from_entropy())
    }
}

impl<R: RandomSource> Simulator<R> {
    pub fn new(
        scenarios: ScenarioCatalog,
        actions: ActionCatalog,
        config: &SimulatorConfig,
        rng: R,
    ) -> Self {
        Self {
            state: SystemState::default(),
            scenarios,
            actions,
            rng,
            max_turns: config.max_turns,
            max_actions_offered: config.max_actions_offered,
            turn: 0,
            phase: Phase::NotStarted,
            history: Vec::new(),
            scenario: None,
            current_event: None,
            session_id: Uuid::new_v4(),
            event_log: None,
        }
    }

    /// Mirror every history entry into `log`.
    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.event_log = Some(log);
        self
    }

    pub fn state(&self) -> SystemState {
        self.state.snapshot()
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn max_turns(&self) -> u32 {
        self.max_turns
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    pub fn current_event(&self) -> Option<&Event> {
        self.current_event.as_ref()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn scenarios(&self) -> &ScenarioCatalog {
        &self.scenarios
    }

    pub fn actions(&self) -> &ActionCatalog {
        &self.actions
    }

    pub fn event_log(&self) -> Option<&EventLog> {
        self.event_log.as_ref()
    }

    /// Start (or restart) a session from a scenario.
    ///
    /// With `None` a scenario is drawn at random. Resets the state from the
    /// scenario's initial values, the turn counter, history and cooldowns.
    pub fn start_scenario(&mut self, scenario_id: Option<&str>) -> Result<Scenario, GameError> {
        let scenario = match scenario_id {
            Some(id) => self
                .scenarios
                .scenario_by_id(id)
                .cloned()
                .ok_or_else(|| GameError::UnknownScenario(id.to_string()))?,
            None => self.scenarios.random_scenario(&mut self.rng),
        };

        self.state = SystemState::new(
            scenario.initial_cpu,
            scenario.initial_memory,
            scenario.initial_disk,
            scenario.initial_network,
            scenario.initial_services,
            SCENARIO_START_ALERTS,
            SCENARIO_START_SLA_RISK,
        );
        self.turn = 0;
        self.history.clear();
        self.actions.clear_cooldowns();
        self.current_event = None;
        self.phase = Phase::Running;

        info!(
            session = %self.session_id,
            scenario = %scenario.id,
            difficulty = %scenario.difficulty,
            "scenario started"
        );

        self.log_event(HistoryRecord::ScenarioStart {
            scenario_id: scenario.id.clone(),
            scenario_name: scenario.name.clone(),
            description: scenario.description.clone(),
        });

        self.scenario = Some(scenario.clone());
        Ok(scenario)
    }

    /// Advance one turn: decay, draw an event, apply it, check criticality.
    pub fn next_turn(&mut self) -> TurnResult {
        match self.phase {
            Phase::NotStarted => {
                return TurnResult::terminal(
                    TurnStatus::NotStarted,
                    self.turn,
                    "No scenario in progress",
                    self.state,
                )
            }
            Phase::GameOver => {
                return TurnResult::terminal(
                    TurnStatus::AlreadyOver,
                    self.turn,
                    "The game has already ended",
                    self.state,
                )
            }
            Phase::Running => {}
        }

        self.turn += 1;

        if self.turn > self.max_turns {
            self.phase = Phase::GameOver;
            info!(session = %self.session_id, turn = self.turn, "turn limit reached");
            return TurnResult::terminal(
                TurnStatus::MaxTurnsReached,
                self.turn,
                "Reached the maximum number of turns",
                self.state,
            );
        }

        self.state.natural_progression();

        let event = self.scenarios.random_event(&mut self.rng);
        let effect = self.state.apply_event(&event);
        self.current_event = Some(event.clone());
        debug!(turn = self.turn, event = %event.id, %effect, "event applied");

        if self.state.is_critical() {
            self.phase = Phase::GameOver;
            let reasons = self.state.critical_reasons();
            info!(
                session = %self.session_id,
                turn = self.turn,
                ?reasons,
                "system critical after event"
            );
            self.log_event(HistoryRecord::CriticalState {
                turn: self.turn,
                state: self.state,
            });
            return TurnResult {
                status: TurnStatus::Critical,
                game_over: true,
                turn: self.turn,
                message: Some(critical_message(&self.state)),
                event: Some(event),
                effect: Some(effect),
                state: self.state,
            };
        }

        self.log_event(HistoryRecord::Event {
            turn: self.turn,
            event_id: event.id.clone(),
            event_name: event.name.clone(),
            description: event.description.clone(),
            effect,
        });

        TurnResult {
            status: TurnStatus::Advanced,
            game_over: false,
            turn: self.turn,
            message: None,
            event: Some(event),
            effect: Some(effect),
            state: self.state,
        }
    }

    /// Actions that can be taken now, each annotated with its success rate
    /// and risk expectation for the current state.
    ///
    /// Ticks action cooldowns as a side effect; call it once per turn.
    pub fn available_actions(&mut self) -> Vec<AvailableAction> {
        let state = self.state;
        self.actions
            .available(self.max_actions_offered, &mut self.rng)
            .into_iter()
            .map(|action| AvailableAction {
                success_rate: success_rate(&action, &state),
                risk_expectation: risk_expectation(&action, &state),
                action,
            })
            .collect()
    }

    /// Resolve an action against the current state.
    pub fn take_action(&mut self, action_id: &str) -> ActionOutcome {
        match self.phase {
            Phase::NotStarted => {
                return ActionOutcome::rejected(
                    "No scenario in progress".to_string(),
                    self.state,
                    false,
                )
            }
            Phase::GameOver => {
                return ActionOutcome::rejected(
                    "The game has already ended".to_string(),
                    self.state,
                    true,
                )
            }
            Phase::Running => {}
        }

        let Some(action) = self.actions.by_id(action_id).cloned() else {
            return ActionOutcome::rejected(
                format!("Unknown action: {action_id}"),
                self.state,
                false,
            );
        };

        let rate = success_rate(&action, &self.state);
        let success = roll_success(rate, &mut self.rng);
        let changes = self.state.apply_action(&action, success);
        self.actions.set_cooldown(&action.id, action.cooldown);

        let critical = self.state.is_critical();
        if critical {
            self.phase = Phase::GameOver;
            info!(
                session = %self.session_id,
                turn = self.turn,
                action = %action.id,
                "system critical after action"
            );
        }
        debug!(turn = self.turn, action = %action.id, success, rate, %changes, "action resolved");

        self.log_event(HistoryRecord::Action {
            turn: self.turn,
            action_id: action.id.clone(),
            action_name: action.name.clone(),
            success,
            success_rate: rate,
            state_changes: changes,
            state_after: self.state,
        });

        ActionOutcome {
            success,
            message: format!(
                "Executed '{}': {}",
                action.name,
                if success { "success" } else { "failure" }
            ),
            resolved: true,
            success_rate: Some(rate),
            state_changes: changes,
            state: self.state,
            game_over: critical,
            critical_message: critical.then(|| critical_message(&self.state)),
        }
    }

    /// Current score. Derived, never stored.
    pub fn calculate_score(&self) -> i64 {
        score_for(&self.state, self.turn)
    }

    pub fn game_summary(&self) -> GameSummary {
        GameSummary {
            session_id: self.session_id,
            scenario: self.scenario.clone(),
            turn_count: self.turn,
            max_turns: self.max_turns,
            final_state: self.state,
            score: self.calculate_score(),
            game_over: self.is_game_over(),
            phase: self.phase,
        }
    }

    /// Timestamp and append a record to the history (and the event log, if any).
    pub fn log_event(&mut self, record: HistoryRecord) {
        let entry = HistoryEntry::now(record);
        if let Some(log) = self.event_log.as_mut() {
            log.append(&entry);
        }
        self.history.push(entry);
    }
}

fn critical_message(state: &SystemState) -> String {
    let reasons: Vec<String> = state.critical_reasons().iter().map(ToString::to_string).collect();
    format!("The system has reached a critical state: {}", reasons.join(", "))
}
