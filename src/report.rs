//! Post-session debrief.
//!
//! Built only from the [`GameSummary`] and the action entries of the history,
//! so any front end can produce it without reaching into the simulator.

use crate::core::state::SystemState;
use crate::game::{GameSummary, HistoryEntry, HistoryRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Survived to the end (or quit) without a critical state.
    Completed,
    /// Ended in a critical state.
    SystemCritical,
    /// Still running.
    InProgress,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed => write!(f, "Completed"),
            Outcome::SystemCritical => write!(f, "System critical"),
            Outcome::InProgress => write!(f, "In progress"),
        }
    }
}

/// Letter grade for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    C,
    B,
    A,
    S,
}

impl Rating {
    pub fn from_score(score: i64) -> Self {
        match score {
            s if s < 300 => Rating::C,
            s if s < 500 => Rating::B,
            s if s < 700 => Rating::A,
            _ => Rating::S,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Rating::C => "room for improvement",
            Rating::B => "standard response",
            Rating::A => "strong response",
            Rating::S => "outstanding response",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Rating::C => "C",
            Rating::B => "B",
            Rating::A => "A",
            Rating::S => "S",
        };
        write!(f, "{letter} ({})", self.description())
    }
}

/// One action the player took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLine {
    pub turn: u32,
    pub action: String,
    pub success: bool,
}

/// Improvement advice derived from the final state and the action record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    HighCpu,
    HighMemory,
    DiskDanger,
    ServicesNotRestored,
    HighSlaRisk,
    LowSuccessRatio(f64),
    LowScore,
    ExcellentResult,
    DocumentProcess,
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advice::HighCpu => write!(
                f,
                "CPU usage stayed high. Consider scaling out or load balancing."
            ),
            Advice::HighMemory => write!(
                f,
                "Memory usage stayed high. Investigate memory leaks and tune process footprints."
            ),
            Advice::DiskDanger => write!(
                f,
                "Disk usage is in the danger zone. Automate log cleanup or add storage."
            ),
            Advice::ServicesNotRestored => write!(
                f,
                "Some services were never restored. Consider automatic service recovery."
            ),
            Advice::HighSlaRisk => write!(
                f,
                "SLA risk stayed high. Speed up detection and automate first response."
            ),
            Advice::LowSuccessRatio(ratio) => write!(
                f,
                "Action success ratio was low ({:.0}%). \
                 Practice choosing actions that suit the system state.",
                ratio * 100.0
            ),
            Advice::LowScore => write!(
                f,
                "Overall score was low. Keep training faster first response and sharper judgement."
            ),
            Advice::ExcellentResult => write!(
                f,
                "Excellent response. Share this decision process with the team as a best practice."
            ),
            Advice::DocumentProcess => write!(
                f,
                "Document the incident-response process and share it \
                 to handle similar failures faster."
            ),
        }
    }
}

/// Debrief for a finished (or running) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub generated_at: DateTime<Utc>,
    pub scenario_name: String,
    pub scenario_description: String,
    pub turns_played: u32,
    pub final_state: SystemState,
    pub score: i64,
    pub rating: Rating,
    pub outcome: Outcome,
    pub actions_taken: Vec<ActionLine>,
    pub advice: Vec<Advice>,
}

impl GameReport {
    pub fn new(summary: &GameSummary, history: &[HistoryEntry]) -> Self {
        let actions_taken: Vec<ActionLine> = history
            .iter()
            .filter_map(|entry| match &entry.record {
                HistoryRecord::Action {
                    turn,
                    action_name,
                    success,
                    ..
                } => Some(ActionLine {
                    turn: *turn,
                    action: action_name.clone(),
                    success: *success,
                }),
                _ => None,
            })
            .collect();

        let outcome = if summary.final_state.is_critical() {
            Outcome::SystemCritical
        } else if summary.game_over {
            Outcome::Completed
        } else {
            Outcome::InProgress
        };

        let (scenario_name, scenario_description, initial_services) = match &summary.scenario {
            Some(s) => (s.name.clone(), s.description.clone(), Some(s.initial_services)),
            None => (String::new(), String::new(), None),
        };

        let advice = advise(&summary.final_state, initial_services, &actions_taken, summary.score);

        Self {
            generated_at: Utc::now(),
            scenario_name,
            scenario_description,
            turns_played: summary.turn_count,
            final_state: summary.final_state,
            score: summary.score,
            rating: Rating::from_score(summary.score),
            outcome,
            actions_taken,
            advice,
        }
    }

    /// Fraction of actions that succeeded, if any were taken.
    pub fn success_ratio(&self) -> Option<f64> {
        success_ratio(&self.actions_taken)
    }

    /// Plain-text debrief.
    pub fn render_text(&self) -> String {
        let mut report = String::new();
        let s = &self.final_state;

        report.push_str("===== Infrastructure Risk Simulator - Response Report =====\n");
        report.push_str(&format!(
            "Generated: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        report.push_str(&format!("Scenario: {}\n", self.scenario_name));
        report.push_str(&format!("Description: {}\n", self.scenario_description));
        report.push_str(&format!("Turns played: {}\n", self.turns_played));
        report.push_str(&format!("Final score: {}\n", self.score));
        report.push_str(&format!("Rating: {}\n", self.rating));
        report.push_str(&format!("Result: {}\n\n", self.outcome));

        report.push_str("--- Final system state ---\n");
        report.push_str(&format!("CPU usage: {}%\n", s.cpu));
        report.push_str(&format!("Memory usage: {}%\n", s.memory));
        report.push_str(&format!("Disk usage: {}%\n", s.disk));
        report.push_str(&format!("Network load: {}%\n", s.network));
        report.push_str(&format!("Running services: {}\n", s.services));
        report.push_str(&format!("Alerts: {}\n", s.alerts));
        report.push_str(&format!("SLA risk: {}%\n\n", s.sla_risk));

        report.push_str("--- Actions taken ---\n");
        for line in &self.actions_taken {
            let result = if line.success { "success" } else { "failure" };
            report.push_str(&format!("Turn {}: {} - {}\n", line.turn, line.action, result));
        }
        report.push('\n');

        report.push_str("--- Analysis and advice ---\n");
        for advice in &self.advice {
            report.push_str(&format!("* {advice}\n"));
        }
        report
    }
}

fn success_ratio(actions: &[ActionLine]) -> Option<f64> {
    if actions.is_empty() {
        return None;
    }
    let successes = actions.iter().filter(|a| a.success).count();
    Some(successes as f64 / actions.len() as f64)
}

fn advise(
    state: &SystemState,
    initial_services: Option<u32>,
    actions: &[ActionLine],
    score: i64,
) -> Vec<Advice> {
    let mut advice = Vec::new();

    if state.cpu > 80 {
        advice.push(Advice::HighCpu);
    }
    if state.memory > 75 {
        advice.push(Advice::HighMemory);
    }
    if state.disk > 85 {
        advice.push(Advice::DiskDanger);
    }
    if state.services < initial_services.unwrap_or(crate::core::constants::DEFAULT_SERVICES) {
        advice.push(Advice::ServicesNotRestored);
    }
    if state.sla_risk > 50 {
        advice.push(Advice::HighSlaRisk);
    }
    if let Some(ratio) = success_ratio(actions).filter(|&r| r < 0.7) {
        advice.push(Advice::LowSuccessRatio(ratio));
    }
    if score < 300 {
        advice.push(Advice::LowScore);
    } else if score > 600 {
        advice.push(Advice::ExcellentResult);
    }
    advice.push(Advice::DocumentProcess);

    advice
}
