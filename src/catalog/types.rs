//! Catalog record types: actions, scenarios and events.

use crate::core::constants::DEFAULT_BASE_SUCCESS_RATE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed deltas applied to the system state by an event or a successful action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Effects {
    pub cpu_effect: i32,
    pub memory_effect: i32,
    pub disk_effect: i32,
    pub network_effect: i32,
    pub service_effect: i32,
    pub alert_effect: i32,
    pub sla_risk_effect: i32,
}

/// Sparse override applied instead of the default failure policy when an action fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FailureEffects {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_effect: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_effect: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_effect: Option<i32>,
}

impl FailureEffects {
    pub fn is_empty(&self) -> bool {
        self.cpu_effect.is_none() && self.memory_effect.is_none() && self.service_effect.is_none()
    }
}

/// Action category. Drives the category-specific success modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    SystemOperation,
    ApplicationFailure,
    Maintenance,
    Other(String),
}

impl Category {
    /// Parse a catalog label. Accepts English labels in any case and the
    /// Japanese labels found in older catalog files.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().replace(['_', '-'], " ").as_str() {
            "system operation" | "システム操作" => Category::SystemOperation,
            "application failure" | "アプリケーション障害" => {
                Category::ApplicationFailure
            }
            "maintenance" | "メンテナンス" => Category::Maintenance,
            _ => Category::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::SystemOperation => "System Operation",
            Category::ApplicationFailure => "Application Failure",
            Category::Maintenance => "Maintenance",
            Category::Other(label) => label,
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::parse(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A player-selectable remediation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    #[serde(flatten)]
    pub effects: Effects,
    pub base_success_rate: f64,
    /// Turns before the action can be offered again.
    pub cooldown: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_effects: Option<FailureEffects>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_tag: Option<String>,
}

impl Action {
    /// Minimal action with neutral effects, mostly useful for tests and tooling.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            effects: Effects::default(),
            base_success_rate: DEFAULT_BASE_SUCCESS_RATE,
            cooldown: 0,
            failure_effects: None,
            skill_tag: None,
        }
    }

    pub fn with_effects(mut self, effects: Effects) -> Self {
        self.effects = effects;
        self
    }

    pub fn with_success_rate(mut self, rate: f64) -> Self {
        self.base_success_rate = rate;
        self
    }

    pub fn with_cooldown(mut self, turns: u32) -> Self {
        self.cooldown = turns;
        self
    }

    pub fn with_failure_effects(mut self, failure: FailureEffects) -> Self {
        self.failure_effects = Some(failure);
        self
    }

    /// Whether the action name refers to disk work.
    pub fn targets_disk(&self) -> bool {
        self.name.to_lowercase().contains("disk") || self.name.contains("ディスク")
    }
}

/// Scenario difficulty label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "EASY" => Difficulty::Easy,
            "HARD" => Difficulty::Hard,
            _ => Difficulty::Normal,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "EASY"),
            Difficulty::Normal => write!(f, "NORMAL"),
            Difficulty::Hard => write!(f, "HARD"),
        }
    }
}

/// Initial-condition template for a playthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub initial_cpu: u32,
    pub initial_memory: u32,
    pub initial_disk: u32,
    pub initial_network: u32,
    pub initial_services: u32,
    pub difficulty: Difficulty,
}

/// A random perturbation applied once per turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(flatten)]
    pub effects: Effects,
}

impl Event {
    pub fn new(id: impl Into<String>, name: impl Into<String>, effects: Effects) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: String::new(),
            description: String::new(),
            effects,
        }
    }
}
