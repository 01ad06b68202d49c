//! Built-in records used whenever catalog data is missing or unusable.

use super::types::{Action, Category, Difficulty, Effects, Event, Scenario};

pub fn default_actions() -> Vec<Action> {
    vec![
        Action {
            id: "A001".to_string(),
            name: "Restart Server".to_string(),
            category: Category::SystemOperation,
            description: "Restart the misbehaving server to return it to a clean state".to_string(),
            effects: Effects {
                cpu_effect: -30,
                memory_effect: -25,
                ..Default::default()
            },
            base_success_rate: 0.8,
            cooldown: 2,
            failure_effects: None,
            skill_tag: Some("Operations/Linux".to_string()),
        },
        Action {
            id: "A002".to_string(),
            name: "Rotate Logs".to_string(),
            category: Category::Maintenance,
            description: "Delete and compress bloated log files".to_string(),
            effects: Effects {
                disk_effect: -35,
                ..Default::default()
            },
            base_success_rate: 0.95,
            cooldown: 1,
            failure_effects: None,
            skill_tag: Some("Operations/Logging".to_string()),
        },
    ]
}

/// Scenario used when the catalog has none.
pub fn default_scenario() -> Scenario {
    Scenario {
        id: "S000".to_string(),
        name: "Default Scenario".to_string(),
        category: "Default".to_string(),
        description: "Default scenario due to loading failure".to_string(),
        initial_cpu: 50,
        initial_memory: 50,
        initial_disk: 50,
        initial_network: 50,
        initial_services: 5,
        difficulty: Difficulty::Normal,
    }
}

/// Event used when the catalog has none.
pub fn default_event() -> Event {
    Event {
        id: "E000".to_string(),
        name: "Default Event".to_string(),
        category: "Default".to_string(),
        description: "Default event due to loading failure".to_string(),
        effects: Effects {
            cpu_effect: 10,
            memory_effect: 10,
            alert_effect: 1,
            sla_risk_effect: 5,
            ..Default::default()
        },
    }
}

/// Seed records installed when the scenario file cannot be loaded at all.
pub fn fallback_scenarios() -> (Vec<Scenario>, Vec<Event>) {
    let scenarios = vec![Scenario {
        id: "S001".to_string(),
        name: "Web Server Overload".to_string(),
        category: "Application Failure".to_string(),
        description: "A large marketing campaign floods the web tier and pins its CPU".to_string(),
        initial_cpu: 85,
        initial_memory: 60,
        initial_disk: 50,
        initial_network: 75,
        initial_services: 5,
        difficulty: Difficulty::Normal,
    }];
    let events = vec![Event {
        id: "E001".to_string(),
        name: "Memory Leak Detected".to_string(),
        category: "Application Failure".to_string(),
        description: "A memory leak was detected in a Java application.".to_string(),
        effects: Effects {
            cpu_effect: 5,
            memory_effect: 20,
            alert_effect: 2,
            sla_risk_effect: 10,
            ..Default::default()
        },
    }];
    (scenarios, events)
}
