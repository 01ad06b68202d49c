// Resource bounds
pub const PERCENT_MAX: u32 = 100;
pub const ALERTS_MAX: u32 = 10;

// Default state before any scenario is loaded
pub const DEFAULT_CPU: u32 = 50;
pub const DEFAULT_MEMORY: u32 = 50;
pub const DEFAULT_DISK: u32 = 50;
pub const DEFAULT_NETWORK: u32 = 50;
pub const DEFAULT_SERVICES: u32 = 5;

// Scenario start resets
pub const SCENARIO_START_ALERTS: u32 = 0;
pub const SCENARIO_START_SLA_RISK: u32 = 10;

// Criticality thresholds
pub const CRITICAL_CPU: u32 = 95;
pub const CRITICAL_MEMORY: u32 = 95;
pub const CRITICAL_DISK: u32 = 98;
pub const CRITICAL_SERVICES: u32 = 1;
pub const CRITICAL_SLA_RISK: u32 = 90;

// Natural progression per turn
pub const PROGRESSION_SLA_RISK: i32 = 5;
pub const PROGRESSION_CPU_THRESHOLD: u32 = 80;
pub const PROGRESSION_CPU: i32 = 3;
pub const PROGRESSION_MEMORY_THRESHOLD: u32 = 80;
pub const PROGRESSION_MEMORY: i32 = 2;
pub const PROGRESSION_DISK_THRESHOLD: u32 = 90;
pub const PROGRESSION_DISK: i32 = 1;
pub const PROGRESSION_ALERT_THRESHOLD: u32 = 80;

// Action failure
pub const FAILURE_SLA_RISK: i32 = 15;
pub const FAILURE_DEFAULT_CPU: i32 = 10;
pub const FAILURE_DEFAULT_ALERTS: i32 = 1;

// Success rate model
pub const DEFAULT_BASE_SUCCESS_RATE: f64 = 0.7;
pub const SUCCESS_RATE_MIN: f64 = 0.10;
pub const SUCCESS_RATE_MAX: f64 = 0.99;
pub const MODIFIER_HIGH_CPU: f64 = 0.7;
pub const MODIFIER_LOW_CPU: f64 = 1.2;
pub const MODIFIER_MEMORY_PRESSURE: f64 = 0.6;
pub const MODIFIER_DISK_FULL: f64 = 0.5;
pub const MODIFIER_SERVICES_DOWN: f64 = 0.8;
pub const MODIFIER_ALERT_FATIGUE: f64 = 0.85;
pub const HIGH_CPU_THRESHOLD: u32 = 80;
pub const LOW_CPU_THRESHOLD: u32 = 40;
pub const MEMORY_PRESSURE_THRESHOLD: u32 = 85;
pub const DISK_FULL_THRESHOLD: u32 = 90;
pub const SERVICES_DOWN_THRESHOLD: u32 = 3;
pub const ALERT_FATIGUE_THRESHOLD: u32 = 7;

// Risk expectation weights
pub const RISK_EFFECT_CAP: i32 = 30;
pub const RISK_CPU_WEIGHT: f64 = 2.0;
pub const RISK_MEMORY_WEIGHT: f64 = 1.5;
pub const RISK_DISK_WEIGHT: f64 = 1.0;
pub const RISK_SERVICE_WEIGHT: f64 = 50.0;
pub const RISK_ALERT_WEIGHT: f64 = 10.0;
pub const RISK_SLA_WEIGHT: f64 = 3.0;
pub const RISK_BASE_PENALTY: f64 = 30.0;
pub const RISK_FAILURE_CPU_CAP: f64 = 50.0;

// Scoring
pub const SCORE_PER_SERVICE: i64 = 100;
pub const SCORE_STABILITY_BONUS: i64 = 50;
pub const SCORE_STABILITY_THRESHOLD: u32 = 60;
pub const SCORE_SPEED_TURNS: i64 = 10;
pub const SCORE_SPEED_PER_TURN: i64 = 30;
pub const SCORE_SLA_PENALTY: i64 = 5;

// Session defaults
pub const DEFAULT_MAX_TURNS: u32 = 10;
pub const DEFAULT_MAX_ACTIONS_OFFERED: usize = 5;
