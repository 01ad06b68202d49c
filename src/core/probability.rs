//! Outcome resolution math.
//!
//! These pure functions compute context-dependent success rates, roll
//! outcomes against an injected [`RandomSource`], and score candidate actions
//! for advisory ranking. Nothing here mutates game state.

use super::constants::*;
use super::random::RandomSource;
use super::state::SystemState;
use crate::catalog::{Action, Category};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A multiplicative adjustment to an action's base success rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// System operations are harder on a saturated CPU.
    HighCpu,
    /// System operations are easier on an idle CPU.
    LowCpu,
    /// Application fixes suffer under memory pressure.
    MemoryPressure,
    /// Disk work on a nearly full disk.
    DiskFull,
    /// Many services down makes recovery harder.
    ServicesDown,
    /// Too many alerts cause judgement errors.
    AlertFatigue,
}

impl Modifier {
    pub fn factor(self) -> f64 {
        match self {
            Modifier::HighCpu => MODIFIER_HIGH_CPU,
            Modifier::LowCpu => MODIFIER_LOW_CPU,
            Modifier::MemoryPressure => MODIFIER_MEMORY_PRESSURE,
            Modifier::DiskFull => MODIFIER_DISK_FULL,
            Modifier::ServicesDown => MODIFIER_SERVICES_DOWN,
            Modifier::AlertFatigue => MODIFIER_ALERT_FATIGUE,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Modifier::HighCpu => "high CPU load",
            Modifier::LowCpu => "low CPU load",
            Modifier::MemoryPressure => "memory pressure",
            Modifier::DiskFull => "disk nearly full",
            Modifier::ServicesDown => "services down",
            Modifier::AlertFatigue => "alert fatigue",
        };
        write!(f, "{text} x{:.2}", self.factor())
    }
}

/// Modifiers that apply to `action` in `state`, in evaluation order.
///
/// Guards are independent; several may apply and they compound.
pub fn success_modifiers(action: &Action, state: &SystemState) -> Vec<Modifier> {
    let mut modifiers = Vec::new();

    if action.category == Category::SystemOperation {
        if state.cpu > HIGH_CPU_THRESHOLD {
            modifiers.push(Modifier::HighCpu);
        } else if state.cpu < LOW_CPU_THRESHOLD {
            modifiers.push(Modifier::LowCpu);
        }
    }

    if action.category == Category::ApplicationFailure && state.memory > MEMORY_PRESSURE_THRESHOLD {
        modifiers.push(Modifier::MemoryPressure);
    }

    if action.targets_disk() && state.disk > DISK_FULL_THRESHOLD {
        modifiers.push(Modifier::DiskFull);
    }

    if state.services < SERVICES_DOWN_THRESHOLD {
        modifiers.push(Modifier::ServicesDown);
    }

    if state.alerts > ALERT_FATIGUE_THRESHOLD {
        modifiers.push(Modifier::AlertFatigue);
    }

    modifiers
}

/// Probability that `action` succeeds in `state`, always within `[0.10, 0.99]`.
pub fn success_rate(action: &Action, state: &SystemState) -> f64 {
    let base = if action.base_success_rate.is_finite() {
        action.base_success_rate
    } else {
        DEFAULT_BASE_SUCCESS_RATE
    };

    let rate = success_modifiers(action, state)
        .into_iter()
        .fold(base, |rate, modifier| rate * modifier.factor());

    rate.clamp(SUCCESS_RATE_MIN, SUCCESS_RATE_MAX)
}

/// Bernoulli roll: one uniform draw, success iff it falls below `rate`.
pub fn roll_success(rate: f64, rng: &mut impl RandomSource) -> bool {
    rng.next_f64() < rate
}

/// Advisory expected value of taking `action` in `state`.
///
/// Weighs the improvement a success would bring against a failure penalty.
/// Higher is better. Never used to resolve outcomes.
pub fn risk_expectation(action: &Action, state: &SystemState) -> f64 {
    let rate = success_rate(action, state);
    let effects = &action.effects;

    let capped = |effect: i32| f64::from(effect.abs().min(RISK_EFFECT_CAP));

    let mut success_value = 0.0;
    if effects.cpu_effect < 0 {
        success_value += capped(effects.cpu_effect) * RISK_CPU_WEIGHT;
    }
    if effects.memory_effect < 0 {
        success_value += capped(effects.memory_effect) * RISK_MEMORY_WEIGHT;
    }
    if effects.disk_effect < 0 {
        success_value += capped(effects.disk_effect) * RISK_DISK_WEIGHT;
    }
    if effects.service_effect > 0 {
        success_value += f64::from(effects.service_effect) * RISK_SERVICE_WEIGHT;
    }
    if effects.alert_effect < 0 {
        success_value += f64::from(effects.alert_effect.abs()) * RISK_ALERT_WEIGHT;
    }
    if effects.sla_risk_effect < 0 {
        success_value += f64::from(effects.sla_risk_effect.abs()) * RISK_SLA_WEIGHT;
    }

    let mut failure_penalty = RISK_BASE_PENALTY;
    if let Some(failure) = &action.failure_effects {
        if let Some(cpu) = failure.cpu_effect.filter(|&cpu| cpu > 0) {
            failure_penalty += (f64::from(cpu) * 2.0).min(RISK_FAILURE_CPU_CAP);
        }
        if let Some(services) = failure.service_effect.filter(|&s| s < 0) {
            failure_penalty += f64::from(services.abs()) * RISK_SERVICE_WEIGHT;
        }
    }

    rate * success_value - (1.0 - rate) * failure_penalty
}
