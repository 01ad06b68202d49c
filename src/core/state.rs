//! Simulated infrastructure state and its transition rules.
//!
//! All mutation goes through [`SystemState::apply_effects`] and friends, which
//! clamp every field to its documented range.

use super::constants::*;
use crate::catalog::{Action, Event, Effects};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven bounded health metrics of the simulated infrastructure.
///
/// `cpu`, `memory`, `disk`, `network` and `sla_risk` are percentages in
/// `[0, 100]`, `alerts` is a count in `[0, 10]` and `services` is a count
/// floored at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemState {
    pub cpu: u32,
    pub memory: u32,
    pub disk: u32,
    pub network: u32,
    pub services: u32,
    pub alerts: u32,
    pub sla_risk: u32,
}

impl Default for SystemState {
    fn default() -> Self {
        Self {
            cpu: DEFAULT_CPU,
            memory: DEFAULT_MEMORY,
            disk: DEFAULT_DISK,
            network: DEFAULT_NETWORK,
            services: DEFAULT_SERVICES,
            alerts: 0,
            sla_risk: 0,
        }
    }
}

/// Which terminal condition a critical state tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalReason {
    CpuSaturated,
    MemoryExhausted,
    DiskFull,
    ServicesDown,
    SlaBreached,
}

impl fmt::Display for CriticalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CriticalReason::CpuSaturated => "CPU saturated",
            CriticalReason::MemoryExhausted => "memory exhausted",
            CriticalReason::DiskFull => "disk full",
            CriticalReason::ServicesDown => "almost every service is down",
            CriticalReason::SlaBreached => "SLA breach is certain",
        };
        f.write_str(text)
    }
}

/// Per-field change actually applied by a mutation, after clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateDelta {
    #[serde(skip_serializing_if = "is_zero")]
    pub cpu: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub memory: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub disk: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub network: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub services: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub alerts: i32,
    #[serde(skip_serializing_if = "is_zero")]
    pub sla_risk: i32,
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}

impl StateDelta {
    pub fn is_empty(&self) -> bool {
        *self == StateDelta::default()
    }

    /// Non-zero changes as `(field, delta)` pairs, in field order.
    pub fn changes(&self) -> impl Iterator<Item = (&'static str, i32)> {
        [
            ("cpu", self.cpu),
            ("memory", self.memory),
            ("disk", self.disk),
            ("network", self.network),
            ("services", self.services),
            ("alerts", self.alerts),
            ("sla_risk", self.sla_risk),
        ]
        .into_iter()
        .filter(|(_, delta)| *delta != 0)
    }

    fn merge(&mut self, other: StateDelta) {
        self.cpu += other.cpu;
        self.memory += other.memory;
        self.disk += other.disk;
        self.network += other.network;
        self.services += other.services;
        self.alerts += other.alerts;
        self.sla_risk += other.sla_risk;
    }
}

impl fmt::Display for StateDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, delta) in self.changes() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field} {delta:+}")?;
            first = false;
        }
        if first {
            f.write_str("no change")?;
        }
        Ok(())
    }
}

/// Add a signed delta to an unsigned value, clamping to `[0, ceiling]`.
/// Returns the new value and the delta actually applied.
fn shift(value: u32, delta: i32, ceiling: u32) -> (u32, i32) {
    let next = (i64::from(value) + i64::from(delta)).clamp(0, i64::from(ceiling));
    // |next - value| <= |delta|, so the applied delta always fits in i32.
    let applied = i32::try_from(next - i64::from(value)).unwrap_or(delta);
    (next as u32, applied)
}

impl SystemState {
    /// Build a state from raw values, clamping each into range.
    pub fn new(
        cpu: u32,
        memory: u32,
        disk: u32,
        network: u32,
        services: u32,
        alerts: u32,
        sla_risk: u32,
    ) -> Self {
        Self {
            cpu: cpu.min(PERCENT_MAX),
            memory: memory.min(PERCENT_MAX),
            disk: disk.min(PERCENT_MAX),
            network: network.min(PERCENT_MAX),
            services,
            alerts: alerts.min(ALERTS_MAX),
            sla_risk: sla_risk.min(PERCENT_MAX),
        }
    }

    /// Independent copy of the current values.
    pub fn snapshot(&self) -> SystemState {
        *self
    }

    /// Whether every field is inside its documented range.
    pub fn within_bounds(&self) -> bool {
        self.cpu <= PERCENT_MAX
            && self.memory <= PERCENT_MAX
            && self.disk <= PERCENT_MAX
            && self.network <= PERCENT_MAX
            && self.alerts <= ALERTS_MAX
            && self.sla_risk <= PERCENT_MAX
    }

    /// Terminal condition: any single threshold breach is enough.
    pub fn is_critical(&self) -> bool {
        !self.critical_reasons().is_empty()
    }

    /// Every terminal condition currently holding.
    pub fn critical_reasons(&self) -> Vec<CriticalReason> {
        let mut reasons = Vec::new();
        if self.cpu >= CRITICAL_CPU {
            reasons.push(CriticalReason::CpuSaturated);
        }
        if self.memory >= CRITICAL_MEMORY {
            reasons.push(CriticalReason::MemoryExhausted);
        }
        if self.disk >= CRITICAL_DISK {
            reasons.push(CriticalReason::DiskFull);
        }
        if self.services <= CRITICAL_SERVICES {
            reasons.push(CriticalReason::ServicesDown);
        }
        if self.sla_risk >= CRITICAL_SLA_RISK {
            reasons.push(CriticalReason::SlaBreached);
        }
        reasons
    }

    /// Deterministic per-turn decay: SLA risk creeps up and overloaded
    /// resources get worse on their own.
    pub fn natural_progression(&mut self) -> StateDelta {
        let mut delta = StateDelta::default();

        (self.sla_risk, delta.sla_risk) = shift(self.sla_risk, PROGRESSION_SLA_RISK, PERCENT_MAX);

        if self.cpu > PROGRESSION_CPU_THRESHOLD {
            (self.cpu, delta.cpu) = shift(self.cpu, PROGRESSION_CPU, PERCENT_MAX);
        }
        if self.memory > PROGRESSION_MEMORY_THRESHOLD {
            (self.memory, delta.memory) = shift(self.memory, PROGRESSION_MEMORY, PERCENT_MAX);
        }
        if self.disk > PROGRESSION_DISK_THRESHOLD {
            (self.disk, delta.disk) = shift(self.disk, PROGRESSION_DISK, PERCENT_MAX);
        }

        if self.cpu > PROGRESSION_ALERT_THRESHOLD
            || self.memory > PROGRESSION_ALERT_THRESHOLD
            || self.disk > PROGRESSION_ALERT_THRESHOLD
        {
            (self.alerts, delta.alerts) = shift(self.alerts, 1, ALERTS_MAX);
        }

        delta
    }

    /// Apply every delta of `effects`, clamping each field.
    pub fn apply_effects(&mut self, effects: &Effects) -> StateDelta {
        let mut delta = StateDelta::default();
        (self.cpu, delta.cpu) = shift(self.cpu, effects.cpu_effect, PERCENT_MAX);
        (self.memory, delta.memory) = shift(self.memory, effects.memory_effect, PERCENT_MAX);
        (self.disk, delta.disk) = shift(self.disk, effects.disk_effect, PERCENT_MAX);
        (self.network, delta.network) = shift(self.network, effects.network_effect, PERCENT_MAX);
        (self.services, delta.services) = shift(self.services, effects.service_effect, u32::MAX);
        (self.alerts, delta.alerts) = shift(self.alerts, effects.alert_effect, ALERTS_MAX);
        (self.sla_risk, delta.sla_risk) =
            shift(self.sla_risk, effects.sla_risk_effect, PERCENT_MAX);
        delta
    }

    /// Apply an event. Events always land.
    pub fn apply_event(&mut self, event: &Event) -> StateDelta {
        self.apply_effects(&event.effects)
    }

    /// Apply the outcome of an action.
    ///
    /// On success the action's effects apply like an event. On failure SLA
    /// risk always rises by 15; then either the action's `failure_effects`
    /// override (cpu, memory and services only) or the default policy applies:
    /// a failed CPU-relief action adds 10 CPU, and alerts rise by one.
    pub fn apply_action(&mut self, action: &Action, success: bool) -> StateDelta {
        if success {
            return self.apply_effects(&action.effects);
        }

        let mut delta = StateDelta::default();
        (self.sla_risk, delta.sla_risk) = shift(self.sla_risk, FAILURE_SLA_RISK, PERCENT_MAX);

        match &action.failure_effects {
            Some(failure) => {
                let overrides = Effects {
                    cpu_effect: failure.cpu_effect.unwrap_or(0),
                    memory_effect: failure.memory_effect.unwrap_or(0),
                    service_effect: failure.service_effect.unwrap_or(0),
                    ..Default::default()
                };
                delta.merge(self.apply_effects(&overrides));
            }
            None => {
                if action.effects.cpu_effect < 0 {
                    (self.cpu, delta.cpu) = shift(self.cpu, FAILURE_DEFAULT_CPU, PERCENT_MAX);
                }
                (self.alerts, delta.alerts) =
                    shift(self.alerts, FAILURE_DEFAULT_ALERTS, ALERTS_MAX);
            }
        }

        delta
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CPU {}% | MEM {}% | DISK {}% | NET {}% | services {} | alerts {} | SLA risk {}%",
            self.cpu,
            self.memory,
            self.disk,
            self.network,
            self.services,
            self.alerts,
            self.sla_risk
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, FailureEffects};

    fn baseline() -> SystemState {
        SystemState::new(50, 50, 50, 50, 5, 0, 10)
    }

    fn cpu_relief_action() -> Action {
        Action::new("A001", "Restart Server", Category::SystemOperation).with_effects(Effects {
            cpu_effect: -30,
            memory_effect: -25,
            ..Default::default()
        })
    }

    #[test]
    fn test_default_state_values() {
        let state = SystemState::default();
        assert_eq!(state, SystemState::new(50, 50, 50, 50, 5, 0, 0));
        assert!(!state.is_critical());
    }

    #[test]
    fn test_new_clamps_out_of_range_inputs() {
        let state = SystemState::new(150, 101, 999, 100, 7, 40, 120);
        assert_eq!(state.cpu, 100);
        assert_eq!(state.memory, 100);
        assert_eq!(state.disk, 100);
        assert_eq!(state.alerts, 10);
        assert_eq!(state.sla_risk, 100);
        assert_eq!(state.services, 7);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut state = baseline();
        let before = state.snapshot();
        state.apply_effects(&Effects {
            cpu_effect: 20,
            ..Default::default()
        });
        assert_eq!(before.cpu, 50);
        assert_eq!(state.cpu, 70);
    }

    #[test]
    fn test_each_critical_condition_alone() {
        let cases = [
            (SystemState::new(95, 50, 50, 50, 5, 0, 10), CriticalReason::CpuSaturated),
            (SystemState::new(50, 95, 50, 50, 5, 0, 10), CriticalReason::MemoryExhausted),
            (SystemState::new(50, 50, 98, 50, 5, 0, 10), CriticalReason::DiskFull),
            (SystemState::new(50, 50, 50, 50, 1, 0, 10), CriticalReason::ServicesDown),
            (SystemState::new(50, 50, 50, 50, 5, 0, 90), CriticalReason::SlaBreached),
        ];
        for (state, reason) in cases {
            assert!(state.is_critical(), "{state} should be critical");
            assert_eq!(state.critical_reasons(), vec![reason]);
        }
    }

    #[test]
    fn test_just_below_thresholds_is_not_critical() {
        let state = SystemState::new(94, 94, 97, 100, 2, 10, 89);
        assert!(!state.is_critical());
    }

    #[test]
    fn test_combined_critical_conditions() {
        let state = SystemState::new(99, 96, 99, 50, 0, 10, 95);
        assert_eq!(state.critical_reasons().len(), 5);
        assert!(state.is_critical());
    }

    #[test]
    fn test_natural_progression_calm_system() {
        let mut state = baseline();
        let delta = state.natural_progression();
        assert_eq!(state.sla_risk, 15);
        assert_eq!(state.cpu, 50);
        assert_eq!(state.alerts, 0);
        assert_eq!(delta.sla_risk, 5);
        assert_eq!(delta.changes().count(), 1);
    }

    #[test]
    fn test_natural_progression_overloaded_system() {
        let mut state = SystemState::new(85, 82, 92, 50, 5, 3, 10);
        state.natural_progression();
        assert_eq!(state.cpu, 88);
        assert_eq!(state.memory, 84);
        assert_eq!(state.disk, 93);
        assert_eq!(state.alerts, 4);
        assert_eq!(state.sla_risk, 15);
    }

    #[test]
    fn test_natural_progression_disk_between_80_and_90_raises_alerts_only() {
        let mut state = SystemState::new(50, 50, 85, 50, 5, 0, 10);
        state.natural_progression();
        assert_eq!(state.disk, 85);
        assert_eq!(state.alerts, 1);
    }

    #[test]
    fn test_natural_progression_clamps() {
        let mut state = SystemState::new(99, 100, 100, 50, 5, 10, 98);
        state.natural_progression();
        assert_eq!(state.cpu, 100);
        assert_eq!(state.memory, 100);
        assert_eq!(state.disk, 100);
        assert_eq!(state.alerts, 10);
        assert_eq!(state.sla_risk, 100);
    }

    #[test]
    fn test_apply_event_reports_applied_deltas() {
        let mut state = baseline();
        let event = Event::new(
            "E001",
            "Memory leak",
            Effects {
                cpu_effect: 5,
                memory_effect: 20,
                alert_effect: 2,
                sla_risk_effect: 10,
                ..Default::default()
            },
        );
        let delta = state.apply_event(&event);
        assert_eq!(state.cpu, 55);
        assert_eq!(state.memory, 70);
        assert_eq!(state.alerts, 2);
        assert_eq!(state.sla_risk, 20);
        assert_eq!(delta.memory, 20);
        assert_eq!(delta.disk, 0);
    }

    #[test]
    fn test_apply_event_clamps_and_reports_clamped_delta() {
        let mut state = SystemState::new(90, 5, 50, 50, 2, 9, 10);
        let delta = state.apply_effects(&Effects {
            cpu_effect: 30,
            memory_effect: -20,
            service_effect: -5,
            alert_effect: 4,
            ..Default::default()
        });
        assert_eq!(state.cpu, 100);
        assert_eq!(state.memory, 0);
        assert_eq!(state.services, 0);
        assert_eq!(state.alerts, 10);
        assert_eq!(delta.cpu, 10);
        assert_eq!(delta.memory, -5);
        assert_eq!(delta.services, -2);
        assert_eq!(delta.alerts, 1);
    }

    #[test]
    fn test_huge_service_counts_do_not_overflow() {
        let mut state = SystemState::new(50, 50, 50, 50, i32::MAX as u32, 0, 10);
        let delta = state.apply_effects(&Effects {
            service_effect: 1,
            ..Default::default()
        });
        assert_eq!(state.services, i32::MAX as u32 + 1);
        assert_eq!(delta.services, 1);

        let mut state = SystemState::new(50, 50, 50, 50, u32::MAX, 0, 10);
        let delta = state.apply_effects(&Effects {
            service_effect: 3,
            ..Default::default()
        });
        assert_eq!(state.services, u32::MAX);
        assert_eq!(delta.services, 0);

        let delta = state.apply_effects(&Effects {
            service_effect: i32::MIN,
            ..Default::default()
        });
        assert_eq!(state.services, u32::MAX - 2_147_483_648);
        assert_eq!(delta.services, i32::MIN);
    }

    #[test]
    fn test_apply_action_success_uses_effects() {
        let mut state = SystemState::new(85, 70, 50, 50, 5, 0, 10);
        let delta = state.apply_action(&cpu_relief_action(), true);
        assert_eq!(state.cpu, 55);
        assert_eq!(state.memory, 45);
        assert_eq!(state.sla_risk, 10);
        assert_eq!(delta.cpu, -30);
    }

    #[test]
    fn test_apply_action_failure_default_policy() {
        let mut state = SystemState::new(85, 70, 50, 50, 5, 0, 10);
        let delta = state.apply_action(&cpu_relief_action(), false);
        assert_eq!(state.cpu, 95);
        assert_eq!(state.alerts, 1);
        assert_eq!(state.sla_risk, 25);
        assert_eq!(state.memory, 70);
        assert_eq!(delta.cpu, 10);
        assert_eq!(delta.alerts, 1);
        assert_eq!(delta.sla_risk, 15);
    }

    #[test]
    fn test_apply_action_failure_default_policy_without_cpu_relief() {
        let action = Action::new("A002", "Rotate Logs", Category::Maintenance)
            .with_effects(Effects {
                disk_effect: -35,
                ..Default::default()
            });
        let mut state = baseline();
        state.apply_action(&action, false);
        assert_eq!(state.cpu, 50);
        assert_eq!(state.disk, 50);
        assert_eq!(state.alerts, 1);
        assert_eq!(state.sla_risk, 25);
    }

    #[test]
    fn test_apply_action_failure_override() {
        let action = cpu_relief_action().with_failure_effects(FailureEffects {
            cpu_effect: Some(20),
            memory_effect: None,
            service_effect: Some(-2),
        });
        let mut state = baseline();
        let delta = state.apply_action(&action, false);
        assert_eq!(state.cpu, 70);
        assert_eq!(state.services, 3);
        assert_eq!(state.alerts, 0, "override replaces the default alert bump");
        assert_eq!(state.sla_risk, 25);
        assert_eq!(delta.services, -2);
    }

    #[test]
    fn test_apply_action_failure_clamps_sla_risk() {
        let mut state = SystemState::new(50, 50, 50, 50, 5, 10, 95);
        let delta = state.apply_action(&cpu_relief_action(), false);
        assert_eq!(state.sla_risk, 100);
        assert_eq!(state.alerts, 10);
        assert_eq!(delta.sla_risk, 5);
        assert_eq!(delta.alerts, 0);
    }

    #[test]
    fn test_delta_display_lists_changes() {
        let delta = StateDelta {
            cpu: -30,
            sla_risk: 15,
            ..Default::default()
        };
        assert_eq!(delta.to_string(), "cpu -30, sla_risk +15");
        assert_eq!(StateDelta::default().to_string(), "no change");
    }

    #[test]
    fn test_delta_json_omits_zero_fields() {
        let delta = StateDelta {
            memory: 4,
            ..Default::default()
        };
        let json = serde_json::to_string(&delta).unwrap();
        assert_eq!(json, r#"{"memory":4}"#);
    }
}
