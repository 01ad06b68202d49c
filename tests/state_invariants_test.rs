//! Integration test: state and probability invariants
//!
//! Long random sequences of events and action outcomes must keep every
//! field in bounds and every success rate inside [0.10, 0.99].

use infra_risk_sim::catalog::{Action, Category, Effects, Event, FailureEffects};
use infra_risk_sim::core::probability::{risk_expectation, success_rate};
use infra_risk_sim::core::state::SystemState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_effects(rng: &mut ChaCha8Rng) -> Effects {
    Effects {
        cpu_effect: rng.gen_range(-150..=150),
        memory_effect: rng.gen_range(-150..=150),
        disk_effect: rng.gen_range(-150..=150),
        network_effect: rng.gen_range(-150..=150),
        service_effect: rng.gen_range(-8..=8),
        alert_effect: rng.gen_range(-20..=20),
        sla_risk_effect: rng.gen_range(-150..=150),
    }
}

fn random_state(rng: &mut ChaCha8Rng) -> SystemState {
    SystemState::new(
        rng.gen_range(0..=100),
        rng.gen_range(0..=100),
        rng.gen_range(0..=100),
        rng.gen_range(0..=100),
        rng.gen_range(0..=10),
        rng.gen_range(0..=10),
        rng.gen_range(0..=100),
    )
}

fn random_action(rng: &mut ChaCha8Rng) -> Action {
    let category = match rng.gen_range(0..4) {
        0 => Category::SystemOperation,
        1 => Category::ApplicationFailure,
        2 => Category::Maintenance,
        _ => Category::Other("Networking".to_string()),
    };
    let name = if rng.gen_bool(0.3) { "Clean Disk" } else { "Restart" };
    let mut action = Action::new("A", name, category)
        .with_effects(random_effects(rng))
        .with_success_rate(rng.gen_range(-1.0..2.0));
    if rng.gen_bool(0.3) {
        action = action.with_failure_effects(FailureEffects {
            cpu_effect: Some(rng.gen_range(-50..=50)),
            memory_effect: None,
            service_effect: Some(rng.gen_range(-3..=3)),
        });
    }
    action
}

#[test]
fn test_state_stays_in_bounds_under_random_sequences() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..200 {
        let mut state = random_state(&mut rng);
        for _ in 0..50 {
            state.natural_progression();
            assert!(state.within_bounds(), "after progression: {state}");

            let event = Event::new("E", "Random", random_effects(&mut rng));
            state.apply_event(&event);
            assert!(state.within_bounds(), "after event: {state}");

            let action = random_action(&mut rng);
            let success = rng.gen_bool(0.5);
            state.apply_action(&action, success);
            assert!(state.within_bounds(), "after action: {state}");
            assert!(state.alerts <= 10);
        }
    }
}

#[test]
fn test_success_rate_always_clamped() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..5_000 {
        let state = random_state(&mut rng);
        let action = random_action(&mut rng);
        let rate = success_rate(&action, &state);
        assert!((0.10..=0.99).contains(&rate), "rate {rate} out of range");
        assert!(risk_expectation(&action, &state).is_finite());
    }
}

#[test]
fn test_non_finite_base_rate_uses_default() {
    let state = SystemState::default();
    let action = Action::new("A", "Check", Category::Maintenance).with_success_rate(f64::NAN);
    assert_eq!(success_rate(&action, &state), 0.7);
}

#[test]
fn test_each_critical_condition_alone() {
    let calm = SystemState::new(50, 50, 50, 50, 5, 0, 10);
    assert!(!calm.is_critical());
    assert!(SystemState { cpu: 95, ..calm }.is_critical());
    assert!(SystemState { memory: 95, ..calm }.is_critical());
    assert!(SystemState { disk: 98, ..calm }.is_critical());
    assert!(SystemState { services: 1, ..calm }.is_critical());
    assert!(SystemState { sla_risk: 90, ..calm }.is_critical());
    let edge = SystemState {
        cpu: 94,
        memory: 94,
        disk: 97,
        services: 2,
        sla_risk: 89,
        ..calm
    };
    assert!(!edge.is_critical());

    let all = SystemState::new(100, 100, 100, 50, 0, 10, 100);
    assert_eq!(all.critical_reasons().len(), 5);
}
