//! Action catalog and cooldown bookkeeping.

use super::defaults::default_actions;
use super::loader::{parse_action, read_rows};
use super::types::Action;
use crate::core::random::{sample_indices, RandomSource};
use crate::error::CatalogError;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Loaded actions plus per-action remaining cooldown turns.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    actions: Vec<Action>,
    cooldowns: HashMap<String, u32>,
}

impl ActionCatalog {
    /// Build from records. An empty list installs the built-in defaults.
    pub fn from_actions(actions: Vec<Action>) -> Self {
        let actions = if actions.is_empty() {
            default_actions()
        } else {
            actions
        };
        Self {
            actions,
            cooldowns: HashMap::new(),
        }
    }

    /// Built-in default actions only.
    pub fn builtin() -> Self {
        Self::from_actions(default_actions())
    }

    /// Load from a CSV file, reporting failures.
    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let actions: Vec<Action> = read_rows(path)?.iter().filter_map(parse_action).collect();
        if actions.is_empty() {
            return Err(CatalogError::Empty(path.to_path_buf()));
        }
        debug!(path = %path.display(), count = actions.len(), "loaded action catalog");
        Ok(Self::from_actions(actions))
    }

    /// Load from a CSV file, falling back to the built-in actions on any failure.
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|err| {
            warn!(%err, "using built-in actions");
            Self::builtin()
        })
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn by_id(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Actions that can be offered now, at most `max_count` of them.
    ///
    /// Every call first ticks all cooldowns down by one turn and evicts the
    /// expired ones, so it must be called at most once per turn. When more
    /// actions are ready than `max_count`, a random subset is returned.
    pub fn available(&mut self, max_count: usize, rng: &mut impl RandomSource) -> Vec<Action> {
        self.cooldowns.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(1);
            *remaining > 0
        });

        let ready: Vec<&Action> = self
            .actions
            .iter()
            .filter(|a| !self.cooldowns.contains_key(&a.id))
            .collect();

        if ready.len() <= max_count {
            return ready.into_iter().cloned().collect();
        }

        sample_indices(rng, ready.len(), max_count)
            .into_iter()
            .map(|i| ready[i].clone())
            .collect()
    }

    /// Put an action on cooldown. Zero turns is a no-op.
    pub fn set_cooldown(&mut self, id: &str, turns: u32) {
        if turns > 0 {
            self.cooldowns.insert(id.to_string(), turns);
        }
    }

    /// Remaining cooldown for `id`, if it is cooling down.
    pub fn cooldown_remaining(&self, id: &str) -> Option<u32> {
        self.cooldowns.get(id).copied()
    }

    pub fn clear_cooldowns(&mut self) {
        self.cooldowns.clear();
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::core::random::{RngSource, ScriptedSource};
    use std::collections::HashSet;

    fn catalog(count: usize) -> ActionCatalog {
        ActionCatalog::from_actions(
            (1..=count)
                .map(|i| {
                    Action::new(format!("A{i:03}"), format!("Action {i}"), Category::Maintenance)
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_catalog_uses_defaults() {
        let catalog = ActionCatalog::from_actions(Vec::new());
        assert_eq!(catalog.actions().len(), 2);
        assert!(catalog.by_id("A001").is_some());
    }

    #[test]
    fn test_by_id_lookup() {
        let catalog = catalog(3);
        assert_eq!(catalog.by_id("A002").map(|a| a.name.as_str()), Some("Action 2"));
        assert!(catalog.by_id("Z999").is_none());
    }

    #[test]
    fn test_available_returns_all_when_under_limit() {
        let mut catalog = catalog(3);
        let mut rng = ScriptedSource::constant(0.0);
        let ids: Vec<String> = catalog.available(5, &mut rng).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["A001", "A002", "A003"]);
        assert_eq!(rng.draws(), 0, "no sampling needed");
    }

    #[test]
    fn test_available_downsamples_without_replacement() {
        let mut catalog = catalog(8);
        let mut rng = RngSource::seeded(3);
        for _ in 0..20 {
            let offered = catalog.available(5, &mut rng);
            assert_eq!(offered.len(), 5);
            let unique: HashSet<_> = offered.iter().map(|a| a.id.clone()).collect();
            assert_eq!(unique.len(), 5);
        }
    }

    #[test]
    fn test_cooldown_excludes_action() {
        let mut catalog = catalog(3);
        let mut rng = ScriptedSource::constant(0.0);
        catalog.set_cooldown("A002", 3);

        // 3 -> 2: still cooling
        let ids: Vec<String> = catalog.available(5, &mut rng).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["A001", "A003"]);
        assert_eq!(catalog.cooldown_remaining("A002"), Some(2));

        // 2 -> 1: still cooling
        assert_eq!(catalog.available(5, &mut rng).len(), 2);
        assert_eq!(catalog.cooldown_remaining("A002"), Some(1));

        // 1 -> 0: evicted and offered again
        assert_eq!(catalog.available(5, &mut rng).len(), 3);
        assert_eq!(catalog.cooldown_remaining("A002"), None);
    }

    #[test]
    fn test_every_available_call_advances_cooldowns() {
        // Listing actions is what advances cooldown time, so two calls in
        // the same turn tick the counter twice.
        let mut catalog = catalog(2);
        let mut rng = ScriptedSource::constant(0.0);
        catalog.set_cooldown("A001", 2);
        catalog.available(5, &mut rng);
        catalog.available(5, &mut rng);
        assert_eq!(catalog.cooldown_remaining("A001"), None);
    }

    #[test]
    fn test_zero_cooldown_is_noop() {
        let mut catalog = catalog(2);
        catalog.set_cooldown("A001", 0);
        assert_eq!(catalog.cooldown_remaining("A001"), None);
    }

    #[test]
    fn test_clear_cooldowns() {
        let mut catalog = catalog(2);
        catalog.set_cooldown("A001", 4);
        catalog.clear_cooldowns();
        assert_eq!(catalog.cooldown_remaining("A001"), None);
    }
}
