//! Scenario and event catalog.

use super::defaults::{default_event, default_scenario, fallback_scenarios};
use super::loader::{is_scenario_row, parse_event, parse_scenario, read_rows};
use super::types::{Event, Scenario};
use crate::core::random::RandomSource;
use crate::error::CatalogError;
use std::path::Path;
use tracing::{debug, warn};

/// Scenarios and events loaded from one shared table.
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
    events: Vec<Event>,
}

impl ScenarioCatalog {
    /// Build from records. Either list may be empty; random draws then fall
    /// back to the built-in default record.
    pub fn from_records(scenarios: Vec<Scenario>, events: Vec<Event>) -> Self {
        Self { scenarios, events }
    }

    /// The seed scenario and event used when no data can be read.
    pub fn builtin() -> Self {
        let (scenarios, events) = fallback_scenarios();
        Self::from_records(scenarios, events)
    }

    /// Load from a CSV file. Rows with an `S`-prefixed id are scenarios,
    /// everything else is an event.
    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let rows = read_rows(path)?;
        let mut scenarios = Vec::new();
        let mut events = Vec::new();
        for row in &rows {
            if is_scenario_row(row) {
                scenarios.extend(parse_scenario(row));
            } else {
                events.extend(parse_event(row));
            }
        }
        if scenarios.is_empty() && events.is_empty() {
            return Err(CatalogError::Empty(path.to_path_buf()));
        }
        debug!(
            path = %path.display(),
            scenarios = scenarios.len(),
            events = events.len(),
            "loaded scenario catalog"
        );
        Ok(Self::from_records(scenarios, events))
    }

    /// Load from a CSV file, falling back to the built-in records on any failure.
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|err| {
            warn!(%err, "using built-in scenarios");
            Self::builtin()
        })
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn scenario_by_id(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Uniformly chosen scenario, or the default scenario when there are none.
    pub fn random_scenario(&self, rng: &mut impl RandomSource) -> Scenario {
        if self.scenarios.is_empty() {
            return default_scenario();
        }
        self.scenarios[rng.pick_index(self.scenarios.len())].clone()
    }

    /// Uniformly chosen event, or the default event when there are none.
    pub fn random_event(&self, rng: &mut impl RandomSource) -> Event {
        if self.events.is_empty() {
            return default_event();
        }
        self.events[rng.pick_index(self.events.len())].clone()
    }
}
