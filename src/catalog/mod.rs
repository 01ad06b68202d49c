//! Tabular catalogs of actions, scenarios and events.
//!
//! Catalogs load from CSV and degrade to built-in records instead of failing,
//! so a session always has at least one playable scenario, event and action.

pub mod actions;
pub mod defaults;
pub mod events;
pub mod loader;
pub mod types;

pub use actions::ActionCatalog;
pub use events::ScenarioCatalog;
pub use types::{Action, Category, Difficulty, Effects, Event, FailureEffects, Scenario};
