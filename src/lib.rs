//! Infrastructure Risk Simulator library
//!
//! Turn-based incident-response training: the simulation engine, its data
//! catalogs, the debrief report and a headless balance runner.

pub mod balance;
pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod logging;
pub mod report;

pub use catalog::{ActionCatalog, ScenarioCatalog};
pub use config::SimulatorConfig;
pub use error::{CatalogError, ConfigError, GameError};
pub use game::Simulator;
pub use report::GameReport;

/// Crate version, shown by the binaries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
