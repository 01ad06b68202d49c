//! Session configuration.

use crate::core::constants::{DEFAULT_MAX_ACTIONS_OFFERED, DEFAULT_MAX_TURNS};
use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one simulator session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Turns before the session ends on its own
    pub max_turns: u32,

    /// Upper bound on actions offered per turn
    pub max_actions_offered: usize,

    /// CSV file with action rows
    pub actions_file: PathBuf,

    /// CSV file with scenario and event rows
    pub scenarios_file: PathBuf,

    /// Directory for the per-session event log (None = no log file)
    pub log_dir: Option<PathBuf>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            max_actions_offered: DEFAULT_MAX_ACTIONS_OFFERED,
            actions_file: PathBuf::from("data/actions.csv"),
            scenarios_file: PathBuf::from("data/scenarios.csv"),
            log_dir: None,
        }
    }
}

impl SimulatorConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Quick config for short drills.
    pub fn short_drill(max_turns: u32) -> Self {
        Self {
            max_turns,
            ..Default::default()
        }
    }
}

/// Platform data directory for session logs (e.g. `~/.local/share/infra-risk-sim/logs`).
pub fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "infra-risk-sim").map(|dirs| dirs.data_dir().join("logs"))
}
