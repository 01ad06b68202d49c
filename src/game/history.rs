//! Session history and the append-only event log.

use crate::core::state::{StateDelta, SystemState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// What happened, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryRecord {
    ScenarioStart {
        scenario_id: String,
        scenario_name: String,
        description: String,
    },
    Event {
        turn: u32,
        event_id: String,
        event_name: String,
        description: String,
        effect: StateDelta,
    },
    Action {
        turn: u32,
        action_id: String,
        action_name: String,
        success: bool,
        success_rate: f64,
        state_changes: StateDelta,
        state_after: SystemState,
    },
    CriticalState {
        turn: u32,
        state: SystemState,
    },
}

impl HistoryRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            HistoryRecord::ScenarioStart { .. } => "scenario_start",
            HistoryRecord::Event { .. } => "event",
            HistoryRecord::Action { .. } => "action",
            HistoryRecord::CriticalState { .. } => "critical_state",
        }
    }
}

/// A timestamped history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: HistoryRecord,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn now(record: HistoryRecord) -> Self {
        Self {
            record,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only JSON-lines sink, one file per session.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    file: File,
}

impl EventLog {
    /// Open (or create) `<dir>/<session_id>.jsonl` for appending.
    pub fn create(dir: &Path, session_id: Uuid) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{session_id}.jsonl"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry. Failures are logged and otherwise ignored so a
    /// broken disk never interrupts a turn.
    pub fn append(&mut self, entry: &HistoryEntry) {
        if let Err(err) = self.write_line(entry) {
            warn!(path = %self.path.display(), %err, "failed to write event log");
        }
    }

    fn write_line(&mut self, entry: &HistoryEntry) -> io::Result<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        writeln!(self.file, "{line}")?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_type_tag() {
        let entry = HistoryEntry::now(HistoryRecord::CriticalState {
            turn: 3,
            state: SystemState::default(),
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "critical_state");
        assert_eq!(value["turn"], 3);
        assert_eq!(value["state"]["cpu"], 50);
        assert!(value.get("timestamp").is_some());
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let entry = HistoryEntry::now(HistoryRecord::ScenarioStart {
            scenario_id: "S001".into(),
            scenario_name: "Overload".into(),
            description: "Busy".into(),
        });
        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
        assert_eq!(back.record.kind(), "scenario_start");
    }

    #[test]
    fn test_event_log_appends_lines() {
        let dir = std::env::temp_dir().join(format!("irs-log-{}", Uuid::new_v4()));
        let session = Uuid::new_v4();
        let mut log = EventLog::create(&dir, session).unwrap();
        for turn in 1..=3 {
            log.append(&HistoryEntry::now(HistoryRecord::CriticalState {
                turn,
                state: SystemState::default(),
            }));
        }
        let text = fs::read_to_string(log.path()).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().all(|l| l.contains("\"critical_state\"")));
        fs::remove_dir_all(&dir).ok();
    }
}
