//! CSV catalog parsing.
//!
//! Rows are read as header-keyed text and converted field by field. A field
//! that is missing or malformed never rejects its row: numeric fields fall
//! back to 0 and success rates to 0.7. Only an unreadable file or header
//! is reported as an error.

use super::types::{Action, Category, Difficulty, Effects, Event, FailureEffects, Scenario};
use crate::core::constants::DEFAULT_BASE_SUCCESS_RATE;
use crate::error::CatalogError;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::warn;

/// One catalog row keyed by column name.
#[derive(Debug, Clone, Default)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn raw(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn text(&self, name: &str) -> String {
        self.raw(name).unwrap_or_default().to_string()
    }

    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.raw(name).map(str::to_string)
    }

    /// Signed integer field, 0 when missing or malformed.
    pub fn int(&self, name: &str) -> i32 {
        self.optional_int(name).unwrap_or(0)
    }

    /// `None` when the column is absent or blank, otherwise the parsed value
    /// (malformed text counts as 0).
    pub fn optional_int(&self, name: &str) -> Option<i32> {
        self.raw(name).map(|v| v.parse().unwrap_or(0))
    }

    /// Non-negative integer field, 0 when missing, malformed or negative.
    pub fn count(&self, name: &str) -> u32 {
        self.raw(name)
            .and_then(|v| v.parse::<i64>().ok())
            .map(|v| v.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0)
    }

    /// Probability field, 0.7 when missing, malformed or not finite.
    pub fn rate(&self, name: &str) -> f64 {
        self.raw(name)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_BASE_SUCCESS_RATE)
    }
}

/// Read every row of a CSV file.
pub fn read_rows(path: &Path) -> Result<Vec<Row>, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows_from(file).map_err(|source| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Read every row from CSV text. Rows that cannot be decoded are skipped.
pub fn read_rows_from(reader: impl io::Read) -> Result<Vec<Row>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        match record {
            Ok(record) => rows.push(Row::from_pairs(
                headers.iter().cloned().zip(record.iter().map(str::to_string)),
            )),
            Err(err) => warn!(row = line + 1, %err, "skipping unreadable catalog row"),
        }
    }
    Ok(rows)
}

fn effects(row: &Row) -> Effects {
    Effects {
        cpu_effect: row.int("cpu_effect"),
        memory_effect: row.int("memory_effect"),
        disk_effect: row.int("disk_effect"),
        network_effect: row.int("network_effect"),
        service_effect: row.int("service_effect"),
        alert_effect: row.int("alert_effect"),
        sla_risk_effect: row.int("sla_risk_effect"),
    }
}

/// Convert a row to an action. Rows without an id are dropped.
///
/// Failure overrides come from the optional `failure_cpu_effect`,
/// `failure_memory_effect` and `failure_service_effect` columns; when all
/// are blank the action uses the default failure policy.
pub fn parse_action(row: &Row) -> Option<Action> {
    let id = row.optional_text("id")?;
    let failure = FailureEffects {
        cpu_effect: row.optional_int("failure_cpu_effect"),
        memory_effect: row.optional_int("failure_memory_effect"),
        service_effect: row.optional_int("failure_service_effect"),
    };
    Some(Action {
        name: row.optional_text("name").unwrap_or_else(|| id.clone()),
        id,
        category: Category::parse(&row.text("category")),
        description: row.text("description"),
        effects: effects(row),
        base_success_rate: row.rate("base_success_rate"),
        cooldown: row.count("cooldown"),
        failure_effects: (!failure.is_empty()).then_some(failure),
        skill_tag: row.optional_text("skill_tag"),
    })
}

/// Scenario rows are the ones whose id starts with `S`.
pub fn is_scenario_row(row: &Row) -> bool {
    row.text("id").starts_with('S')
}

pub fn parse_scenario(row: &Row) -> Option<Scenario> {
    let id = row.optional_text("id")?;
    Some(Scenario {
        name: row.optional_text("name").unwrap_or_else(|| id.clone()),
        id,
        category: row.text("category"),
        description: row.text("description"),
        initial_cpu: row.count("initial_cpu"),
        initial_memory: row.count("initial_memory"),
        initial_disk: row.count("initial_disk"),
        initial_network: row.count("initial_network"),
        initial_services: row.count("initial_services"),
        difficulty: Difficulty::parse(&row.text("difficulty")),
    })
}

pub fn parse_event(row: &Row) -> Option<Event> {
    let id = row.optional_text("id")?;
    Some(Event {
        name: row.optional_text("name").unwrap_or_else(|| id.clone()),
        id,
        category: row.text("category"),
        description: row.text("description"),
        effects: effects(row),
    })
}
