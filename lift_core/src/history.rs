//! Set history loading.
//!
//! History is the union of the live set log and the CSV archive, with sets
//! that appear in both counted once.

use crate::archive::CsvRow;
use crate::{Error, LoggedSet, Result, SetRecord};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

impl TryFrom<CsvRow> for LoggedSet {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| Error::Other(format!("Invalid UUID: {}", e)))?;

        let timestamp = DateTime::parse_from_rfc3339(&row.timestamp)
            .map_err(|e| Error::Other(format!("Invalid date: {}", e)))?
            .with_timezone(&Utc);

        Ok(LoggedSet {
            id,
            exercise_id: row.exercise_id,
            set: SetRecord {
                load: row.load,
                completed_reps: row.completed_reps,
                reps_in_reserve: row.reps_in_reserve,
                perceived_effort: row.perceived_effort,
                perceived_pump: row.perceived_pump,
                perceived_soreness: row.perceived_soreness,
                timestamp,
            },
        })
    }
}

/// Load all logged sets from the live log and the CSV archive
///
/// Returns sets sorted oldest first, deduplicated by ID.
pub fn load_set_history(log_path: &Path, csv_path: &Path) -> Result<Vec<LoggedSet>> {
    let mut sets = Vec::new();
    let mut seen_ids = HashSet::new();

    for entry in crate::setlog::read_sets(log_path)? {
        if seen_ids.insert(entry.id) {
            sets.push(entry);
        }
    }
    let from_log = sets.len();

    if csv_path.exists() {
        for entry in load_sets_from_csv(csv_path)? {
            if seen_ids.insert(entry.id) {
                sets.push(entry);
            }
        }
    }

    sets.sort_by_key(|entry| entry.set.timestamp);

    tracing::info!(
        "Loaded {} sets ({} from log, {} from archive)",
        sets.len(),
        from_log,
        sets.len() - from_log
    );

    Ok(sets)
}

/// All sets for one exercise, oldest first
pub fn history_for_exercise(history: &[LoggedSet], exercise_id: &str) -> Vec<SetRecord> {
    history
        .iter()
        .filter(|entry| entry.exercise_id == exercise_id)
        .map(|entry| entry.set.clone())
        .collect()
}

fn load_sets_from_csv(path: &Path) -> Result<Vec<LoggedSet>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut sets = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match LoggedSet::try_from(row) {
                Ok(entry) => sets.push(entry),
                Err(e) => tracing::warn!("Failed to parse CSV row: {}", e),
            },
            Err(e) => tracing::warn!("Failed to deserialize CSV row: {}", e),
        }
    }

    Ok(sets)
}
