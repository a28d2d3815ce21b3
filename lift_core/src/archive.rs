//! CSV archive for the set log.
//!
//! Rolling up appends every logged set to a CSV file and only then empties
//! the log, all under the log's exclusive lock. Writers blocked on that lock
//! append to the emptied file afterwards. A crash between the CSV sync and
//! the truncate leaves the sets in both places; history dedups them by id.

use crate::{LoggedSet, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;

/// A row in the CSV archive
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    pub id: String,
    pub exercise_id: String,
    pub timestamp: String,
    pub load: f64,
    pub completed_reps: u32,
    pub reps_in_reserve: u32,
    pub perceived_effort: Option<u8>,
    pub perceived_pump: Option<u8>,
    pub perceived_soreness: Option<u8>,
}

impl From<&LoggedSet> for CsvRow {
    fn from(entry: &LoggedSet) -> Self {
        CsvRow {
            id: entry.id.to_string(),
            exercise_id: entry.exercise_id.clone(),
            timestamp: entry.set.timestamp.to_rfc3339(),
            load: entry.set.load,
            completed_reps: entry.set.completed_reps,
            reps_in_reserve: entry.set.reps_in_reserve,
            perceived_effort: entry.set.perceived_effort,
            perceived_pump: entry.set.perceived_pump,
            perceived_soreness: entry.set.perceived_soreness,
        }
    }
}

/// Roll up the set log into the CSV archive and empty the log
///
/// With the log locked exclusively:
/// 1. Reads all sets from the log
/// 2. Appends them to the CSV (writing headers only into an empty file)
/// 3. Syncs the CSV to disk
/// 4. Copies the raw log to `<name>.log.processed` and truncates the log
///
/// Returns the number of sets archived. The processed copy is kept for manual
/// recovery until [`cleanup_processed_logs`] removes it.
pub fn log_to_csv_and_archive(log_path: &Path, csv_path: &Path) -> Result<usize> {
    if !log_path.exists() {
        tracing::info!("No set log at {:?}", log_path);
        return Ok(0);
    }

    let mut log = OpenOptions::new().read(true).write(true).open(log_path)?;
    log.lock_exclusive()?;
    let result = archive_locked(&mut log, log_path, csv_path);
    log.unlock()?;
    result
}

fn archive_locked(log: &mut File, log_path: &Path, csv_path: &Path) -> Result<usize> {
    let mut raw = Vec::new();
    log.read_to_end(&mut raw)?;
    let sets = crate::setlog::parse_sets(raw.as_slice())?;

    if sets.is_empty() {
        tracing::info!("No sets in log to roll up");
        return Ok(0);
    }

    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for entry in &sets {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Wrote {} sets to CSV", sets.len());

    let processed_path = log_path.with_extension("log.processed");
    std::fs::write(&processed_path, &raw)?;

    log.set_len(0)?;
    log.sync_all()?;

    tracing::info!("Archived set log to {:?}", processed_path);

    Ok(sets.len())
}

/// Remove retired `.processed` logs from a directory
pub fn cleanup_processed_logs(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();

        if path.extension().is_some_and(|ext| ext == "processed") {
            std::fs::remove_file(&path)?;
            tracing::debug!("Removed processed log: {:?}", path);
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed logs", count);
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setlog::{JsonlSetLog, SetSink};
    use crate::SetRecord;
    use chrono::Utc;

    fn create_test_set(exercise_id: &str) -> LoggedSet {
        LoggedSet::new(exercise_id, SetRecord::new(60.0, 10, 1, Utc::now()))
    }

    #[test]
    fn test_rollup_creates_csv_and_archives_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sets.log");
        let csv_path = temp_dir.path().join("sets.csv");

        let mut log = JsonlSetLog::new(&log_path);
        for id in ["back_squat", "deadlift", "pull_up"] {
            log.append(&create_test_set(id)).unwrap();
        }

        let count = log_to_csv_and_archive(&log_path, &csv_path).unwrap();
        assert_eq!(count, 3);

        assert!(csv_path.exists());
        assert_eq!(std::fs::metadata(&log_path).unwrap().len(), 0);
        assert!(log_path.with_extension("log.processed").exists());
    }

    #[test]
    fn test_missing_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sets.log");
        let csv_path = temp_dir.path().join("sets.csv");

        assert_eq!(log_to_csv_and_archive(&log_path, &csv_path).unwrap(), 0);
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_sets_logged_during_rollup_are_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sets.log");
        let csv_path = temp_dir.path().join("sets.csv");
        let total = 500;

        let writer = {
            let log_path = log_path.clone();
            std::thread::spawn(move || {
                let mut log = JsonlSetLog::new(&log_path);
                for _ in 0..total {
                    log.append(&create_test_set("back_squat")).unwrap();
                }
            })
        };

        while !writer.is_finished() {
            log_to_csv_and_archive(&log_path, &csv_path).unwrap();
        }
        writer.join().unwrap();
        log_to_csv_and_archive(&log_path, &csv_path).unwrap();

        let history = crate::history::load_set_history(&log_path, &csv_path).unwrap();
        assert_eq!(history.len(), total);
        assert!(crate::setlog::read_sets(&log_path).unwrap().is_empty());
    }

    #[test]
    fn test_rollup_appends_without_repeating_headers() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("sets.log");
        let csv_path = temp_dir.path().join("sets.csv");

        JsonlSetLog::new(&log_path)
            .append(&create_test_set("back_squat"))
            .unwrap();
        assert_eq!(log_to_csv_and_archive(&log_path, &csv_path).unwrap(), 1);

        JsonlSetLog::new(&log_path)
            .append(&create_test_set("front_squat"))
            .unwrap();
        assert_eq!(log_to_csv_and_archive(&log_path, &csv_path).unwrap(), 1);

        let reader = csv::Reader::from_path(&csv_path).unwrap();
        assert_eq!(reader.into_records().count(), 2);
    }

    #[test]
    fn test_empty_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("empty.log");
        let csv_path = temp_dir.path().join("sets.csv");

        File::create(&log_path).unwrap();

        assert_eq!(log_to_csv_and_archive(&log_path, &csv_path).unwrap(), 0);
        assert!(log_path.exists());
        assert!(!csv_path.exists());
    }

    #[test]
    fn test_cleanup_processed_logs() {
        let temp_dir = tempfile::tempdir().unwrap();

        File::create(temp_dir.path().join("a.log.processed")).unwrap();
        File::create(temp_dir.path().join("b.log.processed")).unwrap();
        File::create(temp_dir.path().join("sets.log")).unwrap();

        assert_eq!(cleanup_processed_logs(temp_dir.path()).unwrap(), 2);
        assert!(temp_dir.path().join("sets.log").exists());
        assert!(!temp_dir.path().join("a.log.processed").exists());
    }
}
