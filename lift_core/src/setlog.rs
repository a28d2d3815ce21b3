//! Append-only set log.
//!
//! Logged sets are appended to a JSONL (JSON Lines) file with file locking
//! so several `lift` processes can log at once.

use crate::{LoggedSet, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Destination for newly logged sets
pub trait SetSink {
    fn append(&mut self, entry: &LoggedSet) -> Result<()>;
}

/// JSONL-backed set log with file locking
pub struct JsonlSetLog {
    path: PathBuf,
}

impl JsonlSetLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl SetSink for JsonlSetLog {
    fn append(&mut self, entry: &LoggedSet) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        // Serialize the whole line first so a single write_all hits the file
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');
        let mut writer = std::io::BufWriter::new(&file);
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;

        tracing::debug!("Appended set {} ({}) to log", entry.id, entry.exercise_id);
        Ok(())
    }
}

/// Read every set from a log file
///
/// A missing file is an empty log. Malformed lines are skipped with a warning.
pub fn read_sets(path: &Path) -> Result<Vec<LoggedSet>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;
    let sets = parse_sets(BufReader::new(&file));
    file.unlock()?;

    let sets = sets?;
    tracing::debug!("Read {} sets from {:?}", sets.len(), path);
    Ok(sets)
}

/// Parse JSONL set lines, skipping blank and malformed ones
pub(crate) fn parse_sets<R: BufRead>(reader: R) -> Result<Vec<LoggedSet>> {
    let mut sets = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<LoggedSet>(&line) {
            Ok(entry) => sets.push(entry),
            Err(e) => {
                tracing::warn!("Skipping malformed set at line {}: {}", line_num + 1, e);
            }
        }
    }

    Ok(sets)
}
