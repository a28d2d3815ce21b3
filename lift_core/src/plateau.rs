//! Plateau detection over a chronological set history.
//!
//! A plateau is a run of sessions on one exercise where the estimated 1RM
//! never beats the best seen so far. Only a strictly higher e1RM counts as
//! improvement; matching the previous best does not reset the run.

use crate::history::history_for_exercise;
use crate::{LoggedSet, PlateauStatus, SetRecord};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Sessions (the best one plus those after it) spanning a plateau
pub const DEFAULT_PLATEAU_THRESHOLD: usize = 3;

/// Detect whether a single exercise's history has stalled
///
/// `records` must be ordered oldest first. The returned
/// `sessions_without_improvement` counts trailing records that did not
/// strictly exceed the running e1RM maximum. The history is plateaued when it
/// holds at least `threshold` records and the current best, together with the
/// non-improving sessions after it, spans `threshold` sessions. Histories
/// shorter than `threshold` are never plateaued, and a threshold below 2 is
/// treated as 2 so a strictly improving history never reports a plateau.
pub fn detect_plateau(records: &[SetRecord], threshold: usize) -> PlateauStatus {
    let mut running_max: Option<f64> = None;
    let mut streak: u32 = 0;

    for record in records {
        let e1rm = record.e1rm();
        match running_max {
            Some(best) if e1rm > best => {
                running_max = Some(e1rm);
                streak = 0;
            }
            Some(_) => streak += 1,
            None => running_max = Some(e1rm),
        }
    }

    let required = threshold.max(2);
    let is_plateaued = records.len() >= threshold && streak as usize + 1 >= required;

    tracing::trace!(
        records = records.len(),
        streak,
        threshold,
        is_plateaued,
        "plateau scan complete"
    );

    PlateauStatus {
        is_plateaued,
        sessions_without_improvement: streak,
    }
}

/// Reduce a single exercise's sets to one record per calendar day
///
/// The set with the highest e1RM represents the session. Output is oldest first.
pub fn best_set_per_session(sets: &[SetRecord]) -> Vec<SetRecord> {
    let mut by_day: BTreeMap<NaiveDate, &SetRecord> = BTreeMap::new();

    for set in sets {
        let day = set.timestamp.date_naive();
        by_day
            .entry(day)
            .and_modify(|best| {
                if set.e1rm() > best.e1rm() {
                    *best = set;
                }
            })
            .or_insert(set);
    }

    by_day.into_values().cloned().collect()
}

/// Run the plateau detector for every exercise in a set log
///
/// Sets are grouped by exercise, sorted by timestamp, and collapsed to one
/// session per day before scanning.
pub fn detect_plateaus_by_exercise(
    log: &[LoggedSet],
    threshold: usize,
) -> BTreeMap<String, PlateauStatus> {
    let exercise_ids: BTreeSet<&str> = log.iter().map(|e| e.exercise_id.as_str()).collect();

    exercise_ids
        .into_iter()
        .map(|exercise_id| {
            let mut sets = history_for_exercise(log, exercise_id);
            sets.sort_by_key(|s| s.timestamp);
            let sessions = best_set_per_session(&sets);
            let status = detect_plateau(&sessions, threshold);
            tracing::debug!(
                "{}: {} sessions, {} without improvement",
                exercise_id,
                sessions.len(),
                status.sessions_without_improvement
            );
            (exercise_id.to_string(), status)
        })
        .collect()
}
