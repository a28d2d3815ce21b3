//! Core domain types for the lift coaching calculators.
//!
//! This module defines the values flowing through the system:
//! - Logged sets and their perceived-effort ratings
//! - Exercises and their muscle/equipment metadata
//! - Plate preferences and derived loadouts
//! - Derived outputs (warmups, plateau status, substitutes)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

// ============================================================================
// Set Records
// ============================================================================

/// A single performed set
///
/// Immutable once created. `reps_in_reserve` is the lifter's own estimate of
/// how many more reps were left (0 = taken to failure).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetRecord {
    /// Load in kilograms
    pub load: f64,
    pub completed_reps: u32,
    pub reps_in_reserve: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceived_effort: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceived_pump: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceived_soreness: Option<u8>,
    pub timestamp: DateTime<Utc>,
}

impl SetRecord {
    /// Create a set with no perceived ratings
    pub fn new(
        load: f64,
        completed_reps: u32,
        reps_in_reserve: u32,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            load,
            completed_reps,
            reps_in_reserve,
            perceived_effort: None,
            perceived_pump: None,
            perceived_soreness: None,
            timestamp,
        }
    }

    /// Estimated one-rep max for this set (Epley over effective reps)
    pub fn e1rm(&self) -> f64 {
        crate::e1rm::estimate_e1rm(self.load, self.completed_reps, self.reps_in_reserve)
    }
}

/// A set as stored in the local set log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoggedSet {
    pub id: Uuid,
    pub exercise_id: String,
    #[serde(flatten)]
    pub set: SetRecord,
}

impl LoggedSet {
    pub fn new(exercise_id: impl Into<String>, set: SetRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            exercise_id: exercise_id.into(),
            set,
        }
    }
}

// ============================================================================
// Exercises
// ============================================================================

/// Difficulty tier, ordered from easiest to hardest
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// Reference data for one exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub prime_muscle: String,
    #[serde(default)]
    pub secondary_muscles: BTreeSet<String>,
    #[serde(default)]
    pub equipment: BTreeSet<String>,
    pub is_compound: bool,
    pub difficulty: Difficulty,
}

// ============================================================================
// Plates
// ============================================================================

/// Bar and plate inventory used for plate math
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlatePreferences {
    pub bar_weight: f64,
    /// Plate denominations, heaviest first. Each is available in unlimited pairs.
    pub available_plates: Vec<f64>,
}

/// Number of plates of one denomination on each side of the bar
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlateCount {
    pub weight: f64,
    pub count: u32,
}

/// Plates to load on each side of the bar
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PlateLoadout {
    /// Non-zero plate counts, heaviest first
    pub plates: Vec<PlateCount>,
    pub per_side_weight: f64,
    /// True when the residual to the requested per-side weight is under 10 g
    pub is_exact: bool,
}

impl PlateLoadout {
    /// Total bar load produced by this loadout
    pub fn total_load(&self, bar_weight: f64) -> f64 {
        bar_weight + 2.0 * self.per_side_weight
    }
}

#[cfg(test)]
impl PlateLoadout {
    /// Number of plates of the given denomination per side
    pub(crate) fn count_of(&self, weight: f64) -> u32 {
        self.plates
            .iter()
            .find(|p| (p.weight - weight).abs() < 1e-9)
            .map_or(0, |p| p.count)
    }
}

// ============================================================================
// Derived Outputs
// ============================================================================

/// One generated warmup set
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WarmupSet {
    pub load: f64,
    pub reps: u32,
    /// Fraction of the working weight this step targeted (0.0 for the empty bar)
    pub percent_of_working: f64,
    pub loadout: PlateLoadout,
}

/// Result of scanning a set history for stalled progress
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct PlateauStatus {
    pub is_plateaued: bool,
    pub sessions_without_improvement: u32,
}

/// A scored substitute candidate
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Substitute {
    pub exercise: Exercise,
    pub score: u32,
}
