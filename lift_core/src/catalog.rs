//! Default exercise catalog.
//!
//! This module provides the built-in exercise reference data used by the
//! substitution scorer. Catalog order is significant: the scorer breaks score
//! ties by catalog position.

use crate::{Difficulty, Error, Exercise, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Vec<Exercise>> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static [Exercise] {
    &DEFAULT_CATALOG
}

fn exercise(
    id: &str,
    name: &str,
    prime_muscle: &str,
    secondary_muscles: &[&str],
    equipment: &[&str],
    is_compound: bool,
    difficulty: Difficulty,
) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        prime_muscle: prime_muscle.into(),
        secondary_muscles: secondary_muscles.iter().map(|m| m.to_string()).collect(),
        equipment: equipment.iter().map(|e| e.to_string()).collect(),
        is_compound,
        difficulty,
    }
}

/// Builds the default catalog of exercises
///
/// **Note**: prefer `get_default_catalog()` outside of tests.
#[rustfmt::skip]
pub fn build_default_catalog() -> Vec<Exercise> {
    use Difficulty::*;

    vec![
        // ====================================================================
        // Chest
        // ====================================================================
        exercise("barbell_bench_press", "Barbell Bench Press", "chest",
            &["triceps", "front_delts"], &["barbell", "bench"], true, Intermediate),
        exercise("dumbbell_bench_press", "Dumbbell Bench Press", "chest",
            &["triceps", "front_delts"], &["dumbbell", "bench"], true, Beginner),
        exercise("incline_dumbbell_press", "Incline Dumbbell Press", "chest",
            &["front_delts", "triceps"], &["dumbbell", "bench"], true, Beginner),
        exercise("machine_chest_press", "Machine Chest Press", "chest",
            &["triceps", "front_delts"], &["machine"], true, Beginner),
        exercise("push_up", "Push-Up", "chest",
            &["triceps", "front_delts", "abs"], &["bodyweight"], true, Beginner),
        exercise("parallel_bar_dip", "Parallel Bar Dip", "chest",
            &["triceps", "front_delts"], &["dip_station"], true, Intermediate),
        exercise("cable_fly", "Cable Fly", "chest",
            &["front_delts"], &["cable"], false, Beginner),
        // ====================================================================
        // Shoulders
        // ====================================================================
        exercise("overhead_press", "Overhead Press", "front_delts",
            &["triceps", "side_delts"], &["barbell"], true, Intermediate),
        exercise("dumbbell_shoulder_press", "Dumbbell Shoulder Press", "front_delts",
            &["triceps", "side_delts"], &["dumbbell", "bench"], true, Beginner),
        exercise("lateral_raise", "Dumbbell Lateral Raise", "side_delts",
            &[], &["dumbbell"], false, Beginner),
        exercise("face_pull", "Cable Face Pull", "rear_delts",
            &["upper_back"], &["cable"], false, Beginner),
        // ====================================================================
        // Back
        // ====================================================================
        exercise("barbell_row", "Barbell Row", "lats",
            &["upper_back", "biceps", "rear_delts"], &["barbell"], true, Intermediate),
        exercise("dumbbell_row", "One-Arm Dumbbell Row", "lats",
            &["upper_back", "biceps"], &["dumbbell", "bench"], true, Beginner),
        exercise("pull_up", "Pull-Up", "lats",
            &["biceps", "upper_back"], &["pullup_bar"], true, Intermediate),
        exercise("lat_pulldown", "Lat Pulldown", "lats",
            &["biceps", "upper_back"], &["cable"], true, Beginner),
        exercise("seated_cable_row", "Seated Cable Row", "lats",
            &["upper_back", "biceps", "rear_delts"], &["cable"], true, Beginner),
        // ====================================================================
        // Arms
        // ====================================================================
        exercise("barbell_curl", "Barbell Curl", "biceps",
            &["forearms"], &["barbell"], false, Beginner),
        exercise("dumbbell_curl", "Dumbbell Curl", "biceps",
            &["forearms"], &["dumbbell"], false, Beginner),
        exercise("triceps_pushdown", "Triceps Pushdown", "triceps",
            &[], &["cable"], false, Beginner),
        exercise("overhead_triceps_extension", "Overhead Triceps Extension", "triceps",
            &[], &["dumbbell"], false, Beginner),
        // ====================================================================
        // Legs
        // ====================================================================
        exercise("back_squat", "Back Squat", "quads",
            &["glutes", "adductors", "lower_back"], &["barbell", "squat_rack"], true, Intermediate),
        exercise("front_squat", "Front Squat", "quads",
            &["glutes", "upper_back"], &["barbell", "squat_rack"], true, Advanced),
        exercise("goblet_squat", "Goblet Squat", "quads",
            &["glutes", "adductors"], &["dumbbell"], true, Beginner),
        exercise("leg_press", "Leg Press", "quads",
            &["glutes", "adductors"], &["machine"], true, Beginner),
        exercise("bulgarian_split_squat", "Bulgarian Split Squat", "quads",
            &["glutes", "adductors"], &["dumbbell", "bench"], true, Intermediate),
        exercise("leg_extension", "Leg Extension", "quads",
            &[], &["machine"], false, Beginner),
        exercise("deadlift", "Conventional Deadlift", "hamstrings",
            &["glutes", "lower_back", "upper_back", "forearms"], &["barbell"], true, Advanced),
        exercise("romanian_deadlift", "Romanian Deadlift", "hamstrings",
            &["glutes", "lower_back"], &["barbell"], true, Intermediate),
        exercise("dumbbell_romanian_deadlift", "Dumbbell Romanian Deadlift", "hamstrings",
            &["glutes", "lower_back"], &["dumbbell"], true, Beginner),
        exercise("seated_leg_curl", "Seated Leg Curl", "hamstrings",
            &[], &["machine"], false, Beginner),
        exercise("hip_thrust", "Barbell Hip Thrust", "glutes",
            &["hamstrings"], &["barbell", "bench"], true, Beginner),
        exercise("kettlebell_swing", "Kettlebell Swing", "glutes",
            &["hamstrings", "lower_back"], &["kettlebell"], true, Beginner),
        exercise("standing_calf_raise", "Standing Calf Raise", "calves",
            &[], &["machine"], false, Beginner),
    ]
}

/// Validate a catalog for consistency
///
/// Returns a list of validation errors, or empty Vec if valid.
pub fn validate_catalog(catalog: &[Exercise]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for exercise in catalog {
        if exercise.id.is_empty() {
            errors.push(format!("Exercise '{}' has empty ID", exercise.name));
        } else if !seen.insert(exercise.id.as_str()) {
            errors.push(format!("Duplicate exercise ID '{}'", exercise.id));
        }
        if exercise.name.is_empty() {
            errors.push(format!("Exercise '{}' has empty name", exercise.id));
        }
        if exercise.prime_muscle.is_empty() {
            errors.push(format!("Exercise '{}' has no prime muscle", exercise.id));
        }
        if exercise.secondary_muscles.contains(&exercise.prime_muscle) {
            errors.push(format!(
                "Exercise '{}' lists prime muscle '{}' as secondary",
                exercise.id, exercise.prime_muscle
            ));
        }
    }

    errors
}

/// Look up an exercise by ID
pub fn find_exercise<'a>(catalog: &'a [Exercise], id: &str) -> Result<&'a Exercise> {
    catalog
        .iter()
        .find(|e| e.id == id)
        .ok_or_else(|| Error::UnknownExercise(id.to_string()))
}
