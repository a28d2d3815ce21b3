//! Exercise substitution scoring.
//!
//! Every catalog exercise other than the target is scored additively:
//!
//! | Criterion                                      | Points |
//! |------------------------------------------------|--------|
//! | same prime muscle                              | 50     |
//! | same movement pattern                          | 30     |
//! | same compound/isolation classification         | 20     |
//! | uses at least one piece of available equipment | 15     |
//! | difficulty at or below the target's            | 10     |
//! | each shared secondary muscle                   | 5      |
//!
//! Candidates under [`MIN_SCORE`] are dropped and the best
//! [`MAX_SUBSTITUTES`] are returned. Ties keep catalog order.

use crate::{Exercise, MovementPattern, Substitute};
use std::collections::BTreeSet;

pub const PRIME_MUSCLE_POINTS: u32 = 50;
pub const MOVEMENT_PATTERN_POINTS: u32 = 30;
pub const COMPOUND_MATCH_POINTS: u32 = 20;
pub const EQUIPMENT_POINTS: u32 = 15;
pub const DIFFICULTY_POINTS: u32 = 10;
pub const SECONDARY_MUSCLE_POINTS: u32 = 5;

/// Candidates scoring below this are not suggested
pub const MIN_SCORE: u32 = 50;

/// Maximum number of suggestions returned
pub const MAX_SUBSTITUTES: usize = 5;

/// Score how well `candidate` can stand in for `target`
///
/// Pass the target's movement pattern in so it is classified once per search.
pub fn score_candidate(
    target: &Exercise,
    target_pattern: MovementPattern,
    candidate: &Exercise,
    available_equipment: &BTreeSet<String>,
) -> u32 {
    let mut score = 0;

    if candidate.prime_muscle == target.prime_muscle {
        score += PRIME_MUSCLE_POINTS;
    }
    if MovementPattern::classify(&candidate.name) == target_pattern {
        score += MOVEMENT_PATTERN_POINTS;
    }
    if candidate.is_compound == target.is_compound {
        score += COMPOUND_MATCH_POINTS;
    }
    if !candidate.equipment.is_disjoint(available_equipment) {
        score += EQUIPMENT_POINTS;
    }
    if candidate.difficulty <= target.difficulty {
        score += DIFFICULTY_POINTS;
    }

    let shared_secondary = candidate
        .secondary_muscles
        .intersection(&target.secondary_muscles)
        .count() as u32;
    score += shared_secondary * SECONDARY_MUSCLE_POINTS;

    score
}

/// Rank substitutes for `target` from `catalog`
///
/// The target (matched by ID) is never suggested. Output is ordered by
/// descending score.
pub fn suggest_substitutes(
    target: &Exercise,
    available_equipment: &BTreeSet<String>,
    catalog: &[Exercise],
) -> Vec<Substitute> {
    let target_pattern = MovementPattern::classify(&target.name);

    let mut scored: Vec<Substitute> = catalog
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .map(|candidate| Substitute {
            score: score_candidate(target, target_pattern, candidate, available_equipment),
            exercise: candidate.clone(),
        })
        .filter(|s| s.score >= MIN_SCORE)
        .collect();

    // sort_by is stable, so equal scores keep catalog order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_SUBSTITUTES);

    tracing::debug!(
        "Found {} substitutes for {} ({} pattern)",
        scored.len(),
        target.id,
        target_pattern
    );

    scored
}
