//! Plate math: which plates to put on each side of the bar.
//!
//! The solver is a largest-first greedy pass. Standard plate sets are designed
//! so that greedy loading is optimal; arbitrary denomination sets are not
//! searched exhaustively.
//!
//! Weights are converted to integer hundredths of a kilogram before solving so
//! that repeated solves of the same load give identical results.

use crate::{PlateCount, PlateLoadout, PlatePreferences};

/// Residual below which a loadout counts as exact (kg)
pub const EXACT_TOLERANCE: f64 = 0.01;

const UNITS_PER_KG: f64 = 100.0;

fn to_units_floor(kg: f64) -> i64 {
    // Tiny bias so 41.249999999 (float noise for 41.25) still floors to 4125
    (kg * UNITS_PER_KG + 1e-6).floor() as i64
}

fn to_units_nearest(kg: f64) -> i64 {
    (kg * UNITS_PER_KG).round() as i64
}

fn from_units(units: i64) -> f64 {
    units as f64 / UNITS_PER_KG
}

/// Usable denominations in units, heaviest first, without duplicates
fn denominations(prefs: &PlatePreferences) -> Vec<i64> {
    let mut units: Vec<i64> = prefs
        .available_plates
        .iter()
        .filter(|w| w.is_finite() && **w > 0.0)
        .map(|w| to_units_nearest(*w))
        .filter(|u| *u > 0)
        .collect();
    units.sort_unstable_by(|a, b| b.cmp(a));
    units.dedup();
    units
}

/// Compute the per-side plate loadout for a target total load
///
/// Returns an empty, exact loadout when the target does not exceed the bar.
/// The achieved load never exceeds the target.
pub fn solve_plates(target: f64, prefs: &PlatePreferences) -> PlateLoadout {
    if !target.is_finite() || !prefs.bar_weight.is_finite() || target <= prefs.bar_weight {
        return PlateLoadout {
            plates: Vec::new(),
            per_side_weight: 0.0,
            is_exact: true,
        };
    }

    let per_side = (target - prefs.bar_weight) / 2.0;
    let mut remaining = to_units_floor(per_side);
    let mut plates = Vec::new();

    for unit in denominations(prefs) {
        let count = u32::try_from(remaining / unit).unwrap_or(u32::MAX);
        if count > 0 {
            remaining -= i64::from(count) * unit;
            plates.push(PlateCount {
                weight: from_units(unit),
                count,
            });
        }
    }

    let loaded: i64 = plates
        .iter()
        .map(|p| to_units_nearest(p.weight) * i64::from(p.count))
        .sum();
    let per_side_weight = from_units(loaded);
    let is_exact = per_side - per_side_weight < EXACT_TOLERANCE;

    tracing::debug!(
        "Plate math: target {} on {} bar -> {} per side ({})",
        target,
        prefs.bar_weight,
        per_side_weight,
        if is_exact { "exact" } else { "short" }
    );

    PlateLoadout {
        plates,
        per_side_weight,
        is_exact,
    }
}

/// Heaviest load at or below `target` that the plate inventory can build
///
/// Never returns less than the empty bar.
pub fn round_down_to_loadable(target: f64, prefs: &PlatePreferences) -> f64 {
    solve_plates(target, prefs).total_load(prefs.bar_weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(bar: f64, plates: &[f64]) -> PlatePreferences {
        PlatePreferences {
            bar_weight: bar,
            available_plates: plates.to_vec(),
        }
    }

    fn kilo_plates() -> PlatePreferences {
        prefs(20.0, &[20.0, 15.0, 10.0, 5.0, 2.5, 1.25])
    }

    #[test]
    fn test_greedy_reaches_exact_target() {
        let loadout = solve_plates(102.5, &kilo_plates());

        assert!(loadout.is_exact);
        assert_eq!(loadout.per_side_weight, 41.25);
        assert_eq!(loadout.count_of(20.0), 2);
        assert_eq!(loadout.count_of(1.25), 1);
        assert_eq!(loadout.plates.len(), 2);
    }

    #[test]
    fn test_target_at_or_below_bar_is_empty() {
        for target in [20.0, 15.0, 0.0, -5.0] {
            let loadout = solve_plates(target, &kilo_plates());
            assert!(loadout.plates.is_empty());
            assert!(loadout.is_exact);
            assert_eq!(loadout.per_side_weight, 0.0);
        }
    }

    #[test]
    fn test_unreachable_remainder_is_not_exact() {
        // 0.5 per side cannot be built from 1.25 minimum
        let loadout = solve_plates(101.0, &kilo_plates());
        assert!(!loadout.is_exact);
        assert_eq!(loadout.per_side_weight, 40.0);
        assert!(loadout.total_load(20.0) <= 101.0);
    }

    #[test]
    fn test_empty_denominations() {
        let loadout = solve_plates(60.0, &prefs(20.0, &[]));
        assert!(loadout.plates.is_empty());
        assert!(!loadout.is_exact);
        assert_eq!(loadout.per_side_weight, 0.0);
    }

    #[test]
    fn test_invalid_denominations_are_ignored() {
        let loadout = solve_plates(60.0, &prefs(20.0, &[0.0, -10.0, f64::NAN, 20.0]));
        assert!(loadout.is_exact);
        assert_eq!(loadout.count_of(20.0), 1);
        assert_eq!(loadout.plates.len(), 1);
    }

    #[test]
    fn test_unsorted_denominations_still_load_heaviest_first() {
        let loadout = solve_plates(100.0, &prefs(20.0, &[5.0, 20.0, 10.0]));
        assert_eq!(loadout.plates[0].weight, 20.0);
        assert_eq!(loadout.count_of(20.0), 2);
        assert_eq!(loadout.count_of(10.0), 0);
        assert!(loadout.is_exact);
    }

    #[test]
    fn test_plate_count_saturates_instead_of_wrapping() {
        let p = prefs(20.0, &[1.25]);
        let per_side = 1.25 * (u32::MAX as f64 + 3.0);
        let loadout = solve_plates(20.0 + 2.0 * per_side, &p);

        assert_eq!(loadout.plates.len(), 1);
        assert_eq!(loadout.plates[0].count, u32::MAX);
        assert_eq!(loadout.per_side_weight, 1.25 * u32::MAX as f64);
        assert!(!loadout.is_exact);
        assert!(loadout.per_side_weight <= per_side);
    }

    #[test]
    fn test_never_overshoots_target() {
        let p = kilo_plates();
        let mut target = 20.0;
        while target < 300.0 {
            let loadout = solve_plates(target, &p);
            let total = loadout.total_load(p.bar_weight);
            assert!(total <= target + 1e-6, "{} overshot to {}", target, total);
            target += 0.35;
        }
    }

    #[test]
    fn test_solving_own_result_is_idempotent() {
        let p = kilo_plates();
        for target in [23.7, 61.0, 102.5, 147.3, 222.2] {
            let first = solve_plates(target, &p);
            let second = solve_plates(first.total_load(p.bar_weight), &p);
            assert_eq!(first.plates, second.plates, "target {}", target);
            assert_eq!(first.per_side_weight, second.per_side_weight);
            assert!(second.is_exact);
        }
    }

    #[test]
    fn test_pound_plates() {
        let p = prefs(45.0, &[45.0, 35.0, 25.0, 10.0, 5.0, 2.5]);
        let loadout = solve_plates(225.0, &p);
        assert_eq!(loadout.count_of(45.0), 2);
        assert!(loadout.is_exact);
    }

    #[test]
    fn test_round_down_to_loadable() {
        let p = kilo_plates();
        assert_eq!(round_down_to_loadable(101.0, &p), 100.0);
        assert_eq!(round_down_to_loadable(10.0, &p), 20.0);
    }
}
