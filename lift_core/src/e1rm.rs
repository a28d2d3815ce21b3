//! Estimated one-rep-max (e1RM) calculation.
//!
//! Sets are rarely taken to failure, so the reps a lifter reports in reserve
//! are added to the completed reps before applying a rep-max formula.

use serde::{Deserialize, Serialize};

/// Brzycki divides by `37 - reps`; capping keeps the estimate finite.
const BRZYCKI_MAX_REPS: u32 = 36;

/// Rep-max formula used to project a one-rep max
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum E1rmFormula {
    /// `load * (1 + reps / 30)`
    #[default]
    Epley,
    /// `load * 36 / (37 - reps)`
    Brzycki,
}

impl E1rmFormula {
    /// Estimate a one-rep max with this formula
    ///
    /// Degenerate input is clamped rather than rejected: a non-positive or
    /// non-finite load yields `0.0`, and zero effective reps yields the load.
    pub fn estimate(self, load: f64, completed_reps: u32, reps_in_reserve: u32) -> f64 {
        if !load.is_finite() || load <= 0.0 {
            return 0.0;
        }

        let effective = completed_reps.saturating_add(reps_in_reserve);
        if effective <= 1 {
            return load;
        }

        match self {
            E1rmFormula::Epley => load * (1.0 + f64::from(effective) / 30.0),
            E1rmFormula::Brzycki => {
                let r = f64::from(effective.min(BRZYCKI_MAX_REPS));
                load * 36.0 / (37.0 - r)
            }
        }
    }
}

/// Estimate a one-rep max with the Epley formula over effective reps
///
/// Effective reps are `completed_reps + reps_in_reserve`.
pub fn estimate_e1rm(load: f64, completed_reps: u32, reps_in_reserve: u32) -> f64 {
    E1rmFormula::Epley.estimate(load, completed_reps, reps_in_reserve)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_epley_with_reps_in_reserve() {
        // 5 reps + 2 in reserve = 7 effective reps
        let e1rm = estimate_e1rm(100.0, 5, 2);
        assert!(approx_eq(e1rm, 123.333, 0.01), "got {}", e1rm);
    }

    #[test]
    fn test_single_rep_to_failure_is_the_load() {
        assert_eq!(estimate_e1rm(140.0, 1, 0), 140.0);
        assert_eq!(E1rmFormula::Brzycki.estimate(140.0, 1, 0), 140.0);
    }

    #[test]
    fn test_degenerate_input_is_clamped() {
        assert_eq!(estimate_e1rm(0.0, 5, 2), 0.0);
        assert_eq!(estimate_e1rm(-20.0, 5, 2), 0.0);
        assert_eq!(estimate_e1rm(f64::NAN, 5, 2), 0.0);
        assert_eq!(estimate_e1rm(80.0, 0, 0), 80.0);
    }

    #[test]
    fn test_more_reps_in_reserve_never_lowers_estimate() {
        for formula in [E1rmFormula::Epley, E1rmFormula::Brzycki] {
            for reps in 0..=20 {
                let mut previous = formula.estimate(100.0, reps, 0);
                for rir in 1..=40 {
                    let current = formula.estimate(100.0, reps, rir);
                    assert!(
                        current >= previous,
                        "{:?}: reps={} rir={} dropped {} -> {}",
                        formula,
                        reps,
                        rir,
                        previous,
                        current
                    );
                    previous = current;
                }
            }
        }
    }

    #[test]
    fn test_brzycki_stays_finite_at_high_reps() {
        let e1rm = E1rmFormula::Brzycki.estimate(50.0, 40, 5);
        assert!(e1rm.is_finite());
        assert!(approx_eq(e1rm, 50.0 * 36.0, 1e-9));
    }

    #[test]
    fn test_brzycki_matches_reference_value() {
        // 100kg x 10 -> 100 * 36 / 27
        let e1rm = E1rmFormula::Brzycki.estimate(100.0, 10, 0);
        assert!(approx_eq(e1rm, 133.333, 0.01));
    }

    #[test]
    fn test_formula_parses_from_config_names() {
        let formula: E1rmFormula = serde_json::from_str("\"brzycki\"").unwrap();
        assert_eq!(formula, E1rmFormula::Brzycki);
        assert_eq!(E1rmFormula::default(), E1rmFormula::Epley);
    }
}
