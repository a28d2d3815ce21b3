//! Warmup ramp generation.
//!
//! A scheme is a list of steps expressed as fractions of the working weight.
//! Each step is rounded down to a load the plate inventory can actually build.

use crate::plates::{round_down_to_loadable, solve_plates};
use crate::{PlatePreferences, WarmupSet};
use serde::{Deserialize, Serialize};

/// One step of a warmup scheme
///
/// A `percent` of 0 means the empty bar.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WarmupStep {
    pub percent: f64,
    pub reps: u32,
}

/// Ordered warmup steps, lightest first
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WarmupScheme {
    pub steps: Vec<WarmupStep>,
}

impl Default for WarmupScheme {
    fn default() -> Self {
        Self {
            steps: vec![
                WarmupStep { percent: 0.0, reps: 10 },
                WarmupStep { percent: 0.4, reps: 8 },
                WarmupStep { percent: 0.6, reps: 5 },
                WarmupStep { percent: 0.8, reps: 3 },
                WarmupStep { percent: 0.9, reps: 1 },
            ],
        }
    }
}

/// Generate warmup sets leading up to `working_weight`
///
/// Steps that round to the same load as the previous set, or reach the
/// working weight, are dropped. No warmups are produced when the working
/// weight is not above the empty bar.
pub fn generate_warmups(
    working_weight: f64,
    prefs: &PlatePreferences,
    scheme: &WarmupScheme,
) -> Vec<WarmupSet> {
    if !working_weight.is_finite() || working_weight <= prefs.bar_weight {
        return Vec::new();
    }

    let mut sets: Vec<WarmupSet> = Vec::new();

    for step in &scheme.steps {
        let target = if step.percent <= 0.0 {
            prefs.bar_weight
        } else {
            working_weight * step.percent
        };
        let load = round_down_to_loadable(target, prefs);

        if load >= working_weight {
            continue;
        }
        if sets.last().is_some_and(|previous| load <= previous.load) {
            continue;
        }

        sets.push(WarmupSet {
            load,
            reps: step.reps,
            percent_of_working: step.percent.max(0.0),
            loadout: solve_plates(load, prefs),
        });
    }

    tracing::debug!(
        "Generated {} warmup sets for {} working weight",
        sets.len(),
        working_weight
    );

    sets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kilo_plates() -> PlatePreferences {
        PlatePreferences {
            bar_weight: 20.0,
            available_plates: vec![20.0, 15.0, 10.0, 5.0, 2.5, 1.25],
        }
    }

    #[test]
    fn test_default_ramp_for_100kg() {
        let sets = generate_warmups(100.0, &kilo_plates(), &WarmupScheme::default());

        let loads: Vec<f64> = sets.iter().map(|s| s.load).collect();
        assert_eq!(loads, vec![20.0, 40.0, 60.0, 80.0, 90.0]);
        assert_eq!(sets[0].reps, 10);
        assert!(sets[0].loadout.plates.is_empty());
        assert_eq!(sets[1].loadout.count_of(10.0), 1);
    }

    #[test]
    fn test_light_working_weight_collapses_duplicates() {
        let sets = generate_warmups(40.0, &kilo_plates(), &WarmupScheme::default());

        let loads: Vec<f64> = sets.iter().map(|s| s.load).collect();
        assert_eq!(loads, vec![20.0, 22.5, 30.0, 35.0]);
        assert!(sets.windows(2).all(|w| w[0].load < w[1].load));
    }

    #[test]
    fn test_working_weight_at_bar_has_no_warmups() {
        assert!(generate_warmups(20.0, &kilo_plates(), &WarmupScheme::default()).is_empty());
        assert!(generate_warmups(0.0, &kilo_plates(), &WarmupScheme::default()).is_empty());
    }

    #[test]
    fn test_every_warmup_is_loadable_and_below_working() {
        let prefs = kilo_plates();
        for working in [45.0, 67.5, 101.0, 182.5, 250.0] {
            for set in generate_warmups(working, &prefs, &WarmupScheme::default()) {
                assert!(set.load < working);
                assert!(set.loadout.is_exact);
                assert_eq!(set.loadout.total_load(prefs.bar_weight), set.load);
            }
        }
    }

    #[test]
    fn test_custom_scheme() {
        let scheme = WarmupScheme {
            steps: vec![
                WarmupStep { percent: 0.5, reps: 5 },
                WarmupStep { percent: 1.0, reps: 1 },
            ],
        };
        let sets = generate_warmups(100.0, &kilo_plates(), &scheme);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].load, 50.0);
        assert_eq!(sets[0].percent_of_working, 0.5);
    }
}
