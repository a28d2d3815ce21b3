//! Movement-pattern classification from exercise names.
//!
//! Classification is a keyword lookup against [`PATTERN_KEYWORDS`]. Names are
//! lowercased and split into words on any non-alphanumeric character, so
//! "Pull-Up" and "pull up" both read as `pull up`. A keyword matches when its
//! words appear contiguously in the name. Rows are tried in table order and
//! the first match wins, so multi-word keywords that override a more general
//! one ("leg curl" before "curl") must come first.
//!
//! This is a heuristic: names outside the table fall back to
//! [`MovementPattern::Other`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad movement pattern of an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    Push,
    Pull,
    Squat,
    Hinge,
    Other,
}

/// Ordered keyword table driving [`MovementPattern::classify`]
pub const PATTERN_KEYWORDS: &[(&str, MovementPattern)] = &[
    // Overrides of general keywords below
    ("leg press", MovementPattern::Squat),
    ("leg extension", MovementPattern::Squat),
    ("leg curl", MovementPattern::Hinge),
    ("back extension", MovementPattern::Hinge),
    ("hip thrust", MovementPattern::Hinge),
    ("good morning", MovementPattern::Hinge),
    ("face pull", MovementPattern::Pull),
    // Hinge
    ("deadlift", MovementPattern::Hinge),
    ("rdl", MovementPattern::Hinge),
    ("swing", MovementPattern::Hinge),
    ("hyperextension", MovementPattern::Hinge),
    ("bridge", MovementPattern::Hinge),
    // Squat
    ("squat", MovementPattern::Squat),
    ("lunge", MovementPattern::Squat),
    ("step up", MovementPattern::Squat),
    ("stepup", MovementPattern::Squat),
    // Pull
    ("row", MovementPattern::Pull),
    ("pulldown", MovementPattern::Pull),
    ("pull", MovementPattern::Pull),
    ("pullup", MovementPattern::Pull),
    ("chin", MovementPattern::Pull),
    ("chinup", MovementPattern::Pull),
    ("curl", MovementPattern::Pull),
    ("shrug", MovementPattern::Pull),
    // Push
    ("press", MovementPattern::Push),
    ("push", MovementPattern::Push),
    ("pushup", MovementPattern::Push),
    ("pushdown", MovementPattern::Push),
    ("dip", MovementPattern::Push),
    ("fly", MovementPattern::Push),
    ("flye", MovementPattern::Push),
    ("extension", MovementPattern::Push),
    ("raise", MovementPattern::Push),
];

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

fn contains_phrase(haystack: &[String], phrase: &[String]) -> bool {
    !phrase.is_empty()
        && haystack
            .windows(phrase.len())
            .any(|window| window == phrase)
}

impl MovementPattern {
    /// Infer the movement pattern from an exercise name
    pub fn classify(name: &str) -> Self {
        let name_words = words(name);

        PATTERN_KEYWORDS
            .iter()
            .find(|(keyword, _)| contains_phrase(&name_words, &words(keyword)))
            .map_or(MovementPattern::Other, |(_, pattern)| *pattern)
    }
}

impl fmt::Display for MovementPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MovementPattern::Push => "push",
            MovementPattern::Pull => "pull",
            MovementPattern::Squat => "squat",
            MovementPattern::Hinge => "hinge",
            MovementPattern::Other => "other",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_lifts() {
        let cases = [
            ("Barbell Bench Press", MovementPattern::Push),
            ("Overhead Press", MovementPattern::Push),
            ("Push-Up", MovementPattern::Push),
            ("Triceps Pushdown", MovementPattern::Push),
            ("Barbell Row", MovementPattern::Pull),
            ("Pull-Up", MovementPattern::Pull),
            ("Lat Pulldown", MovementPattern::Pull),
            ("Barbell Curl", MovementPattern::Pull),
            ("Back Squat", MovementPattern::Squat),
            ("Bulgarian Split Squat", MovementPattern::Squat),
            ("Walking Lunge", MovementPattern::Squat),
            ("Conventional Deadlift", MovementPattern::Hinge),
            ("Romanian Deadlift", MovementPattern::Hinge),
            ("Kettlebell Swing", MovementPattern::Hinge),
        ];

        for (name, expected) in cases {
            assert_eq!(MovementPattern::classify(name), expected, "{}", name);
        }
    }

    #[test]
    fn test_overrides_take_precedence() {
        assert_eq!(MovementPattern::classify("Leg Press"), MovementPattern::Squat);
        assert_eq!(MovementPattern::classify("Seated Leg Curl"), MovementPattern::Hinge);
        assert_eq!(MovementPattern::classify("Back Extension"), MovementPattern::Hinge);
        assert_eq!(MovementPattern::classify("Barbell Hip Thrust"), MovementPattern::Hinge);
        assert_eq!(MovementPattern::classify("Cable Face Pull"), MovementPattern::Pull);
        assert_eq!(MovementPattern::classify("Overhead Triceps Extension"), MovementPattern::Push);
    }

    #[test]
    fn test_matches_whole_words_only() {
        // "row" must not match inside "arrow"
        assert_eq!(MovementPattern::classify("Arrow Drill"), MovementPattern::Other);
        assert_eq!(MovementPattern::classify("Plank"), MovementPattern::Other);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(MovementPattern::classify("PULL UP"), MovementPattern::Pull);
        assert_eq!(MovementPattern::classify("step-up"), MovementPattern::Squat);
        assert_eq!(MovementPattern::classify("Dumbbell_Fly"), MovementPattern::Push);
    }

    #[test]
    fn test_every_keyword_classifies_as_its_row() {
        // Each keyword on its own must resolve to its own row's pattern, so
        // no row is shadowed by an earlier one.
        for (keyword, pattern) in PATTERN_KEYWORDS {
            assert_eq!(MovementPattern::classify(keyword), *pattern, "{}", keyword);
        }
    }
}
