#![forbid(unsafe_code)]

//! Core calculations and data handling for liftcoach.
//!
//! This crate provides:
//! - Domain types (sets, exercises, plate inventories)
//! - Pure calculators: e1RM, plateau detection, plate math, warmups,
//!   exercise substitution
//! - The default exercise catalog and movement-pattern table
//! - Configuration, logging, and the local set log (JSONL + CSV archive)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod e1rm;
pub mod plateau;
pub mod plates;
pub mod warmup;
pub mod movement;
pub mod catalog;
pub mod substitution;
pub mod setlog;
pub mod archive;
pub mod history;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use e1rm::{estimate_e1rm, E1rmFormula};
pub use plateau::{detect_plateau, detect_plateaus_by_exercise, DEFAULT_PLATEAU_THRESHOLD};
pub use plates::solve_plates;
pub use warmup::{generate_warmups, WarmupScheme, WarmupStep};
pub use movement::MovementPattern;
pub use catalog::{build_default_catalog, find_exercise, get_default_catalog};
pub use substitution::suggest_substitutes;
pub use setlog::{JsonlSetLog, SetSink};
pub use history::load_set_history;
