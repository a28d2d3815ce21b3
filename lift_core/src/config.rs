//! Configuration file support for liftcoach.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftcoach/config.toml`.
//! Every section and field is optional and falls back to its default.

use crate::e1rm::E1rmFormula;
use crate::plateau::DEFAULT_PLATEAU_THRESHOLD;
use crate::warmup::WarmupScheme;
use crate::{Error, PlatePreferences, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub plates: PlatesConfig,

    #[serde(default)]
    pub plateau: PlateauConfig,

    #[serde(default)]
    pub equipment: EquipmentConfig,

    #[serde(default)]
    pub warmup: WarmupScheme,

    #[serde(default)]
    pub e1rm: E1rmConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Bar and plate inventory
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlatesConfig {
    #[serde(default = "default_bar_weight")]
    pub bar_weight: f64,

    #[serde(default = "default_plates")]
    pub available: Vec<f64>,
}

impl Default for PlatesConfig {
    fn default() -> Self {
        Self {
            bar_weight: default_bar_weight(),
            available: default_plates(),
        }
    }
}

impl PlatesConfig {
    /// Plate preferences for the solver, heaviest plate first
    pub fn preferences(&self) -> PlatePreferences {
        let mut available_plates = self.available.clone();
        available_plates.sort_by(|a, b| b.total_cmp(a));
        PlatePreferences {
            bar_weight: self.bar_weight,
            available_plates,
        }
    }
}

/// Plateau detection parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlateauConfig {
    #[serde(default = "default_plateau_threshold")]
    pub threshold: usize,
}

impl Default for PlateauConfig {
    fn default() -> Self {
        Self {
            threshold: default_plateau_threshold(),
        }
    }
}

/// Equipment availability configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EquipmentConfig {
    #[serde(default = "default_equipment")]
    pub available: BTreeSet<String>,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            available: default_equipment(),
        }
    }
}

/// e1RM display configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct E1rmConfig {
    #[serde(default)]
    pub formula: E1rmFormula,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("liftcoach")
}

fn default_bar_weight() -> f64 {
    20.0
}

fn default_plates() -> Vec<f64> {
    vec![25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25]
}

fn default_plateau_threshold() -> usize {
    DEFAULT_PLATEAU_THRESHOLD
}

fn default_equipment() -> BTreeSet<String> {
    [
        "barbell",
        "bench",
        "bodyweight",
        "cable",
        "dumbbell",
        "machine",
        "pullup_bar",
        "squat_rack",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("liftcoach").join("config.toml")
    }

    /// Reject values the calculators cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.plates.bar_weight.is_finite() || self.plates.bar_weight <= 0.0 {
            return Err(Error::Config(format!(
                "bar_weight must be positive, got {}",
                self.plates.bar_weight
            )));
        }
        if let Some(bad) = self
            .plates
            .available
            .iter()
            .find(|w| !w.is_finite() || **w <= 0.0)
        {
            return Err(Error::Config(format!(
                "plate weights must be positive, got {}",
                bad
            )));
        }
        if self.plateau.threshold == 0 {
            return Err(Error::Config("plateau threshold must be at least 1".into()));
        }
        if let Some(step) = self
            .warmup
            .steps
            .iter()
            .find(|s| !(0.0..1.0).contains(&s.percent))
        {
            return Err(Error::Config(format!(
                "warmup percent must be in [0, 1), got {}",
                step.percent
            )));
        }
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    ///
    /// Writes to a temp file in the same directory and renames it over the
    /// target so a crash never leaves a half-written config behind.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::Config(format!("config path {:?} has no parent", path)))?;
        std::fs::create_dir_all(parent)?;

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
