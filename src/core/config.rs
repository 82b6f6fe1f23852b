//! Game configuration
//!
//! Loaded from TOML (see `data/game.toml`). Every field has a default, so a
//! config file only needs the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TacticsError};
use crate::squad::MAX_SQUAD_SIZE;

/// Probability of each non-plains terrain kind per cell
///
/// Whatever probability mass is left over becomes plains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainFrequencies {
    pub forest: f32,
    pub hills: f32,
    pub mountains: f32,
    pub shallows: f32,
}

impl Default for TerrainFrequencies {
    fn default() -> Self {
        Self {
            forest: 0.15,
            hills: 0.10,
            mountains: 0.05,
            shallows: 0.05,
        }
    }
}

impl TerrainFrequencies {
    pub fn total(&self) -> f32 {
        self.forest + self.hills + self.mountains + self.shallows
    }

    /// Flat terrain everywhere
    pub fn plains_only() -> Self {
        Self {
            forest: 0.0,
            hills: 0.0,
            mountains: 0.0,
            shallows: 0.0,
        }
    }
}

/// Configuration for a new game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square battlefield
    pub grid_size: u32,

    /// Squads deployed on a circle around the map centre at game start
    pub starting_squads: usize,

    /// Inclusive range of units in each starting squad
    pub min_starting_units: usize,
    pub max_starting_units: usize,

    /// Starting units roll their level in `1..=max_starting_level`
    pub max_starting_level: u32,

    /// Seed for map generation and all game rolls; random when absent
    pub seed: Option<u64>,

    /// Combat log lines kept in a save file
    pub combat_log_retention: usize,

    pub terrain: TerrainFrequencies,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 100,
            starting_squads: 3,
            min_starting_units: 1,
            max_starting_units: 3,
            max_starting_level: 1,
            seed: None,
            combat_log_retention: 10,
            terrain: TerrainFrequencies::default(),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("Loaded game config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 3 {
            return Err(TacticsError::InvalidConfig(format!(
                "grid_size ({}) must be at least 3",
                self.grid_size
            )));
        }

        if self.min_starting_units == 0
            || self.max_starting_units > MAX_SQUAD_SIZE
            || self.min_starting_units > self.max_starting_units
        {
            return Err(TacticsError::InvalidConfig(format!(
                "starting units must satisfy 1 <= min ({}) <= max ({}) <= {}",
                self.min_starting_units, self.max_starting_units, MAX_SQUAD_SIZE
            )));
        }

        if self.max_starting_level == 0 {
            return Err(TacticsError::InvalidConfig(
                "max_starting_level must be at least 1".into(),
            ));
        }

        let t = &self.terrain;
        let all = [t.forest, t.hills, t.mountains, t.shallows];
        if all.iter().any(|p| !(0.0..=1.0).contains(p)) || t.total() > 1.0 {
            return Err(TacticsError::InvalidConfig(format!(
                "terrain frequencies must be in [0, 1] and sum to at most 1 (sum = {:.2})",
                t.total()
            )));
        }

        Ok(())
    }
}
