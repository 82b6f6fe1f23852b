//! Save games
//!
//! A save holds the turn, the map seed, the tail of the combat log and
//! every squad. The battlefield itself is not stored; it is regenerated
//! from the seed.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battlefield::Battlefield;
use crate::core::config::GameConfig;
use crate::core::dice::GameRng;
use crate::core::error::Result;
use crate::game::state::GameState;
use crate::squad::Squad;

/// Persisted shape of a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    pub current_turn: u32,
    pub map_seed: u64,
    #[serde(default)]
    pub combat_log: Vec<String>,
    #[serde(default)]
    pub squads: Vec<Squad>,
    #[serde(default)]
    pub selected_squad_index: Option<usize>,
}

impl SaveGame {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl GameState {
    /// Snapshot for saving; keeps only the most recent combat log lines
    pub fn to_save(&self) -> SaveGame {
        let retention = self.config.combat_log_retention;
        let skip = self.combat_log.len().saturating_sub(retention);
        SaveGame {
            current_turn: self.current_turn,
            map_seed: self.map_seed,
            combat_log: self.combat_log[skip..].to_vec(),
            squads: self.squads.clone(),
            selected_squad_index: self.selected,
        }
    }

    /// Rebuild a game from a save, regenerating the map from its seed
    pub fn from_save(config: GameConfig, save: SaveGame) -> Result<Self> {
        config.validate()?;
        let battlefield = Battlefield::generate(&config, &mut GameRng::seed_from_u64(save.map_seed));

        let mut state = GameState::with_battlefield(config, battlefield, save.map_seed);
        state.reseed(save.map_seed.wrapping_add(save.current_turn as u64));
        state.current_turn = save.current_turn;
        state.combat_log = save.combat_log;
        state.squads = save.squads;
        state.selected = save
            .selected_squad_index
            .filter(|&i| i < state.squads.len());

        Ok(state)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_save().to_json()?;
        fs::write(path.as_ref(), json)?;
        tracing::info!("Saved turn {} to {}", self.current_turn, path.as_ref().display());
        Ok(())
    }

    pub fn load_from_file(config: GameConfig, path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        let state = Self::from_save(config, SaveGame::from_json(&json)?)?;
        tracing::info!(
            "Loaded turn {} from {}",
            state.current_turn,
            path.as_ref().display()
        );
        Ok(state)
    }
}
