pub mod config;
pub mod dice;
pub mod error;
pub mod types;

pub use config::{GameConfig, TerrainFrequencies};
pub use dice::{Dice, GameRng, ScriptedDice};
pub use error::{Result, TacticsError};
pub use types::{Color, GridPos, UnitId};
