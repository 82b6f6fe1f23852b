//! Game - the turn loop collaborator and save games

pub mod save;
pub mod state;

pub use save::SaveGame;
pub use state::{GameState, MoveOutcome, MoveRejection, COMBAT_LOG_CAPACITY};
