//! Squads - rosters, formations and squad-level queries

pub mod bonuses;
pub mod formation;
#[allow(clippy::module_inception)]
pub mod squad;

/// Roster capacity
pub const MAX_SQUAD_SIZE: usize = 9;

pub use bonuses::{CommanderBonus, FormationBonus};
pub use formation::Formation;
pub use squad::{random_squad_color, Squad, SquadRecord, StatFocus};
