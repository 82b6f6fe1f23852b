//! Combat - squad-versus-squad resolution and its report

pub mod constants;
pub mod report;
pub mod resolver;

pub use constants::*;
pub use report::{CombatEvent, CombatReport, StrikeOutcome, UnitTag};
pub use resolver::{hit_chance, kill_experience, resolve_combat, strike_damage};
