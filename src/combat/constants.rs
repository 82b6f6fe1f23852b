//! Combat constants - all tunable values in one place

// Hit chance (percent): base + (attacker agility - defender agility) / 2, clamped
pub const BASE_HIT_CHANCE: i32 = 80;
pub const MIN_HIT_CHANCE: i32 = 30;
pub const MAX_HIT_CHANCE: i32 = 95;

// Damage
pub const MIN_DAMAGE: i32 = 1;

// Experience
pub const KILL_XP_BASE: u32 = 50;
pub const KILL_XP_PER_LEVEL: u32 = 10;
pub const VICTORY_BONUS_XP: u32 = 25;
