//! Progression constants - all tunable values in one place

/// Experience needed to level up is `level * XP_PER_LEVEL`
pub const XP_PER_LEVEL: u32 = 100;

/// Future points cap; promotion requires a full bar
pub const MAX_FUTURE_POINTS: u32 = 100;

/// One future point per this much experience gained (minimum 1 per grant)
pub const XP_PER_FUTURE_POINT: u32 = 10;

/// Level-up heals `max_hp / LEVEL_UP_HEAL_DIVISOR`
pub const LEVEL_UP_HEAL_DIVISOR: i32 = 4;

/// Promotion keeps at least 4/5 of the pre-promotion max HP as base HP
pub const PROMOTION_HP_KEEP_NUM: i32 = 4;
pub const PROMOTION_HP_KEEP_DEN: i32 = 5;

/// Dodge chance is `agility / 2` percent, capped here
pub const MAX_DODGE_CHANCE: i32 = 30;

/// Defense reported for a dodged attack
pub const DODGE_SENTINEL: i32 = 999;

/// Speed of every archetype unless the table says otherwise
pub const DEFAULT_SPEED: i32 = 5;

/// Floor applied to every derived stat
pub const MIN_STAT: i32 = 1;
