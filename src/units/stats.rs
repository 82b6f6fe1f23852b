//! Base and derived unit stats
//!
//! Base stats are rolled once (or restored verbatim from a save). Derived
//! stats are a pure function of base stats, archetype and level, so they
//! are never persisted.

use serde::{Deserialize, Serialize};

use crate::core::dice::Dice;
use crate::units::archetype::{ArchetypeProfile, StatBaseline};
use crate::units::constants::MIN_STAT;

/// Level-1 stats of a specific unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_hp: i32,
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    #[serde(rename = "move")]
    pub movement: i32,
    pub range: i32,
}

impl BaseStats {
    /// Roll fresh base stats around an archetype's baselines
    ///
    /// HP, strength, agility and intelligence each roll independently;
    /// move and range are fixed by the archetype.
    pub fn roll(profile: &ArchetypeProfile, dice: &mut dyn Dice) -> Self {
        Self {
            max_hp: roll_stat(&profile.hp, dice),
            strength: roll_stat(&profile.strength, dice),
            agility: roll_stat(&profile.agility, dice),
            intelligence: roll_stat(&profile.intelligence, dice),
            movement: profile.movement,
            range: profile.range,
        }
    }

    /// Base stats sitting exactly on the archetype baselines
    pub fn baseline(profile: &ArchetypeProfile) -> Self {
        Self {
            max_hp: profile.hp.base,
            strength: profile.strength.base,
            agility: profile.agility.base,
            intelligence: profile.intelligence.base,
            movement: profile.movement,
            range: profile.range,
        }
    }
}

fn roll_stat(baseline: &StatBaseline, dice: &mut dyn Dice) -> i32 {
    let (low, high) = baseline.roll_bounds();
    dice.roll_range(low, high)
}

/// Current stats at a given level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_hp: i32,
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub movement: i32,
    pub range: i32,
    pub speed: i32,
}

impl DerivedStats {
    /// Linear growth from base stats
    ///
    /// HP grows by the full rate each level; strength, agility and
    /// intelligence grow by half (integer division of the accumulated
    /// growth). All four are floored at 1.
    pub fn at_level(base: &BaseStats, profile: &ArchetypeProfile, level: u32) -> Self {
        let levels_gained = level.max(1) as i32 - 1;
        let half_growth = |stat: &StatBaseline| levels_gained * stat.growth / 2;

        Self {
            max_hp: (base.max_hp + levels_gained * profile.hp.growth).max(MIN_STAT),
            strength: (base.strength + half_growth(&profile.strength)).max(MIN_STAT),
            agility: (base.agility + half_growth(&profile.agility)).max(MIN_STAT),
            intelligence: (base.intelligence + half_growth(&profile.intelligence)).max(MIN_STAT),
            movement: base.movement,
            range: base.range,
            speed: profile.speed,
        }
    }
}
