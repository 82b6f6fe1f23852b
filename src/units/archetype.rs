//! Unit archetypes and their static profiles
//!
//! Twenty-one classes: three starters, each branching into two upgrade
//! lines of three tiers. The table carries everything class-dependent
//! (baselines, variance, growth, movement, abilities, promotion path and
//! which stat drives attack power) so unit logic looks values up instead
//! of testing class lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::TacticsError;
use crate::core::types::Color;
use crate::units::constants::DEFAULT_SPEED;

/// Unit class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Archetype {
    // Starters
    Recruit,
    Apprentice,
    Scout,

    // Soldier line
    Soldier,
    Veteran,
    Champion,

    // Archer line
    Archer,
    Ranger,
    Sniper,

    // Knight line
    Knight,
    Paladin,
    Templar,

    // Mage line
    Mage,
    Wizard,
    Archmage,

    // Cleric line
    Cleric,
    Priest,
    Bishop,

    // Rogue line
    Rogue,
    Assassin,
    Ninja,
}

/// Which stat an archetype's attack power is built on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageBasis {
    /// strength + level / 2
    Strength,
    /// intelligence + level
    Intelligence,
}

/// Baseline, spread and per-level growth of one rolled stat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatBaseline {
    pub base: i32,
    pub variance: i32,
    pub growth: i32,
}

impl StatBaseline {
    pub const fn new(base: i32, variance: i32, growth: i32) -> Self {
        Self {
            base,
            variance,
            growth,
        }
    }

    /// Inclusive roll bounds; odd variances lean one point low
    pub fn roll_bounds(&self) -> (i32, i32) {
        (self.base - (self.variance + 1) / 2, self.base + self.variance / 2)
    }
}

/// Static profile for an archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeProfile {
    pub hp: StatBaseline,
    pub strength: StatBaseline,
    pub agility: StatBaseline,
    pub intelligence: StatBaseline,
    pub movement: i32,
    pub range: i32,
    pub speed: i32,
    pub damage_basis: DamageBasis,
    pub abilities: &'static [&'static str],
    pub promotes_to: &'static [Archetype],
    pub color: Color,
}

const fn s(base: i32, variance: i32, growth: i32) -> StatBaseline {
    StatBaseline::new(base, variance, growth)
}

impl Archetype {
    pub const ALL: [Archetype; 21] = [
        Archetype::Recruit,
        Archetype::Apprentice,
        Archetype::Scout,
        Archetype::Soldier,
        Archetype::Veteran,
        Archetype::Champion,
        Archetype::Archer,
        Archetype::Ranger,
        Archetype::Sniper,
        Archetype::Knight,
        Archetype::Paladin,
        Archetype::Templar,
        Archetype::Mage,
        Archetype::Wizard,
        Archetype::Archmage,
        Archetype::Cleric,
        Archetype::Priest,
        Archetype::Bishop,
        Archetype::Rogue,
        Archetype::Assassin,
        Archetype::Ninja,
    ];

    /// Classes available to new recruits
    pub const STARTERS: [Archetype; 3] =
        [Archetype::Recruit, Archetype::Apprentice, Archetype::Scout];

    /// Persisted identifier and display name
    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Recruit => "Recruit",
            Archetype::Apprentice => "Apprentice",
            Archetype::Scout => "Scout",
            Archetype::Soldier => "Soldier",
            Archetype::Veteran => "Veteran",
            Archetype::Champion => "Champion",
            Archetype::Archer => "Archer",
            Archetype::Ranger => "Ranger",
            Archetype::Sniper => "Sniper",
            Archetype::Knight => "Knight",
            Archetype::Paladin => "Paladin",
            Archetype::Templar => "Templar",
            Archetype::Mage => "Mage",
            Archetype::Wizard => "Wizard",
            Archetype::Archmage => "Archmage",
            Archetype::Cleric => "Cleric",
            Archetype::Priest => "Priest",
            Archetype::Bishop => "Bishop",
            Archetype::Rogue => "Rogue",
            Archetype::Assassin => "Assassin",
            Archetype::Ninja => "Ninja",
        }
    }

    /// Get the static profile for this archetype
    pub fn profile(&self) -> ArchetypeProfile {
        use Archetype::*;
        use DamageBasis::{Intelligence as Int, Strength as Str};

        // (hp, str, agi, int, move, range, basis, abilities, promotes_to, color)
        let (hp, strength, agility, intelligence, movement, range, damage_basis, abilities, promotes_to, color): (
            StatBaseline,
            StatBaseline,
            StatBaseline,
            StatBaseline,
            i32,
            i32,
            DamageBasis,
            &'static [&'static str],
            &'static [Archetype],
            Color,
        ) = match self {
            Recruit => (
                s(20, 4, 5), s(10, 2, 3), s(8, 1, 2), s(5, 1, 1), 3, 1, Str,
                &["Power Strike"],
                &[Soldier, Knight],
                Color(180, 180, 180),
            ),
            Apprentice => (
                s(15, 3, 3), s(4, 1, 1), s(6, 1, 1), s(12, 2, 4), 2, 2, Str,
                &["Fireball"],
                &[Mage, Cleric],
                Color(200, 200, 255),
            ),
            Scout => (
                s(18, 3, 4), s(6, 1, 1), s(12, 2, 4), s(6, 1, 1), 4, 1, Str,
                &["Quick Attack"],
                &[Archer, Rogue],
                Color(180, 220, 180),
            ),

            Soldier => (
                s(25, 5, 6), s(14, 2, 4), s(10, 1, 2), s(6, 1, 1), 3, 1, Str,
                &["Power Strike", "Shield Bash"],
                &[Veteran],
                Color(200, 50, 50),
            ),
            Veteran => (
                s(35, 6, 7), s(18, 3, 5), s(12, 2, 3), s(8, 1, 2), 3, 1, Str,
                &["Power Strike", "Shield Bash", "Second Wind"],
                &[Champion],
                Color(220, 70, 70),
            ),
            Champion => (
                s(50, 8, 9), s(25, 4, 6), s(15, 3, 4), s(10, 2, 3), 4, 1, Str,
                &["Power Strike", "Shield Bash", "Second Wind", "Battle Focus"],
                &[],
                Color(240, 100, 100),
            ),

            Archer => (
                s(22, 4, 5), s(12, 2, 3), s(14, 2, 5), s(8, 1, 2), 3, 3, Int,
                &["Precise Shot", "Quick Draw"],
                &[Ranger],
                Color(50, 200, 50),
            ),
            Ranger => (
                s(30, 5, 6), s(15, 3, 4), s(18, 3, 6), s(10, 2, 3), 4, 4, Int,
                &["Precise Shot", "Quick Draw", "Camouflage"],
                &[Sniper],
                Color(70, 220, 70),
            ),
            Sniper => (
                s(40, 7, 8), s(18, 3, 5), s(22, 4, 7), s(12, 2, 4), 4, 5, Int,
                &["Precise Shot", "Quick Draw", "Camouflage", "Critical Shot"],
                &[],
                Color(100, 240, 100),
            ),

            Knight => (
                s(40, 7, 8), s(20, 4, 6), s(10, 2, 3), s(6, 1, 2), 3, 1, Str,
                &["Charge", "Shield Bash"],
                &[Paladin],
                Color(100, 100, 255),
            ),
            Paladin => (
                s(50, 8, 9), s(25, 5, 7), s(12, 2, 4), s(8, 2, 3), 3, 1, Str,
                &["Charge", "Shield Bash", "Healing Aura"],
                &[Templar],
                Color(120, 120, 255),
            ),
            Templar => (
                s(60, 10, 11), s(30, 6, 8), s(15, 3, 5), s(10, 2, 4), 4, 1, Str,
                &["Charge", "Shield Bash", "Healing Aura", "Battle Focus"],
                &[],
                Color(150, 150, 255),
            ),

            Mage => (
                s(20, 4, 4), s(6, 1, 2), s(8, 2, 3), s(20, 4, 6), 2, 3, Int,
                &["Fireball", "Mana Shield"],
                &[Wizard],
                Color(200, 50, 200),
            ),
            Wizard => (
                s(25, 5, 5), s(8, 2, 3), s(10, 2, 4), s(25, 5, 7), 2, 4, Int,
                &["Fireball", "Mana Shield", "Teleport"],
                &[Archmage],
                Color(220, 70, 220),
            ),
            Archmage => (
                s(30, 6, 6), s(10, 2, 4), s(12, 3, 5), s(30, 6, 8), 3, 5, Int,
                &["Fireball", "Mana Shield", "Teleport", "Elemental Mastery"],
                &[],
                Color(240, 100, 240),
            ),

            Cleric => (
                s(25, 5, 5), s(8, 2, 3), s(10, 2, 4), s(15, 3, 5), 2, 2, Int,
                &["Healing Touch", "Shield Bash"],
                &[Priest],
                Color(255, 255, 100),
            ),
            Priest => (
                s(30, 6, 6), s(10, 2, 4), s(12, 3, 5), s(20, 4, 6), 2, 3, Int,
                &["Healing Touch", "Shield Bash", "Resurrection"],
                &[Bishop],
                Color(255, 255, 120),
            ),
            Bishop => (
                s(35, 7, 7), s(12, 3, 5), s(15, 3, 6), s(25, 5, 7), 3, 4, Int,
                &["Healing Touch", "Shield Bash", "Resurrection", "Holy Aura"],
                &[],
                Color(255, 255, 150),
            ),

            Rogue => (
                s(22, 4, 5), s(10, 2, 3), s(16, 3, 6), s(8, 2, 2), 4, 1, Str,
                &["Quick Attack", "Stealth"],
                &[Assassin],
                Color(255, 150, 50),
            ),
            Assassin => (
                s(28, 5, 6), s(14, 3, 4), s(20, 4, 7), s(10, 2, 3), 5, 1, Str,
                &["Quick Attack", "Stealth", "Critical Strike"],
                &[Ninja],
                Color(255, 170, 70),
            ),
            Ninja => (
                s(35, 7, 7), s(18, 4, 5), s(25, 5, 8), s(12, 3, 4), 5, 2, Str,
                &["Quick Attack", "Stealth", "Critical Strike", "Smoke Bomb"],
                &[],
                Color(255, 190, 100),
            ),
        };

        ArchetypeProfile {
            hp,
            strength,
            agility,
            intelligence,
            movement,
            range,
            speed: DEFAULT_SPEED,
            damage_basis,
            abilities,
            promotes_to,
            color,
        }
    }

    /// Archetypes this one may promote into (empty = terminal)
    pub fn successors(&self) -> &'static [Archetype] {
        self.profile().promotes_to
    }

    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }

    pub fn can_promote_to(&self, target: Archetype) -> bool {
        self.successors().contains(&target)
    }

    pub fn damage_basis(&self) -> DamageBasis {
        self.profile().damage_basis
    }

    pub fn abilities(&self) -> &'static [&'static str] {
        self.profile().abilities
    }

    pub fn is_starter(&self) -> bool {
        Self::STARTERS.contains(self)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Archetype {
    type Err = TacticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Archetype::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| TacticsError::UnknownArchetype(s.to_string()))
    }
}

impl TryFrom<String> for Archetype {
    type Error = TacticsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Archetype> for String {
    fn from(archetype: Archetype) -> Self {
        archetype.name().to_string()
    }
}
