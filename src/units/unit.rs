//! A single combatant: stats, level, experience and promotion progress

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::dice::Dice;
use crate::core::error::TacticsError;
use crate::core::types::UnitId;
use crate::units::archetype::{Archetype, ArchetypeProfile, DamageBasis};
use crate::units::constants::*;
use crate::units::stats::{BaseStats, DerivedStats};

/// Outcome of a defense roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defense {
    /// The attack is avoided entirely
    Dodged,
    /// Defense value to be subtracted (halved) from attack power
    Guard(i32),
}

impl Defense {
    /// Numeric defense; a dodge reports an unbeatable sentinel
    pub fn value(&self) -> i32 {
        match self {
            Defense::Dodged => DODGE_SENTINEL,
            Defense::Guard(value) => *value,
        }
    }

    pub fn is_dodge(&self) -> bool {
        matches!(self, Defense::Dodged)
    }
}

/// A unit on a squad roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "UnitRecord", try_from = "UnitRecord")]
pub struct Unit {
    id: UnitId,
    archetype: Archetype,
    level: u32,
    experience: u32,
    kills: u32,
    battles: u32,
    future_points: u32,
    base_stats: BaseStats,
    stats: DerivedStats,
    current_hp: i32,
}

impl Unit {
    /// Create a unit with freshly rolled base stats at full health
    pub fn create(archetype: Archetype, level: u32, dice: &mut dyn Dice) -> Self {
        let base_stats = BaseStats::roll(&archetype.profile(), dice);
        Self::from_base_stats(archetype, level, base_stats)
    }

    /// Rebuild a unit around known base stats, at full health
    pub fn from_base_stats(archetype: Archetype, level: u32, base_stats: BaseStats) -> Self {
        let level = level.max(1);
        let stats = DerivedStats::at_level(&base_stats, &archetype.profile(), level);
        Self {
            id: UnitId::new(),
            archetype,
            level,
            experience: 0,
            kills: 0,
            battles: 0,
            future_points: 0,
            base_stats,
            stats,
            current_hp: stats.max_hp,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn profile(&self) -> ArchetypeProfile {
        self.archetype.profile()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn battles(&self) -> u32 {
        self.battles
    }

    pub fn future_points(&self) -> u32 {
        self.future_points
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base_stats
    }

    pub fn stats(&self) -> &DerivedStats {
        &self.stats
    }

    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> i32 {
        self.stats.max_hp
    }

    pub fn strength(&self) -> i32 {
        self.stats.strength
    }

    pub fn agility(&self) -> i32 {
        self.stats.agility
    }

    pub fn intelligence(&self) -> i32 {
        self.stats.intelligence
    }

    pub fn movement(&self) -> i32 {
        self.stats.movement
    }

    pub fn range(&self) -> i32 {
        self.stats.range
    }

    pub fn speed(&self) -> i32 {
        self.stats.speed
    }

    /// Ability tags, derived purely from the archetype
    pub fn abilities(&self) -> &'static [&'static str] {
        self.archetype.abilities()
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Experience total that triggers the next level-up
    pub fn experience_to_next_level(&self) -> u32 {
        self.level * XP_PER_LEVEL
    }

    // === Stats ===

    /// Recompute derived stats from base stats and level
    ///
    /// Idempotent. Current HP is clamped down to the new max but never
    /// raised.
    pub fn recompute_stats(&mut self) {
        self.stats = DerivedStats::at_level(&self.base_stats, &self.profile(), self.level);
        self.current_hp = self.current_hp.min(self.stats.max_hp);
    }

    /// Attack power: intelligence-based archetypes use `intelligence + level`,
    /// everyone else `strength + level / 2`
    pub fn attack_power(&self) -> i32 {
        let level = self.level as i32;
        match self.archetype.damage_basis() {
            DamageBasis::Intelligence => self.stats.intelligence + level,
            DamageBasis::Strength => self.stats.strength + level / 2,
        }
    }

    /// Dodge chance in percent: `agility / 2`, capped
    pub fn dodge_chance(&self) -> i32 {
        (self.stats.agility / 2).min(MAX_DODGE_CHANCE)
    }

    /// Roll for a dodge, otherwise report `(strength + agility) / 2`
    pub fn defense_value(&self, dice: &mut dyn Dice) -> Defense {
        let roll = dice.roll_percent() as i32;
        if roll <= self.dodge_chance() {
            return Defense::Dodged;
        }
        Defense::Guard((self.stats.strength + self.stats.agility) / 2)
    }

    // === Health ===

    /// Apply damage, floored at 0 HP. Returns true if the unit is defeated.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.current_hp = (self.current_hp - amount.max(0)).max(0);
        self.current_hp == 0
    }

    /// Heal up to max HP. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount.max(0)).min(self.stats.max_hp);
        self.current_hp - before
    }

    // === Progression ===

    /// Grant experience and the matching future points
    ///
    /// Levels up at most once per call. Returns true on level-up.
    pub fn add_experience(&mut self, xp: u32) -> bool {
        self.experience = self.experience.saturating_add(xp);
        self.add_future_points((xp / XP_PER_FUTURE_POINT).max(1));

        if self.experience >= self.experience_to_next_level() {
            self.level_up();
            return true;
        }
        false
    }

    /// Gain a level: experience resets, stats grow, a quarter of max HP heals
    pub fn level_up(&mut self) {
        self.level += 1;
        self.experience = 0;
        self.recompute_stats();
        self.heal(self.stats.max_hp / LEVEL_UP_HEAL_DIVISOR);

        tracing::info!(
            "{} reached level {} ({} HP)",
            self.archetype,
            self.level,
            self.stats.max_hp
        );
    }

    /// Add promotion currency, capped at 100
    ///
    /// Terminal archetypes never accumulate. Returns true once the bar is full.
    pub fn add_future_points(&mut self, amount: u32) -> bool {
        if !self.can_promote() {
            return false;
        }
        self.future_points = self.future_points.saturating_add(amount).min(MAX_FUTURE_POINTS);
        self.future_points >= MAX_FUTURE_POINTS
    }

    /// Progress toward promotion in percent (100 for terminal archetypes)
    pub fn fp_percentage(&self) -> f32 {
        if !self.can_promote() {
            return 100.0;
        }
        self.future_points as f32 / MAX_FUTURE_POINTS as f32 * 100.0
    }

    /// Does this archetype have any successor?
    pub fn can_promote(&self) -> bool {
        !self.archetype.is_terminal()
    }

    pub fn is_promotion_ready(&self) -> bool {
        self.can_promote() && self.future_points >= MAX_FUTURE_POINTS
    }

    /// Archetypes available right now (empty until future points are full)
    pub fn promotion_options(&self) -> &'static [Archetype] {
        if self.is_promotion_ready() {
            self.archetype.successors()
        } else {
            &[]
        }
    }

    /// Promote into a listed successor
    ///
    /// All-or-nothing: fails without mutation unless `target` is a successor
    /// and future points are full. New base stats are rolled, with base max
    /// HP floored at 4/5 of the current max HP.
    pub fn promote(&mut self, target: Archetype, dice: &mut dyn Dice) -> bool {
        if !self.archetype.can_promote_to(target) || self.future_points < MAX_FUTURE_POINTS {
            return false;
        }

        let previous = self.archetype;
        let retained_hp = self.stats.max_hp * PROMOTION_HP_KEEP_NUM / PROMOTION_HP_KEEP_DEN;

        let mut base_stats = BaseStats::roll(&target.profile(), dice);
        base_stats.max_hp = base_stats.max_hp.max(retained_hp);

        self.archetype = target;
        self.base_stats = base_stats;
        self.recompute_stats();
        self.current_hp = self.current_hp.max(self.stats.max_hp / 2);
        self.future_points = 0;

        tracing::info!("{} promoted to {} at level {}", previous, target, self.level);
        true
    }

    // === Record keeping ===

    pub(crate) fn record_kill(&mut self) {
        self.kills += 1;
    }

    pub(crate) fn record_battle(&mut self) {
        self.battles += 1;
    }

    /// Multi-line stat summary for roster screens
    pub fn stat_summary(&self) -> String {
        let fp_line = if self.can_promote() {
            format!(
                "FP: {}/{} ({:.1}%)\n",
                self.future_points,
                MAX_FUTURE_POINTS,
                self.fp_percentage()
            )
        } else {
            String::new()
        };

        format!(
            "Level: {}\nHP: {}/{}\nStr: {}  Agi: {}\nInt: {}  Mv: {}\nRange: {}  XP: {}/{}\n{}Abilities: {}\nKills: {}  Battles: {}",
            self.level,
            self.current_hp,
            self.stats.max_hp,
            self.stats.strength,
            self.stats.agility,
            self.stats.intelligence,
            self.stats.movement,
            self.stats.range,
            self.experience,
            self.experience_to_next_level(),
            fp_line,
            self.abilities().join(", "),
            self.kills,
            self.battles,
        )
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Lv.{} HP:{}/{})",
            self.archetype, self.level, self.current_hp, self.stats.max_hp
        )
    }
}

/// Persisted shape of a unit
///
/// Abilities are written for readers of the save file but ignored on load;
/// they always come from the archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    #[serde(alias = "unit_type")]
    pub archetype: String,
    pub level: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub battles: u32,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub future_points: u32,
    pub base_stats: BaseStats,
    pub current_hp: i32,
}

impl From<Unit> for UnitRecord {
    fn from(unit: Unit) -> Self {
        Self {
            archetype: unit.archetype.name().to_string(),
            level: unit.level,
            experience: unit.experience,
            kills: unit.kills,
            battles: unit.battles,
            abilities: unit.abilities().iter().map(|a| a.to_string()).collect(),
            future_points: unit.future_points,
            base_stats: unit.base_stats,
            current_hp: unit.current_hp,
        }
    }
}

impl TryFrom<UnitRecord> for Unit {
    type Error = TacticsError;

    fn try_from(record: UnitRecord) -> Result<Self, Self::Error> {
        let archetype: Archetype = record.archetype.parse()?;
        let mut unit = Unit::from_base_stats(archetype, record.level, record.base_stats);
        unit.experience = record.experience;
        unit.kills = record.kills;
        unit.battles = record.battles;
        unit.future_points = if unit.can_promote() {
            record.future_points.min(MAX_FUTURE_POINTS)
        } else {
            0
        };
        unit.current_hp = record.current_hp.clamp(0, unit.stats.max_hp);
        Ok(unit)
    }
}
