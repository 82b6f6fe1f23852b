//! Squads: an anchored roster of up to nine units
//!
//! A squad occupies one anchor cell; each roster slot stands at the anchor
//! plus its formation offset. Dead units stay on the roster until combat
//! prunes them, and are invisible to every positional query.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::dice::Dice;
use crate::core::types::{Color, GridPos, UnitId};
use crate::squad::formation::Formation;
use crate::squad::MAX_SQUAD_SIZE;
use crate::units::unit::Unit;

/// Which stat `Squad::strongest_unit` ranks by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatFocus {
    /// strength + 0.8 agility + 0.6 intelligence
    #[default]
    Combat,
    Strength,
    Agility,
    Intelligence,
}

impl StatFocus {
    fn score(&self, unit: &Unit) -> f32 {
        match self {
            StatFocus::Combat => {
                unit.strength() as f32 + unit.agility() as f32 * 0.8 + unit.intelligence() as f32 * 0.6
            }
            StatFocus::Strength => unit.strength() as f32,
            StatFocus::Agility => unit.agility() as f32,
            StatFocus::Intelligence => unit.intelligence() as f32,
        }
    }
}

/// Random mid-range color, brightened if it would be too dark to read
pub fn random_squad_color(dice: &mut dyn Dice) -> Color {
    let mut channels = [0i32; 3];
    for channel in channels.iter_mut() {
        *channel = dice.roll_range(50, 200);
    }
    if channels.iter().sum::<i32>() < 180 {
        for channel in channels.iter_mut() {
            *channel = (*channel + 50).min(255);
        }
    }
    Color(channels[0] as u8, channels[1] as u8, channels[2] as u8)
}

/// An anchored roster of units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SquadRecord", from = "SquadRecord")]
pub struct Squad {
    pub position: GridPos,
    pub color: Color,
    pub name: String,
    pub selected: bool,
    pub has_acted: bool,
    pub formation: Formation,
    units: Vec<Unit>,
}

impl Squad {
    /// Empty squad named after its anchor
    pub fn new(position: GridPos, color: Color) -> Self {
        Self {
            position,
            color,
            name: format!("Squad {}", position),
            selected: false,
            has_acted: false,
            formation: Formation::default(),
            units: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Empty squad with a random display color
    pub fn with_random_color(position: GridPos, dice: &mut dyn Dice) -> Self {
        Self::new(position, random_squad_color(dice))
    }

    // === Roster ===

    /// Full roster in slot order, including the fallen
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub(crate) fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.units.len() >= MAX_SQUAD_SIZE
    }

    /// Append a unit. Returns false (and drops nothing) when the roster is full.
    pub fn add_unit(&mut self, unit: Unit) -> bool {
        if self.is_full() {
            return false;
        }
        self.units.push(unit);
        true
    }

    /// Remove a unit by identity, handing it back if it was on the roster
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let index = self.units.iter().position(|u| u.id() == id)?;
        Some(self.units.remove(index))
    }

    pub fn find_unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id() == id)
    }

    pub fn find_unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id() == id)
    }

    /// Drop defeated units from the roster. Returns how many were removed.
    pub(crate) fn prune_defeated(&mut self) -> usize {
        let before = self.units.len();
        self.units.retain(|u| u.is_alive());
        before - self.units.len()
    }

    pub fn living_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| u.is_alive())
    }

    pub fn living_count(&self) -> usize {
        self.living_units().count()
    }

    pub fn is_alive(&self) -> bool {
        self.units.iter().any(|u| u.is_alive())
    }

    // === Positions ===

    /// Grid cell of every living unit, in roster order
    pub fn unit_positions(&self) -> Vec<(GridPos, &Unit)> {
        self.units
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_alive())
            .map(|(slot, unit)| (self.formation.place(self.position, slot), unit))
            .collect()
    }

    /// Living unit standing on `pos`, if any
    pub fn unit_at(&self, pos: GridPos) -> Option<&Unit> {
        self.unit_positions()
            .into_iter()
            .find(|(p, _)| *p == pos)
            .map(|(_, unit)| unit)
    }

    /// Highest-level living unit; the earliest roster slot wins ties
    pub fn leader(&self) -> Option<&Unit> {
        first_max_by(self.living_units(), |u| u.level() as f32)
    }

    /// Where the leader currently stands
    pub fn leader_position(&self) -> Option<(GridPos, &Unit)> {
        let leader = self.leader()?.id();
        self.unit_positions()
            .into_iter()
            .find(|(_, unit)| unit.id() == leader)
    }

    // === Aggregates ===

    pub fn strongest_unit(&self, focus: StatFocus) -> Option<&Unit> {
        first_max_by(self.living_units(), |u| focus.score(u))
    }

    /// Weighted stat sum over living units
    pub fn total_power(&self) -> f32 {
        self.living_units()
            .map(|u| {
                u.strength() as f32
                    + u.agility() as f32 * 0.8
                    + u.intelligence() as f32 * 0.6
                    + u.max_hp() as f32 * 0.2
            })
            .sum()
    }

    pub fn average_level(&self) -> f32 {
        let count = self.living_count();
        if count == 0 {
            return 0.0;
        }
        let total: u32 = self.living_units().map(|u| u.level()).sum();
        total as f32 / count as f32
    }

    /// The slowest living unit gates the squad (0 when none are alive)
    pub fn effective_move_range(&self) -> i32 {
        self.living_units().map(|u| u.movement()).min().unwrap_or(0)
    }

    /// (shortest, longest) attack range among living units
    pub fn effective_attack_range(&self) -> (i32, i32) {
        let ranges = || self.living_units().map(|u| u.range());
        match (ranges().min(), ranges().max()) {
            (Some(min), Some(max)) => (min, max),
            _ => (0, 0),
        }
    }

    /// Heal every living unit. Returns the total HP restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.units
            .iter_mut()
            .filter(|u| u.is_alive())
            .map(|u| u.heal(amount))
            .sum()
    }

    /// Allegiance is the squad color
    pub fn is_hostile_to(&self, other: &Squad) -> bool {
        self.color != other.color
    }
}

fn first_max_by<'a>(
    units: impl Iterator<Item = &'a Unit>,
    key: impl Fn(&Unit) -> f32,
) -> Option<&'a Unit> {
    let mut best: Option<(&Unit, f32)> = None;
    for unit in units {
        let score = key(unit);
        match best {
            Some((_, top)) if top >= score => {}
            _ => best = Some((unit, score)),
        }
    }
    best.map(|(unit, _)| unit)
}

impl fmt::Display for Squad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels: Vec<String> = self
            .living_units()
            .map(|u| format!("Lv.{} {}", u.level(), u.archetype()))
            .collect();
        write!(
            f,
            "{} at {} with {}/{} units\nLevels: [{}]\nPower: {:.1}  Avg Level: {:.1}",
            self.name,
            self.position,
            self.living_count(),
            self.units.len(),
            levels.join(", "),
            self.total_power(),
            self.average_level()
        )
    }
}

/// Persisted shape of a squad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquadRecord {
    pub x: i32,
    pub y: i32,
    pub color: Color,
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub has_acted: bool,
    #[serde(default)]
    pub formation: Formation,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl From<Squad> for SquadRecord {
    fn from(squad: Squad) -> Self {
        Self {
            x: squad.position.x,
            y: squad.position.y,
            color: squad.color,
            name: squad.name,
            selected: squad.selected,
            has_acted: squad.has_acted,
            formation: squad.formation,
            units: squad.units,
        }
    }
}

impl From<SquadRecord> for Squad {
    fn from(record: SquadRecord) -> Self {
        let mut squad = Squad::new(GridPos::new(record.x, record.y), record.color).named(record.name);
        squad.selected = record.selected;
        squad.has_acted = record.has_acted;
        squad.formation = record.formation;

        let total = record.units.len();
        for unit in record.units {
            if !squad.add_unit(unit) {
                tracing::warn!(
                    "{} lists {} units; keeping the first {}",
                    squad.name,
                    total,
                    MAX_SQUAD_SIZE
                );
                break;
            }
        }
        squad
    }
}
