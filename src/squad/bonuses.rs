//! Composition and commander bonuses
//!
//! Read-only queries for the UI and for future rules; combat resolution
//! does not apply them.

use crate::squad::squad::Squad;
use crate::units::archetype::Archetype;

/// Bonus fractions earned by a squad's mix of melee and ranged units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormationBonus {
    pub melee_attack: f32,
    pub ranged_accuracy: f32,
    pub defense: f32,
}

impl FormationBonus {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Bonus fractions granted by a commander-class unit
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CommanderBonus {
    pub attack: f32,
    pub defense: f32,
    pub magic: f32,
    pub healing: f32,
    pub evasion: f32,
}

impl CommanderBonus {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn for_archetype(archetype: Archetype) -> Option<Self> {
        let bonus = match archetype {
            Archetype::Champion | Archetype::Paladin | Archetype::Templar => Self {
                attack: 0.15,
                defense: 0.10,
                ..Self::default()
            },
            Archetype::Archmage => Self {
                magic: 0.20,
                ..Self::default()
            },
            Archetype::Bishop => Self {
                healing: 0.25,
                ..Self::default()
            },
            Archetype::Ninja => Self {
                evasion: 0.20,
                ..Self::default()
            },
            _ => return None,
        };
        Some(bonus)
    }
}

impl Squad {
    /// Three or more melee units: +10% melee attack each. Two or more ranged
    /// units: +5% accuracy each. Two of each: +15% defense.
    pub fn formation_bonus(&self) -> FormationBonus {
        let melee = self.living_units().filter(|u| u.range() == 1).count();
        let ranged = self.living_units().filter(|u| u.range() > 1).count();

        let mut bonus = FormationBonus::default();
        if melee >= 3 {
            bonus.melee_attack = 0.1 * melee as f32;
        }
        if ranged >= 2 {
            bonus.ranged_accuracy = 0.05 * ranged as f32;
        }
        if melee >= 2 && ranged >= 2 {
            bonus.defense = 0.15;
        }
        bonus
    }

    /// Bonus from the first living commander on the roster
    pub fn commander_bonus(&self) -> CommanderBonus {
        self.living_units()
            .find_map(|u| CommanderBonus::for_archetype(u.archetype()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Color, GridPos};
    use crate::units::stats::BaseStats;
    use crate::units::unit::Unit;

    fn squad_of(archetypes: &[Archetype]) -> Squad {
        let mut squad = Squad::new(GridPos::new(5, 5), Color(90, 90, 90));
        for &archetype in archetypes {
            squad.add_unit(Unit::from_base_stats(
                archetype,
                1,
                BaseStats::baseline(&archetype.profile()),
            ));
        }
        squad
    }

    #[test]
    fn test_no_bonus_for_small_squad() {
        let squad = squad_of(&[Archetype::Recruit, Archetype::Apprentice]);
        assert!(squad.formation_bonus().is_empty());
        assert!(squad.commander_bonus().is_empty());
    }

    #[test]
    fn test_melee_bonus_scales() {
        let squad = squad_of(&[Archetype::Recruit, Archetype::Recruit, Archetype::Scout, Archetype::Knight]);
        let bonus = squad.formation_bonus();
        assert!((bonus.melee_attack - 0.4).abs() < 1e-6);
        assert_eq!(bonus.ranged_accuracy, 0.0);
        assert_eq!(bonus.defense, 0.0);
    }

    #[test]
    fn test_balanced_squad_gets_defense() {
        let squad = squad_of(&[
            Archetype::Recruit,
            Archetype::Scout,
            Archetype::Apprentice,
            Archetype::Archer,
        ]);
        let bonus = squad.formation_bonus();
        assert_eq!(bonus.melee_attack, 0.0);
        assert!((bonus.ranged_accuracy - 0.1).abs() < 1e-6);
        assert_eq!(bonus.defense, 0.15);
    }

    #[test]
    fn test_first_commander_wins() {
        let squad = squad_of(&[Archetype::Recruit, Archetype::Bishop, Archetype::Templar]);
        let bonus = squad.commander_bonus();
        assert_eq!(bonus.healing, 0.25);
        assert_eq!(bonus.attack, 0.0);
    }

    #[test]
    fn test_fallen_commander_grants_nothing() {
        let mut squad = squad_of(&[Archetype::Ninja]);
        squad.units_mut()[0].take_damage(1000);
        assert!(squad.commander_bonus().is_empty());
    }
}
