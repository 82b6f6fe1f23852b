//! Unit-by-unit combat between two squads
//!
//! Every living attacker strikes once, in roster order, at a random living
//! defender. Nobody strikes back. Three rolls per strike: target, hit, dodge.

use crate::combat::constants::*;
use crate::combat::report::{CombatEvent, CombatReport, StrikeOutcome, UnitTag};
use crate::core::dice::Dice;
use crate::squad::Squad;
use crate::units::unit::{Defense, Unit};

/// Chance (percent) that `attacker` lands a blow on `defender`
pub fn hit_chance(attacker: &Unit, defender: &Unit) -> i32 {
    let agility_edge = (attacker.agility() - defender.agility()).div_euclid(2);
    (BASE_HIT_CHANCE + agility_edge).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// Damage of a landed blow against a defense value on terrain with `defense_bonus`
pub fn strike_damage(attack_power: i32, defense: i32, defense_bonus: f32) -> i32 {
    let defense = (defense as f32 * (1.0 + defense_bonus)) as i32;
    (attack_power - defense / 2).max(MIN_DAMAGE)
}

/// Experience for defeating `defender`
pub fn kill_experience(defender: &Unit) -> u32 {
    KILL_XP_BASE + defender.level() * KILL_XP_PER_LEVEL
}

fn tag(slot: usize, unit: &Unit) -> UnitTag {
    UnitTag {
        slot,
        archetype: unit.archetype(),
    }
}

/// Resolve `attacker` striking `defender`, who stands on terrain granting
/// `defense_bonus`
///
/// Defeated units leave the defender's target pool immediately and both
/// rosters are pruned at the end. If the defender is wiped out, every
/// surviving attacker earns the victory bonus. The attacker is marked as
/// having acted.
pub fn resolve_combat(
    attacker: &mut Squad,
    defender: &mut Squad,
    defense_bonus: f32,
    dice: &mut dyn Dice,
) -> CombatReport {
    let mut report = CombatReport::new(attacker.name.clone(), defender.name.clone());

    let attackers: Vec<usize> = living_slots(attacker);
    let mut targets: Vec<usize> = living_slots(defender);

    for &a in &attackers {
        if targets.is_empty() {
            break;
        }

        let pick = dice.pick_index(targets.len());
        let d = targets[pick];
        let striker = &mut attacker.units_mut()[a];
        let target = &mut defender.units_mut()[d];

        let chance = hit_chance(striker, target);
        let outcome = if dice.roll_percent() as i32 <= chance {
            match target.defense_value(dice) {
                Defense::Dodged => StrikeOutcome::Dodged,
                Defense::Guard(defense) => {
                    let damage = strike_damage(striker.attack_power(), defense, defense_bonus);
                    let defeated = target.take_damage(damage);
                    StrikeOutcome::Hit {
                        damage,
                        remaining_hp: target.current_hp(),
                        max_hp: target.max_hp(),
                        defeated,
                    }
                }
            }
        } else {
            StrikeOutcome::Miss
        };

        tracing::debug!(
            "{} (slot {}) -> {} (slot {}): {:?} at {}%",
            striker.archetype(),
            a,
            target.archetype(),
            d,
            outcome,
            chance
        );

        report.push(CombatEvent::Strike {
            attacker: tag(a, striker),
            defender: tag(d, target),
            hit_chance: chance,
            outcome,
        });

        if let StrikeOutcome::Hit { defeated: true, .. } = outcome {
            let experience = kill_experience(target);
            striker.record_kill();
            if striker.add_experience(experience) {
                report.push(CombatEvent::LevelUp {
                    unit: tag(a, striker),
                    level: striker.level(),
                });
            }
            targets.remove(pick);
        }

        striker.record_battle();
    }

    defender.prune_defeated();

    if !defender.is_alive() {
        report.defender_defeated = true;
        report.push(CombatEvent::SquadDefeated);

        for &a in &attackers {
            let unit = &mut attacker.units_mut()[a];
            if unit.is_alive() && unit.add_experience(VICTORY_BONUS_XP) {
                report.push(CombatEvent::LevelUp {
                    unit: tag(a, unit),
                    level: unit.level(),
                });
            }
        }
    }

    attacker.prune_defeated();
    attacker.has_acted = true;

    tracing::info!(
        "{} attacked {}: {} damage, {} kills{}",
        report.attacker,
        report.defender,
        report.total_damage(),
        report.kills(),
        if report.defender_defeated {
            ", defender wiped out"
        } else {
            ""
        }
    );

    report
}

fn living_slots(squad: &Squad) -> Vec<usize> {
    squad
        .units()
        .iter()
        .enumerate()
        .filter(|(_, unit)| unit.is_alive())
        .map(|(slot, _)| slot)
        .collect()
}
