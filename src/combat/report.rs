//! Structured record of one combat, renderable as log lines

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::archetype::Archetype;

/// A unit as it appears in a report: roster slot at the start of combat
/// plus its class at the time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTag {
    pub slot: usize,
    pub archetype: Archetype,
}

impl fmt::Display for UnitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.archetype)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeOutcome {
    /// Hit roll failed
    Miss,
    /// Hit roll succeeded but the defender dodged
    Dodged,
    Hit {
        damage: i32,
        remaining_hp: i32,
        max_hp: i32,
        defeated: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    Strike {
        attacker: UnitTag,
        defender: UnitTag,
        hit_chance: i32,
        outcome: StrikeOutcome,
    },
    LevelUp {
        unit: UnitTag,
        level: u32,
    },
    SquadDefeated,
}

/// Everything that happened when one squad attacked another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    pub attacker: String,
    pub defender: String,
    pub events: Vec<CombatEvent>,
    pub defender_defeated: bool,
}

impl CombatReport {
    pub fn new(attacker: impl Into<String>, defender: impl Into<String>) -> Self {
        Self {
            attacker: attacker.into(),
            defender: defender.into(),
            events: Vec::new(),
            defender_defeated: false,
        }
    }

    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub fn strikes(&self) -> impl Iterator<Item = (&UnitTag, &UnitTag, &StrikeOutcome)> {
        self.events.iter().filter_map(|event| match event {
            CombatEvent::Strike {
                attacker,
                defender,
                outcome,
                ..
            } => Some((attacker, defender, outcome)),
            _ => None,
        })
    }

    pub fn total_damage(&self) -> i32 {
        self.strikes()
            .map(|(_, _, outcome)| match outcome {
                StrikeOutcome::Hit { damage, .. } => *damage,
                _ => 0,
            })
            .sum()
    }

    pub fn kills(&self) -> usize {
        self.strikes()
            .filter(|(_, _, outcome)| matches!(outcome, StrikeOutcome::Hit { defeated: true, .. }))
            .count()
    }

    /// Human-readable combat log lines
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.events.len() + 1);
        lines.push(format!("Combat: {} vs {}", self.attacker, self.defender));

        for event in &self.events {
            let line = match event {
                CombatEvent::Strike {
                    attacker,
                    defender,
                    outcome,
                    ..
                } => match outcome {
                    StrikeOutcome::Miss => format!("  {} misses {}", attacker, defender),
                    StrikeOutcome::Dodged => {
                        format!("  {} dodges an attack from {}", defender, attacker)
                    }
                    StrikeOutcome::Hit {
                        damage,
                        remaining_hp,
                        max_hp,
                        defeated,
                    } => {
                        let state = if *defeated {
                            "defeated".to_string()
                        } else {
                            format!("{}/{} HP", remaining_hp, max_hp)
                        };
                        format!(
                            "  {} hits {} for {} damage ({})",
                            attacker, defender, damage, state
                        )
                    }
                },
                CombatEvent::LevelUp { unit, level } => {
                    format!("  {} reaches level {}", unit, level)
                }
                CombatEvent::SquadDefeated => {
                    format!("  {} was completely defeated!", self.defender)
                }
            };
            lines.push(line);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(slot: usize, archetype: Archetype) -> UnitTag {
        UnitTag { slot, archetype }
    }

    #[test]
    fn test_lines() {
        let mut report = CombatReport::new("Squad 1", "Squad 2");
        report.push(CombatEvent::Strike {
            attacker: tag(0, Archetype::Recruit),
            defender: tag(0, Archetype::Apprentice),
            hit_chance: 81,
            outcome: StrikeOutcome::Hit {
                damage: 8,
                remaining_hp: 7,
                max_hp: 15,
                defeated: false,
            },
        });
        report.push(CombatEvent::Strike {
            attacker: tag(1, Archetype::Scout),
            defender: tag(0, Archetype::Apprentice),
            hit_chance: 83,
            outcome: StrikeOutcome::Miss,
        });
        report.push(CombatEvent::SquadDefeated);

        assert_eq!(
            report.lines(),
            vec![
                "Combat: Squad 1 vs Squad 2",
                "  Recruit hits Apprentice for 8 damage (7/15 HP)",
                "  Scout misses Apprentice",
                "  Squad 2 was completely defeated!",
            ]
        );
        assert_eq!(report.total_damage(), 8);
        assert_eq!(report.kills(), 0);
    }

    #[test]
    fn test_defeat_and_dodge_lines() {
        let mut report = CombatReport::new("A", "B");
        report.push(CombatEvent::Strike {
            attacker: tag(0, Archetype::Knight),
            defender: tag(2, Archetype::Scout),
            hit_chance: 95,
            outcome: StrikeOutcome::Dodged,
        });
        report.push(CombatEvent::Strike {
            attacker: tag(1, Archetype::Knight),
            defender: tag(2, Archetype::Scout),
            hit_chance: 95,
            outcome: StrikeOutcome::Hit {
                damage: 30,
                remaining_hp: 0,
                max_hp: 18,
                defeated: true,
            },
        });
        report.push(CombatEvent::LevelUp {
            unit: tag(1, Archetype::Knight),
            level: 2,
        });

        let lines = report.lines();
        assert_eq!(lines[1], "  Scout dodges an attack from Knight");
        assert_eq!(lines[2], "  Knight hits Scout for 30 damage (defeated)");
        assert_eq!(lines[3], "  Knight reaches level 2");
        assert_eq!(report.kills(), 1);
    }
}
