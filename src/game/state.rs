//! Game state: squads on a battlefield, driven one action at a time
//!
//! Every mutation goes through an intent-level operation (`move_squad`,
//! `end_turn`, `recruit_unit`, `promote_unit_if_eligible`) and completes
//! before it returns.

use std::collections::BTreeSet;
use std::f64::consts::TAU;
use std::fmt;

use crate::battlefield::{Battlefield, Occupancy, TerrainProvider};
use crate::combat::{resolve_combat, CombatReport};
use crate::core::config::GameConfig;
use crate::core::dice::{Dice, GameRng};
use crate::core::error::{Result, TacticsError};
use crate::core::types::{GridPos, UnitId};
use crate::movement::{attack_targets, MovementPlanner};
use crate::squad::Squad;
use crate::units::archetype::Archetype;
use crate::units::unit::Unit;

/// Combat log lines kept in memory
pub const COMBAT_LOG_CAPACITY: usize = 200;

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    AlreadyActed,
    SquadDefeated,
    OutOfRange,
    /// Another squad's unit or the grid edge is in the way of a formation member
    FormationBlocked,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::AlreadyActed => write!(f, "squad has already acted this turn"),
            MoveRejection::SquadDefeated => write!(f, "squad has no living units"),
            MoveRejection::OutOfRange => write!(f, "destination is neither reachable nor attackable"),
            MoveRejection::FormationBlocked => {
                write!(f, "formation would overlap another squad or leave the map")
            }
        }
    }
}

/// Result of asking a squad to move onto a cell
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Moved { from: GridPos, to: GridPos },
    Attacked(CombatReport),
    Rejected(MoveRejection),
}

/// Full state of a game in progress
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) map_seed: u64,
    pub(crate) battlefield: Battlefield,
    pub(crate) squads: Vec<Squad>,
    pub(crate) selected: Option<usize>,
    pub(crate) current_turn: u32,
    pub(crate) combat_log: Vec<String>,
    highlighted: BTreeSet<GridPos>,
    targets: BTreeSet<GridPos>,
    dice: GameRng,
}

impl GameState {
    /// New game: generate the map and deploy the starting squads
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let map_seed = match config.seed {
            Some(seed) => seed,
            None => GameRng::from_random_seed().1,
        };

        let battlefield = Battlefield::generate(&config, &mut GameRng::seed_from_u64(map_seed));
        let mut state = Self::with_battlefield(config, battlefield, map_seed);
        state.deploy_starting_squads();
        if !state.squads.is_empty() {
            state.set_selected(Some(0));
        }

        tracing::info!(
            "New game on a {}x{} map (seed {}) with {} squads",
            state.battlefield.size(),
            state.battlefield.size(),
            map_seed,
            state.squads.len()
        );
        Ok(state)
    }

    /// Empty game on a given battlefield; squads are added with `add_squad`
    pub fn with_battlefield(config: GameConfig, battlefield: Battlefield, seed: u64) -> Self {
        Self {
            config,
            map_seed: seed,
            battlefield,
            squads: Vec::new(),
            selected: None,
            current_turn: 1,
            combat_log: Vec::new(),
            highlighted: BTreeSet::new(),
            targets: BTreeSet::new(),
            dice: GameRng::seed_from_u64(seed.wrapping_add(1)),
        }
    }

    /// Reseed the game's dice (map generation is unaffected)
    pub fn reseed(&mut self, seed: u64) {
        self.dice = GameRng::seed_from_u64(seed);
    }

    pub fn add_squad(&mut self, squad: Squad) -> usize {
        self.squads.push(squad);
        self.squads.len() - 1
    }

    fn deploy_starting_squads(&mut self) {
        let grid = self.config.grid_size as i32;
        let centre = grid / 2;
        let radius = grid / 3;
        let count = self.config.starting_squads;

        for i in 0..count {
            let angle = TAU * i as f64 / count as f64;
            let x = (centre as f64 + radius as f64 * angle.cos()) as i32;
            let y = (centre as f64 + radius as f64 * angle.sin()) as i32;
            let anchor = GridPos::new(x.clamp(1, grid - 2), y.clamp(1, grid - 2));

            let mut squad = Squad::with_random_color(anchor, &mut self.dice).named(format!("Squad {}", i + 1));
            let units = self.dice.roll_range(
                self.config.min_starting_units as i32,
                self.config.max_starting_units as i32,
            );
            let max_level = self.config.max_starting_level;
            for _ in 0..units {
                let unit = self.random_starter(max_level);
                squad.add_unit(unit);
            }
            self.squads.push(squad);
        }
    }

    fn random_starter(&mut self, max_level: u32) -> Unit {
        let archetype = Archetype::STARTERS[self.dice.pick_index(Archetype::STARTERS.len())];
        let level = self.dice.roll_range(1, max_level.max(1) as i32) as u32;
        Unit::create(archetype, level, &mut self.dice)
    }

    // === Accessors ===

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map_seed(&self) -> u64 {
        self.map_seed
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.battlefield
    }

    pub fn squads(&self) -> &[Squad] {
        &self.squads
    }

    pub fn squad(&self, index: usize) -> Result<&Squad> {
        self.squads.get(index).ok_or(TacticsError::SquadNotFound(index))
    }

    fn squad_mut(&mut self, index: usize) -> Result<&mut Squad> {
        self.squads.get_mut(index).ok_or(TacticsError::SquadNotFound(index))
    }

    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_squad(&self) -> Option<&Squad> {
        self.selected.and_then(|i| self.squads.get(i))
    }

    pub fn combat_log(&self) -> &[String] {
        &self.combat_log
    }

    /// Cells highlighted by the last movement query
    pub fn highlighted_tiles(&self) -> &BTreeSet<GridPos> {
        &self.highlighted
    }

    /// Hostile cells attackable according to the last movement query
    pub fn attack_tiles(&self) -> &BTreeSet<GridPos> {
        &self.targets
    }

    // === Queries ===

    /// Index of the squad with a living unit on `pos`
    pub fn squad_at(&self, pos: GridPos) -> Option<usize> {
        self.squads.iter().position(|s| s.unit_at(pos).is_some())
    }

    pub fn unit_at(&self, pos: GridPos) -> Option<&Unit> {
        self.squads.as_slice().occupant(pos)
    }

    /// Squads with at least one living unit, by index
    pub fn living_squads(&self) -> impl Iterator<Item = (usize, &Squad)> {
        self.squads.iter().enumerate().filter(|(_, s)| s.is_alive())
    }

    /// Living squads hostile to the squad at `index`
    pub fn hostile_squads(&self, index: usize) -> Vec<usize> {
        let Some(own) = self.squads.get(index) else {
            return Vec::new();
        };
        self.living_squads()
            .filter(|(i, s)| *i != index && s.is_hostile_to(own))
            .map(|(i, _)| i)
            .collect()
    }

    /// True once at most one allegiance has living units
    pub fn is_over(&self) -> bool {
        let mut colors: Vec<_> = self.living_squads().map(|(_, s)| s.color).collect();
        colors.sort_by_key(|c| (c.0, c.1, c.2));
        colors.dedup();
        colors.len() <= 1
    }

    // === Selection and movement ===

    fn set_selected(&mut self, index: Option<usize>) {
        for squad in &mut self.squads {
            squad.selected = false;
        }
        if let Some(squad) = index.and_then(|i| self.squads.get_mut(i)) {
            squad.selected = true;
        }
        self.selected = index;
    }

    /// Select the squad standing on `pos` and highlight its movement range
    pub fn select_squad(&mut self, pos: GridPos) -> bool {
        let Some(index) = self.squad_at(pos) else {
            return false;
        };
        self.set_selected(Some(index));

        if let Some((leader_pos, _)) = self.squads[index].leader_position() {
            self.movement_range(leader_pos);
        }
        tracing::debug!("Selected {} at {}", self.squads[index].name, pos);
        true
    }

    /// Cells the unit on `pos` can move to; also refreshes the highlights
    pub fn movement_range(&mut self, pos: GridPos) -> BTreeSet<GridPos> {
        self.highlighted.clear();
        self.targets.clear();

        let Some(index) = self.squad_at(pos) else {
            return BTreeSet::new();
        };
        let (reachable, targets) = self.plan(index, pos);
        self.highlighted = reachable;
        self.targets = targets;
        self.highlighted.clone()
    }

    fn plan(&self, index: usize, from: GridPos) -> (BTreeSet<GridPos>, BTreeSet<GridPos>) {
        let planner = MovementPlanner::new(&self.battlefield, self.squads.as_slice());
        let squad = &self.squads[index];
        let reachable = planner.movement_range(squad, from);
        if squad.has_acted || squad.unit_at(from).is_none() {
            return (reachable, BTreeSet::new());
        }
        let targets = attack_targets(&self.squads, index, from, &reachable);
        (reachable, targets)
    }

    /// Move the squad at `index` so its leader lands on `dest`, or attack the
    /// hostile squad standing there
    ///
    /// A move shifts the whole formation with the leader. Either way the
    /// squad has acted afterwards.
    pub fn move_squad(&mut self, index: usize, dest: GridPos) -> Result<MoveOutcome> {
        let squad = self.squad(index)?;
        if !squad.is_alive() {
            return Ok(self.reject(index, dest, MoveRejection::SquadDefeated));
        }
        if squad.has_acted {
            return Ok(self.reject(index, dest, MoveRejection::AlreadyActed));
        }
        let Some((leader_pos, _)) = squad.leader_position() else {
            return Ok(self.reject(index, dest, MoveRejection::SquadDefeated));
        };

        let (reachable, targets) = self.plan(index, leader_pos);
        self.highlighted.clear();
        self.targets.clear();

        if targets.contains(&dest) {
            if let Some(defender) = self.squad_at(dest) {
                let report = self.attack(index, defender);
                return Ok(MoveOutcome::Attacked(report));
            }
        }

        if !reachable.contains(&dest) {
            return Ok(self.reject(index, dest, MoveRejection::OutOfRange));
        }

        let from = self.squads[index].position;
        let to = from.offset(dest.x - leader_pos.x, dest.y - leader_pos.y);
        if !self.formation_fits(index, to) {
            return Ok(self.reject(index, dest, MoveRejection::FormationBlocked));
        }

        let squad = self.squad_mut(index)?;
        squad.position = to;
        squad.has_acted = true;
        tracing::debug!("{} moved from {} to {}", squad.name, from, to);
        Ok(MoveOutcome::Moved { from, to })
    }

    /// Whether every living member of the squad at `index` would stand on
    /// the grid, clear of other squads, with its anchor on `anchor`
    fn formation_fits(&self, index: usize, anchor: GridPos) -> bool {
        let squad = &self.squads[index];
        squad
            .units()
            .iter()
            .enumerate()
            .filter(|(_, unit)| unit.is_alive())
            .map(|(slot, _)| squad.formation.place(anchor, slot))
            .all(|cell| {
                self.battlefield.in_bounds(cell)
                    && self
                        .squads
                        .iter()
                        .enumerate()
                        .all(|(i, other)| i == index || other.unit_at(cell).is_none())
            })
    }

    fn reject(&self, index: usize, dest: GridPos, reason: MoveRejection) -> MoveOutcome {
        tracing::warn!("Squad {} cannot move to {}: {}", index, dest, reason);
        MoveOutcome::Rejected(reason)
    }

    fn attack(&mut self, attacker: usize, defender: usize) -> CombatReport {
        let defense_bonus = self
            .battlefield
            .defense_bonus_at(self.squads[defender].position);
        let (attacking, defending) = pair_mut(&mut self.squads, attacker, defender);
        let report = resolve_combat(attacking, defending, defense_bonus, &mut self.dice);
        self.append_log(report.lines());
        report
    }

    fn append_log(&mut self, lines: Vec<String>) {
        self.combat_log.extend(lines);
        if self.combat_log.len() > COMBAT_LOG_CAPACITY {
            let excess = self.combat_log.len() - COMBAT_LOG_CAPACITY;
            self.combat_log.drain(..excess);
        }
    }

    /// Advance the turn counter and let every squad act again
    pub fn end_turn(&mut self) {
        self.current_turn += 1;
        for squad in &mut self.squads {
            squad.has_acted = false;
        }
        self.highlighted.clear();
        self.targets.clear();
        tracing::info!("=== TURN {} ===", self.current_turn);
    }

    // === Roster management ===

    /// Add a random level-1 starter to a squad. False if the squad is full.
    pub fn recruit_unit(&mut self, index: usize) -> Result<bool> {
        if self.squad(index)?.is_full() {
            return Ok(false);
        }
        let unit = self.random_starter(1);
        let squad = self.squad_mut(index)?;
        tracing::info!("{} recruited {}", squad.name, unit);
        Ok(squad.add_unit(unit))
    }

    fn unit_in(&self, index: usize, id: UnitId) -> Result<&Unit> {
        self.squad(index)?
            .find_unit(id)
            .ok_or(TacticsError::UnitNotFound(id))
    }

    /// Classes the unit may promote into right now
    pub fn promotion_options(&self, index: usize, id: UnitId) -> Result<&'static [Archetype]> {
        Ok(self.unit_in(index, id)?.promotion_options())
    }

    /// Promote a unit if it is ready and `target` is one of its options
    pub fn promote_unit_if_eligible(
        &mut self,
        index: usize,
        id: UnitId,
        target: Archetype,
    ) -> Result<bool> {
        let squad = self
            .squads
            .get_mut(index)
            .ok_or(TacticsError::SquadNotFound(index))?;
        let unit = squad.find_unit_mut(id).ok_or(TacticsError::UnitNotFound(id))?;
        Ok(unit.promote(target, &mut self.dice))
    }
}

fn pair_mut(squads: &mut [Squad], a: usize, b: usize) -> (&mut Squad, &mut Squad) {
    if a < b {
        let (left, right) = squads.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = squads.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battlefield::TerrainKind;
    use crate::core::types::Color;
    use crate::squad::Formation;
    use crate::units::constants::MAX_FUTURE_POINTS;
    use crate::units::stats::BaseStats;

    fn baseline(archetype: Archetype, level: u32) -> Unit {
        Unit::from_base_stats(archetype, level, BaseStats::baseline(&archetype.profile()))
    }

    fn solo(pos: GridPos, color: Color, unit: Unit) -> Squad {
        let mut squad = Squad::new(pos, color);
        squad.formation = Formation::new(vec![(0, 0)]);
        squad.add_unit(unit);
        squad
    }

    fn small_game() -> GameState {
        let config = GameConfig {
            grid_size: 10,
            ..GameConfig::default()
        };
        GameState::with_battlefield(config, Battlefield::uniform(10, TerrainKind::Plains), 7)
    }

    #[test]
    fn test_new_game_deploys_squads() {
        let config = GameConfig {
            grid_size: 30,
            seed: Some(3),
            ..GameConfig::default()
        };
        let state = GameState::new(config).unwrap();

        assert_eq!(state.squads().len(), 3);
        assert_eq!(state.current_turn(), 1);
        assert_eq!(state.selected_index(), Some(0));
        assert!(state.squads()[0].selected);
        for (i, squad) in state.squads().iter().enumerate() {
            assert_eq!(squad.name, format!("Squad {}", i + 1));
            assert!((1..=3).contains(&squad.len()));
            assert!(squad.units().iter().all(|u| u.archetype().is_starter() && u.level() == 1));
            assert!((1..=28).contains(&squad.position.x));
            assert!((1..=28).contains(&squad.position.y));
        }
        // First squad sits on the circle at angle zero
        assert_eq!(state.squads()[0].position, GridPos::new(25, 15));
    }

    #[test]
    fn test_new_game_rejects_bad_config() {
        let config = GameConfig {
            grid_size: 1,
            ..GameConfig::default()
        };
        assert!(matches!(GameState::new(config), Err(TacticsError::InvalidConfig(_))));
    }

    #[test]
    fn test_squad_and_unit_lookup() {
        let mut state = small_game();
        state.add_squad(solo(GridPos::new(2, 2), Color(1, 1, 1), baseline(Archetype::Scout, 1)));
        assert_eq!(state.squad_at(GridPos::new(2, 2)), Some(0));
        assert_eq!(state.unit_at(GridPos::new(2, 2)).unwrap().archetype(), Archetype::Scout);
        assert!(state.squad_at(GridPos::new(3, 3)).is_none());
        assert!(matches!(state.squad(4), Err(TacticsError::SquadNotFound(4))));
    }

    #[test]
    fn test_select_highlights_range() {
        let mut state = small_game();
        state.add_squad(solo(GridPos::new(5, 5), Color(1, 1, 1), baseline(Archetype::Apprentice, 1)));
        state.add_squad(solo(GridPos::new(5, 7), Color(2, 2, 2), baseline(Archetype::Recruit, 1)));

        assert!(state.select_squad(GridPos::new(5, 5)));
        assert!(state.squads()[0].selected);
        // Move 2 ball has 12 cells; (5, 7) is occupied
        assert_eq!(state.highlighted_tiles().len(), 11);
        assert!(state.attack_tiles().contains(&GridPos::new(5, 7)));

        assert!(state.select_squad(GridPos::new(5, 7)));
        assert!(!state.squads()[0].selected);
        assert_eq!(state.selected_index(), Some(1));
        assert!(!state.select_squad(GridPos::new(0, 0)));
    }

    #[test]
    fn test_move_shifts_formation_with_leader() {
        let mut state = small_game();
        let mut squad = Squad::new(GridPos::new(5, 5), Color(1, 1, 1));
        squad.add_unit(baseline(Archetype::Scout, 2));
        squad.add_unit(baseline(Archetype::Recruit, 1));
        let index = state.add_squad(squad);

        // Leader (slot 0) stands at (4, 4)
        let outcome = state.move_squad(index, GridPos::new(4, 2)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: GridPos::new(5, 5),
                to: GridPos::new(5, 3)
            }
        );
        assert!(state.squads()[index].has_acted);
        assert!(state.unit_at(GridPos::new(4, 2)).is_some());

        let again = state.move_squad(index, GridPos::new(4, 1)).unwrap();
        assert_eq!(again, MoveOutcome::Rejected(MoveRejection::AlreadyActed));
    }

    #[test]
    fn test_move_blocked_when_member_lands_on_other_squad() {
        let mut state = small_game();
        let mut squad = Squad::new(GridPos::new(5, 5), Color(1, 1, 1));
        squad.add_unit(baseline(Archetype::Scout, 2));
        squad.add_unit(baseline(Archetype::Recruit, 1));
        let index = state.add_squad(squad);
        state.add_squad(solo(GridPos::new(4, 3), Color(1, 1, 1), baseline(Archetype::Recruit, 1)));

        // Leader (4, 4) -> (3, 3) would put the recruit from (5, 4) onto (4, 3)
        let outcome = state.move_squad(index, GridPos::new(3, 3)).unwrap();
        assert_eq!(outcome, MoveOutcome::Rejected(MoveRejection::FormationBlocked));
        assert_eq!(state.squads()[index].position, GridPos::new(5, 5));
        assert!(!state.squads()[index].has_acted);
        assert_eq!(state.squad_at(GridPos::new(4, 3)), Some(1));

        // Moving onto cells the squad itself holds is fine
        let outcome = state.move_squad(index, GridPos::new(5, 4)).unwrap();
        assert!(matches!(outcome, MoveOutcome::Rejected(MoveRejection::OutOfRange)));
        let outcome = state.move_squad(index, GridPos::new(3, 4)).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: GridPos::new(5, 5),
                to: GridPos::new(4, 5)
            }
        );
        assert!(state.unit_at(GridPos::new(4, 4)).is_some());
    }

    #[test]
    fn test_move_blocked_when_member_leaves_grid() {
        let mut state = small_game();
        let mut squad = Squad::new(GridPos::new(5, 1), Color(1, 1, 1));
        squad.formation = Formation::new(vec![(0, 0), (0, -1)]);
        squad.add_unit(baseline(Archetype::Scout, 2));
        squad.add_unit(baseline(Archetype::Recruit, 1));
        let index = state.add_squad(squad);

        // The recruit above the leader would end up on row -1
        let outcome = state.move_squad(index, GridPos::new(4, 0)).unwrap();
        assert_eq!(outcome, MoveOutcome::Rejected(MoveRejection::FormationBlocked));
        assert_eq!(state.squads()[index].position, GridPos::new(5, 1));

        // Dead members do not need room
        let mut squad = Squad::new(GridPos::new(8, 1), Color(1, 1, 1));
        squad.formation = Formation::new(vec![(0, 0), (0, -1)]);
        squad.add_unit(baseline(Archetype::Scout, 2));
        let mut fallen = baseline(Archetype::Recruit, 1);
        fallen.take_damage(1000);
        squad.add_unit(fallen);
        let index = state.add_squad(squad);
        let outcome = state.move_squad(index, GridPos::new(7, 0)).unwrap();
        assert!(matches!(outcome, MoveOutcome::Moved { .. }));
    }

    #[test]
    fn test_move_out_of_range_rejected() {
        let mut state = small_game();
        let index = state.add_squad(solo(GridPos::new(1, 1), Color(1, 1, 1), baseline(Archetype::Recruit, 1)));
        let outcome = state.move_squad(index, GridPos::new(8, 8)).unwrap();
        assert_eq!(outcome, MoveOutcome::Rejected(MoveRejection::OutOfRange));
        assert!(!state.squads()[index].has_acted);
    }

    #[test]
    fn test_cannot_attack_ally() {
        let mut state = small_game();
        let a = state.add_squad(solo(GridPos::new(3, 3), Color(1, 1, 1), baseline(Archetype::Recruit, 1)));
        state.add_squad(solo(GridPos::new(4, 3), Color(1, 1, 1), baseline(Archetype::Recruit, 1)));
        let outcome = state.move_squad(a, GridPos::new(4, 3)).unwrap();
        assert_eq!(outcome, MoveOutcome::Rejected(MoveRejection::OutOfRange));
    }

    #[test]
    fn test_attack_adjacent_enemy() {
        let mut state = small_game();
        let a = state.add_squad(solo(GridPos::new(3, 3), Color(1, 1, 1), baseline(Archetype::Knight, 3)));
        state.add_squad(solo(GridPos::new(4, 3), Color(2, 2, 2), baseline(Archetype::Apprentice, 1)));

        let outcome = state.move_squad(a, GridPos::new(4, 3)).unwrap();
        let MoveOutcome::Attacked(report) = outcome else {
            panic!("expected an attack, got {:?}", outcome);
        };
        assert_eq!(report.attacker, state.squads()[a].name);
        assert!(state.squads()[a].has_acted);
        assert_eq!(state.squads()[a].position, GridPos::new(3, 3));
        assert_eq!(state.combat_log()[0], report.lines()[0]);
        assert_eq!(state.combat_log().len(), report.lines().len());
    }

    #[test]
    fn test_end_turn_resets_actions() {
        let mut state = small_game();
        let index = state.add_squad(solo(GridPos::new(1, 1), Color(1, 1, 1), baseline(Archetype::Recruit, 1)));
        state.move_squad(index, GridPos::new(2, 1)).unwrap();
        assert!(state.squads()[index].has_acted);

        state.end_turn();
        assert_eq!(state.current_turn(), 2);
        assert!(!state.squads()[index].has_acted);
    }

    #[test]
    fn test_recruit_until_full() {
        let mut state = small_game();
        let index = state.add_squad(solo(GridPos::new(1, 1), Color(1, 1, 1), baseline(Archetype::Recruit, 1)));
        for _ in 0..8 {
            assert!(state.recruit_unit(index).unwrap());
        }
        assert!(!state.recruit_unit(index).unwrap());
        assert_eq!(state.squads()[index].len(), 9);
        assert!(state.squads()[index].units()[1..].iter().all(|u| u.level() == 1 && u.archetype().is_starter()));
        assert!(state.recruit_unit(9).is_err());
    }

    #[test]
    fn test_promotion_through_state() {
        let mut state = small_game();
        let mut unit = baseline(Archetype::Archer, 4);
        let id = unit.id();
        let index = state.add_squad(solo(GridPos::new(1, 1), Color(1, 1, 1), baseline(Archetype::Recruit, 1)));

        assert!(matches!(
            state.promotion_options(index, id),
            Err(TacticsError::UnitNotFound(_))
        ));

        unit.add_future_points(MAX_FUTURE_POINTS);
        state.squads[index].add_unit(unit);
        assert_eq!(state.promotion_options(index, id).unwrap(), &[Archetype::Ranger]);
        assert!(!state.promote_unit_if_eligible(index, id, Archetype::Sniper).unwrap());
        assert!(state.promote_unit_if_eligible(index, id, Archetype::Ranger).unwrap());
        let promoted = state.squads()[index].find_unit(id).unwrap();
        assert_eq!(promoted.archetype(), Archetype::Ranger);
        assert!(state.promotion_options(index, id).unwrap().is_empty());
    }

    #[test]
    fn test_is_over_by_allegiance() {
        let mut state = small_game();
        state.add_squad(solo(GridPos::new(1, 1), Color(1, 1, 1), baseline(Archetype::Recruit, 1)));
        state.add_squad(solo(GridPos::new(5, 5), Color(1, 1, 1), baseline(Archetype::Recruit, 1)));
        assert!(state.is_over());
        state.add_squad(solo(GridPos::new(8, 8), Color(2, 2, 2), baseline(Archetype::Recruit, 1)));
        assert!(!state.is_over());
        assert_eq!(state.hostile_squads(0), vec![2]);
    }
}
