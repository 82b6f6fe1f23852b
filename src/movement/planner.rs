//! Movement range and attack-target search
//!
//! Breadth-first over orthogonal neighbours. Entering a cell spends its
//! terrain cost; cells holding any living unit block passage.

use std::collections::{BTreeSet, VecDeque};

use ahash::AHashSet;

use crate::battlefield::{Occupancy, TerrainProvider};
use crate::core::types::GridPos;
use crate::squad::Squad;

/// Reachability queries over a terrain and occupancy view
pub struct MovementPlanner<'a, T: ?Sized, O: ?Sized> {
    terrain: &'a T,
    occupancy: &'a O,
}

impl<'a, T, O> MovementPlanner<'a, T, O>
where
    T: TerrainProvider + ?Sized,
    O: Occupancy + ?Sized,
{
    pub fn new(terrain: &'a T, occupancy: &'a O) -> Self {
        Self { terrain, occupancy }
    }

    /// Cells a squad can reach from the unit standing on `from`
    ///
    /// The budget is that unit's move stat. Empty if the squad has already
    /// acted or has no living unit on `from`.
    pub fn movement_range(&self, squad: &Squad, from: GridPos) -> BTreeSet<GridPos> {
        if squad.has_acted {
            return BTreeSet::new();
        }
        let Some(unit) = squad.unit_at(from) else {
            return BTreeSet::new();
        };

        let reachable = self.reachable_from(from, unit.movement());
        tracing::debug!(
            "{} can reach {} cells from {} (move {})",
            squad.name,
            reachable.len(),
            from,
            unit.movement()
        );
        reachable
    }

    /// Every cell reachable from `start` within `budget`, excluding `start`
    ///
    /// A cell is marked visited when it leaves the queue, so the first
    /// arrival claims it even if a later path would have had more budget left.
    pub fn reachable_from(&self, start: GridPos, budget: i32) -> BTreeSet<GridPos> {
        let mut reachable = BTreeSet::new();
        let mut visited: AHashSet<GridPos> = AHashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back((start, budget));

        while let Some((pos, remaining)) = queue.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            if remaining <= 0 {
                continue;
            }

            for next in pos.neighbors() {
                if visited.contains(&next) || self.occupancy.is_occupied(next) {
                    continue;
                }
                let Some(tile) = self.terrain.terrain_at(next) else {
                    continue;
                };

                if remaining >= tile.movement_cost {
                    queue.push_back((next, remaining - tile.movement_cost));
                    if next != start {
                        reachable.insert(next);
                    }
                }
            }
        }

        reachable
    }
}

/// Cells the squad at `attacker` could attack this turn
///
/// A cell qualifies when a living unit of a hostile squad stands on it and
/// it borders `from` or any cell in `reachable`.
pub fn attack_targets(
    squads: &[Squad],
    attacker: usize,
    from: GridPos,
    reachable: &BTreeSet<GridPos>,
) -> BTreeSet<GridPos> {
    let Some(own) = squads.get(attacker) else {
        return BTreeSet::new();
    };

    let mut targets = BTreeSet::new();
    for origin in std::iter::once(&from).chain(reachable.iter()) {
        for next in origin.neighbors() {
            let hostile = squads.iter().enumerate().any(|(i, squad)| {
                i != attacker && squad.is_hostile_to(own) && squad.unit_at(next).is_some()
            });
            if hostile {
                targets.insert(next);
            }
        }
    }
    targets
}
