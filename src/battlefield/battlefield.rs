//! The square battlefield grid and the lookups movement and combat use
//!
//! Movement and combat never touch the grid directly; they go through
//! `TerrainProvider` and `Occupancy`, so a caller can back either with its
//! own data.

use crate::battlefield::terrain::{TerrainKind, TerrainTile};
use crate::core::config::{GameConfig, TerrainFrequencies};
use crate::core::dice::Dice;
use crate::core::types::GridPos;
use crate::squad::Squad;
use crate::units::unit::Unit;

/// Terrain lookup by cell
pub trait TerrainProvider {
    /// Tile at `pos`, or `None` outside the grid
    fn terrain_at(&self, pos: GridPos) -> Option<TerrainTile>;

    fn in_bounds(&self, pos: GridPos) -> bool {
        self.terrain_at(pos).is_some()
    }

    /// Defense bonus at `pos` (0 outside the grid)
    fn defense_bonus_at(&self, pos: GridPos) -> f32 {
        self.terrain_at(pos).map_or(0.0, |t| t.defense_bonus)
    }
}

/// Which living unit stands on a cell
pub trait Occupancy {
    fn occupant(&self, pos: GridPos) -> Option<&Unit>;

    fn is_occupied(&self, pos: GridPos) -> bool {
        self.occupant(pos).is_some()
    }
}

impl Occupancy for [Squad] {
    fn occupant(&self, pos: GridPos) -> Option<&Unit> {
        self.iter().find_map(|squad| squad.unit_at(pos))
    }
}

/// Fixed-size square grid of terrain
#[derive(Debug, Clone, PartialEq)]
pub struct Battlefield {
    size: u32,
    cells: Vec<TerrainKind>,
}

impl Battlefield {
    /// Grid of a single terrain kind
    pub fn uniform(size: u32, kind: TerrainKind) -> Self {
        Self {
            size,
            cells: vec![kind; (size as usize) * (size as usize)],
        }
    }

    /// Random terrain following the configured frequencies
    pub fn generate(config: &GameConfig, dice: &mut dyn Dice) -> Self {
        let size = config.grid_size;
        let mut field = Self::uniform(size, TerrainKind::Plains);
        for cell in field.cells.iter_mut() {
            *cell = roll_terrain(&config.terrain, dice);
        }

        tracing::debug!(
            "Generated {}x{} battlefield ({} plains, {} forest, {} hills, {} mountains, {} shallows)",
            size,
            size,
            field.count(TerrainKind::Plains),
            field.count(TerrainKind::Forest),
            field.count(TerrainKind::Hills),
            field.count(TerrainKind::Mountains),
            field.count(TerrainKind::Shallows),
        );
        field
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        let size = self.size as i32;
        if pos.x < 0 || pos.y < 0 || pos.x >= size || pos.y >= size {
            return None;
        }
        Some(pos.y as usize * self.size as usize + pos.x as usize)
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        self.index(pos).is_some()
    }

    pub fn kind_at(&self, pos: GridPos) -> Option<TerrainKind> {
        self.index(pos).map(|i| self.cells[i])
    }

    pub fn tile(&self, pos: GridPos) -> Option<TerrainTile> {
        self.kind_at(pos).map(|kind| kind.tile())
    }

    /// Overwrite one cell. Returns false outside the grid.
    pub fn set_terrain(&mut self, pos: GridPos, kind: TerrainKind) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    pub fn count(&self, kind: TerrainKind) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// One glyph per cell, one line per row
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.size as usize);
        for row in self.cells.chunks(self.size.max(1) as usize) {
            out.extend(row.iter().map(|kind| kind.glyph()));
            out.push('\n');
        }
        out
    }
}

impl TerrainProvider for Battlefield {
    fn terrain_at(&self, pos: GridPos) -> Option<TerrainTile> {
        self.tile(pos)
    }
}

fn roll_terrain(frequencies: &TerrainFrequencies, dice: &mut dyn Dice) -> TerrainKind {
    let roll = dice.roll_range(0, 9_999) as f32 / 10_000.0;
    let weighted = [
        (TerrainKind::Forest, frequencies.forest),
        (TerrainKind::Hills, frequencies.hills),
        (TerrainKind::Mountains, frequencies.mountains),
        (TerrainKind::Shallows, frequencies.shallows),
    ];

    let mut threshold = 0.0;
    for (kind, probability) in weighted {
        threshold += probability;
        if roll < threshold {
            return kind;
        }
    }
    TerrainKind::Plains
}
