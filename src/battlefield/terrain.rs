//! Battlefield terrain kinds and their effects

use serde::{Deserialize, Serialize};

/// Terrain kind of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainKind {
    #[default]
    Plains,
    Forest,
    Hills,
    Mountains,
    Shallows,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 5] = [
        TerrainKind::Plains,
        TerrainKind::Forest,
        TerrainKind::Hills,
        TerrainKind::Mountains,
        TerrainKind::Shallows,
    ];

    /// Budget spent to enter a cell of this kind (always >= 1)
    pub fn movement_cost(&self) -> i32 {
        match self {
            TerrainKind::Plains => 1,
            TerrainKind::Forest => 2,
            TerrainKind::Hills => 2,
            TerrainKind::Mountains => 3,
            TerrainKind::Shallows => 3,
        }
    }

    /// Fraction added to a defender's defense (0.0 = none)
    pub fn defense_bonus(&self) -> f32 {
        match self {
            TerrainKind::Plains => 0.0,
            TerrainKind::Forest => 0.25,
            TerrainKind::Hills => 0.5,
            TerrainKind::Mountains => 0.75,
            TerrainKind::Shallows => 0.0,
        }
    }

    pub fn tile(&self) -> TerrainTile {
        TerrainTile {
            movement_cost: self.movement_cost(),
            defense_bonus: self.defense_bonus(),
        }
    }

    /// Single-character map glyph
    pub fn glyph(&self) -> char {
        match self {
            TerrainKind::Plains => '.',
            TerrainKind::Forest => 'f',
            TerrainKind::Hills => 'h',
            TerrainKind::Mountains => '^',
            TerrainKind::Shallows => '~',
        }
    }
}

/// What movement and combat need to know about a cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainTile {
    pub movement_cost: i32,
    pub defense_bonus: f32,
}

impl Default for TerrainTile {
    fn default() -> Self {
        TerrainKind::Plains.tile()
    }
}
