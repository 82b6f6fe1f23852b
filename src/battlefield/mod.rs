//! Battlefield - terrain grid, terrain lookup and occupancy queries

#[allow(clippy::module_inception)]
pub mod battlefield;
pub mod terrain;

pub use battlefield::{Battlefield, Occupancy, TerrainProvider};
pub use terrain::{TerrainKind, TerrainTile};
