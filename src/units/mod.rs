//! Units - archetypes, stats and progression
//!
//! A unit's class decides its baselines and promotion path; its level and
//! rolled base stats decide everything else.

pub mod archetype;
pub mod constants;
pub mod stats;
pub mod unit;

// Re-exports for convenient access
pub use archetype::{Archetype, ArchetypeProfile, DamageBasis, StatBaseline};
pub use constants::*;
pub use stats::{BaseStats, DerivedStats};
pub use unit::{Defense, Unit, UnitRecord};
