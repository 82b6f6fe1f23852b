//! Squad Tactics - turn-based grid tactics core
//!
//! Squads of up to nine units move over a terrain grid, fight unit by
//! unit, gain experience and promote along archetype lines.

pub mod battlefield;
pub mod combat;
pub mod core;
pub mod game;
pub mod movement;
pub mod squad;
pub mod units;
