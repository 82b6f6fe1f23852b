//! Movement - reachability within a move budget

pub mod planner;

pub use planner::{attack_targets, MovementPlanner};
