//! Simulation engine for PICKET.
//!
//! Owns the hecs world (player, waypoint zones, projectiles) and the enemy
//! pool, runs systems at a fixed tick, and produces `SimSnapshot`s.

pub mod agent;
pub mod engine;
pub mod pool;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use picket_core as core;
