//! Systems that operate on the simulation each tick.
//!
//! Systems are free functions over the world and the pool. They do not own
//! state; the engine passes in everything they touch.

pub mod cleanup;
pub mod enemy_ai;
pub mod movement;
pub mod snapshot;
pub mod triggers;
pub mod weapons;
