//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy behaviour state. There is no idle or dead state: inactive pool
/// slots are tracked by the pool, not by the FSM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyState {
    /// Walking the patrol cycle.
    #[default]
    Patrol,
    /// Alerted and out of range: closing on the player.
    Chase,
    /// Alerted and in range: holding position and firing.
    Attack,
}

/// Who fired a projectile. Only player projectiles alert enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

/// Whether the engine advances simulation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    Paused,
}
