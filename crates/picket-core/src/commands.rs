//! Commands sent from the host (input layer, scripts, tests) to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::AgentId;

/// All host actions the simulation accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    // --- Player ---
    /// Teleport the player. Movement physics is the host's concern.
    MovePlayer { position: Vec3 },
    /// Fire a player projectile along `direction` from the player position.
    PlayerFire { direction: Vec3 },

    // --- Pool ---
    /// Activate the first free pool slot at a random spawn.
    CreateEnemy,
    /// Call `CreateEnemy` once per pool slot.
    ReplenishPool,
    /// Return an enemy to the pool (the damage collaborator's kill hook).
    ReleaseEnemy { agent: AgentId },

    // --- Simulation control ---
    Pause,
    Resume,
}
