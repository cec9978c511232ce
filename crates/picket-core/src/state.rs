//! Simulation state snapshot: the complete visible state produced each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{EnemyState, Faction, SimPhase};
use crate::events::SimEvent;
use crate::types::{AgentId, SimTime, WaypointId};

/// Complete simulation state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub phase: SimPhase,
    pub player_position: Vec3,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<SimEvent>,
}

/// One pool slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub agent: AgentId,
    pub in_use: bool,
    pub state: EnemyState,
    pub position: Vec3,
    pub alerted: bool,
    pub aggro_distance: f32,
    pub patrol_target: Option<WaypointId>,
}

/// A live projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub faction: Faction,
    pub position: Vec3,
    pub velocity: Vec3,
}

impl SimSnapshot {
    /// View of a single agent, if the slot exists.
    pub fn enemy(&self, agent: AgentId) -> Option<&EnemyView> {
        self.enemies.iter().find(|e| e.agent == agent)
    }
}
