//! Events consumed and emitted by the simulation.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::EnemyState;
use crate::types::{AgentId, WaypointId};

/// Discrete overlap events from the trigger collaborator. Produced by the
/// trigger system each tick or injected by the host, then consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TriggerEvent {
    /// An agent entered the trigger zone of a patrol waypoint.
    PatrolZoneEntered { agent: AgentId, waypoint: WaypointId },
    /// A player projectile entered an agent's trigger volume.
    PlayerProjectileHit { agent: AgentId },
}

/// Events emitted by the simulation for hosts and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A pool slot was (re)activated.
    EnemySpawned { agent: AgentId, position: Vec3 },
    /// A pool slot was returned.
    EnemyReleased { agent: AgentId },
    /// FSM state transition.
    StateChanged {
        agent: AgentId,
        from: EnemyState,
        to: EnemyState,
    },
    /// Patrol target moved to the next waypoint in the cycle.
    PatrolAdvanced { agent: AgentId, target: WaypointId },
    /// An agent was hit and broadcast an alert.
    AlertRaised {
        source: AgentId,
        delivered: usize,
        rejected: usize,
    },
    /// An enemy projectile was launched.
    EnemyFired {
        agent: AgentId,
        origin: Vec3,
        direction: Vec3,
    },
    /// The fire cooldown elapsed but the agent has no weapon.
    FireSuppressed { agent: AgentId },
    /// A player projectile was launched.
    PlayerFired { origin: Vec3, direction: Vec3 },
}
