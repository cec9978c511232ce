//! ECS components for hecs entities.
//!
//! The hecs world holds the engine-side collaborators: the player, the
//! waypoint trigger zones, and projectiles. Enemy agents live in the pool.
//! Components are plain data structs with no methods.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::Faction;
use crate::types::WaypointId;

/// Marker for the player entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Player;

/// A patrol location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
}

/// Spherical trigger volume centred on the entity's transform.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TriggerZone {
    pub radius: f32,
}

/// Linear velocity (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// A transient projectile body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub faction: Faction,
    /// Collision radius.
    pub radius: f32,
    /// Simulation time at which the projectile is removed.
    pub expires_at_secs: f64,
}
