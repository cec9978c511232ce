//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the player, the waypoint trigger zones, projectiles, and the
//! enemy pool with one shuffled patrol route per agent.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;

use picket_core::components::*;
use picket_core::config::{EnemySettings, PoolSettings, WorldSettings};
use picket_core::constants::PROJECTILE_LIFETIME_SECS;
use picket_core::enums::Faction;
use picket_core::types::{AgentId, Transform, WaypointId};
use picket_patrol::PatrolRoute;

use crate::agent::EnemyAgent;
use crate::pool::{random_spawn, EnemyPool};

/// Spawn the player entity.
pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world.spawn((Player, Transform::from_position(position)))
}

/// Spawn one trigger zone per configured waypoint. The returned entities
/// are indexed by `WaypointId`.
pub fn spawn_waypoints(world: &mut World, settings: &WorldSettings) -> Vec<Entity> {
    settings
        .waypoints
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            world.spawn((
                Waypoint {
                    id: WaypointId(i as u32),
                },
                Transform::from_position(position),
                TriggerZone {
                    radius: settings.patrol_zone_radius,
                },
            ))
        })
        .collect()
}

/// World position of a waypoint.
pub fn waypoint_position(world: &World, waypoints: &[Entity], id: WaypointId) -> Option<Vec3> {
    let entity = *waypoints.get(id.0 as usize)?;
    world
        .get::<&Transform>(entity)
        .ok()
        .map(|transform| transform.position)
}

/// Build the enemy pool: `capacity` agents at random spawns, each with its
/// own random permutation of `waypoints` as its patrol cycle. All start
/// active.
pub fn build_pool<R: Rng + ?Sized>(
    rng: &mut R,
    pool: &PoolSettings,
    enemy: &EnemySettings,
    waypoints: &[WaypointId],
) -> EnemyPool<EnemyAgent> {
    let agents = (0..pool.capacity())
        .map(|slot| {
            let spawn = random_spawn(rng, pool.extent());
            let route = PatrolRoute::random(waypoints, rng);
            EnemyAgent::new(AgentId(slot as u32), enemy.clone(), route, spawn)
        })
        .collect();
    EnemyPool::new(agents)
}

/// Spawn a projectile that lives for `PROJECTILE_LIFETIME_SECS`.
pub fn spawn_projectile(
    world: &mut World,
    faction: Faction,
    transform: Transform,
    velocity: Vec3,
    radius: f32,
    now_secs: f64,
) -> Entity {
    world.spawn((
        Projectile {
            faction,
            radius,
            expires_at_secs: now_secs + PROJECTILE_LIFETIME_SECS,
        },
        transform,
        Velocity(velocity),
    ))
}
