//! Trigger detection: turns overlaps into discrete `TriggerEvent`s.
//!
//! Patrol zones are edge-triggered per (agent, waypoint) pair: an agent
//! standing in a zone fires one enter event and cannot fire another until
//! it leaves. A player projectile that overlaps an active agent produces a
//! hit event and is removed, so each projectile hits at most once.

use std::collections::{HashSet, VecDeque};

use glam::Vec3;
use hecs::{Entity, World};

use picket_core::components::{Projectile, TriggerZone, Waypoint};
use picket_core::enums::Faction;
use picket_core::events::TriggerEvent;
use picket_core::types::{AgentId, Transform, WaypointId};

use crate::agent::EnemyAgent;
use crate::pool::{EnemyPool, PoolObject};

/// Agents currently inside each waypoint zone.
pub type ZoneContacts = HashSet<(AgentId, WaypointId)>;

/// Detect zone entries and projectile hits, queueing events in slot order.
pub fn run(
    world: &mut World,
    pool: &EnemyPool<EnemyAgent>,
    contacts: &mut ZoneContacts,
    queue: &mut VecDeque<TriggerEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    detect_zone_entries(world, pool, contacts, queue);
    detect_projectile_hits(world, pool, queue, despawn_buffer);
}

fn detect_zone_entries(
    world: &World,
    pool: &EnemyPool<EnemyAgent>,
    contacts: &mut ZoneContacts,
    queue: &mut VecDeque<TriggerEvent>,
) {
    let zones: Vec<(WaypointId, Vec3, f32)> = world
        .query::<(&Waypoint, &Transform, &TriggerZone)>()
        .iter()
        .map(|(_entity, (waypoint, transform, zone))| {
            (waypoint.id, transform.position, zone.radius)
        })
        .collect();

    for agent in pool.iter() {
        if !agent.in_use() {
            contacts.retain(|(id, _)| *id != agent.id());
            continue;
        }
        let reach = agent.settings().trigger_radius;
        for &(waypoint, center, radius) in &zones {
            let inside = agent.position().distance(center) <= radius + reach;
            let key = (agent.id(), waypoint);
            if inside {
                if contacts.insert(key) {
                    queue.push_back(TriggerEvent::PatrolZoneEntered {
                        agent: agent.id(),
                        waypoint,
                    });
                }
            } else {
                contacts.remove(&key);
            }
        }
    }
}

fn detect_projectile_hits(
    world: &mut World,
    pool: &EnemyPool<EnemyAgent>,
    queue: &mut VecDeque<TriggerEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, (projectile, transform)) in world.query_mut::<(&Projectile, &Transform)>() {
        if projectile.faction != Faction::Player {
            continue;
        }
        let hit = pool.iter().find(|agent| {
            agent.in_use()
                && agent.position().distance(transform.position)
                    <= agent.settings().trigger_radius + projectile.radius
        });
        if let Some(agent) = hit {
            queue.push_back(TriggerEvent::PlayerProjectileHit { agent: agent.id() });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
