//! Weapons system. Turns fire decisions into projectiles.

use glam::Vec3;
use hecs::{Entity, World};

use picket_core::config::PlayerSettings;
use picket_core::enums::Faction;
use picket_core::events::SimEvent;
use picket_core::types::{look_rotation, AgentId, Transform};

use crate::agent::EnemyAgent;
use crate::pool::EnemyPool;
use crate::world_setup::spawn_projectile;

/// Launch one projectile per shooter from its weapon spawn point, along its
/// forward direction. A shooter without a weapon is a silent no-op apart
/// from a `FireSuppressed` event.
pub fn fire_enemy_shots(
    world: &mut World,
    pool: &EnemyPool<EnemyAgent>,
    shooters: &[AgentId],
    now_secs: f64,
    events: &mut Vec<SimEvent>,
) {
    for &id in shooters {
        let Some(agent) = pool.get(id.index()) else {
            continue;
        };
        let Some(weapon) = agent.weapon() else {
            log::debug!("{id} cannot fire: no projectile prefab or spawn point");
            events.push(SimEvent::FireSuppressed { agent: id });
            continue;
        };

        let transform = agent.transform();
        let origin = transform.transform_point(weapon.spawn_offset);
        let direction = transform.forward();
        // Impulse: launch speed is force / mass.
        let velocity = direction * (agent.settings().projectile_force / weapon.projectile_mass);

        spawn_projectile(
            world,
            Faction::Enemy,
            Transform::new(origin, transform.rotation),
            velocity,
            weapon.projectile_radius,
            now_secs,
        );
        log::debug!("incoming attack from {id}");
        events.push(SimEvent::EnemyFired {
            agent: id,
            origin,
            direction,
        });
    }
}

/// Launch a player projectile from `origin` along `direction`.
/// Returns `None` for a zero direction.
pub fn fire_player(
    world: &mut World,
    origin: Vec3,
    direction: Vec3,
    settings: &PlayerSettings,
    now_secs: f64,
    events: &mut Vec<SimEvent>,
) -> Option<Entity> {
    let Some(direction) = direction.try_normalize() else {
        log::warn!("player fire ignored: zero direction");
        return None;
    };
    let rotation = look_rotation(direction).unwrap_or_default();
    let velocity = direction * (settings.projectile_force / settings.projectile_mass);

    let entity = spawn_projectile(
        world,
        Faction::Player,
        Transform::new(origin, rotation),
        velocity,
        settings.projectile_radius,
        now_secs,
    );
    events.push(SimEvent::PlayerFired { origin, direction });
    Some(entity)
}
