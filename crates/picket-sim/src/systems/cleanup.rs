//! Cleanup system: removes projectiles whose lifetime has run out.

use hecs::{Entity, World};

use picket_core::components::Projectile;

/// Despawn every projectile expiring at or before `now_secs`.
/// `despawn_buffer` is reused across ticks.
pub fn run(world: &mut World, now_secs: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.expires_at_secs <= now_secs {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
