//! Snapshot builder. Reads the world and pool to produce a `SimSnapshot`.

use glam::Vec3;
use hecs::World;

use picket_core::components::{Projectile, Velocity};
use picket_core::enums::SimPhase;
use picket_core::events::SimEvent;
use picket_core::state::{ProjectileView, SimSnapshot};
use picket_core::types::{SimTime, Transform};

use crate::agent::EnemyAgent;
use crate::pool::EnemyPool;

/// Build the complete snapshot from current state.
pub fn build_snapshot(
    world: &World,
    pool: &EnemyPool<EnemyAgent>,
    time: SimTime,
    phase: SimPhase,
    player_position: Vec3,
    events: Vec<SimEvent>,
) -> SimSnapshot {
    let enemies = pool.iter().map(EnemyAgent::view).collect();

    let projectiles = world
        .query::<(&Projectile, &Transform, &Velocity)>()
        .iter()
        .map(|(_entity, (projectile, transform, velocity))| ProjectileView {
            faction: projectile.faction,
            position: transform.position,
            velocity: velocity.0,
        })
        .collect();

    SimSnapshot {
        time,
        phase,
        player_position,
        enemies,
        projectiles,
        events,
    }
}
