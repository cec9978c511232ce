//! Kinematic integration for projectiles.
//!
//! Updates Transform from Velocity each tick: position += velocity * dt.
//! Enemies move through the FSM, not through this system.

use hecs::World;

use picket_core::components::Velocity;
use picket_core::types::Transform;

/// Run kinematic integration for all entities with Transform + Velocity.
pub fn run(world: &mut World, dt: f64) {
    let dt = dt as f32;
    for (_entity, (transform, velocity)) in world.query_mut::<(&mut Transform, &Velocity)>() {
        transform.position += velocity.0 * dt;
    }
}
