//! Enemy AI system. Runs the FSM for every active agent each tick.
//!
//! Calls the enemy FSM from picket-ai to compute state, movement and fire
//! decisions, then applies them to the agents.

use glam::Vec3;
use hecs::{Entity, World};

use picket_ai::fsm::evaluate;
use picket_core::events::SimEvent;
use picket_core::types::AgentId;

use crate::agent::EnemyAgent;
use crate::pool::{EnemyPool, PoolObject};
use crate::world_setup::waypoint_position;

/// Evaluate and apply the FSM for each active agent, in slot order.
/// Returns the agents that decided to fire this tick.
pub fn run(
    pool: &mut EnemyPool<EnemyAgent>,
    world: &World,
    waypoints: &[Entity],
    player_position: Vec3,
    now_secs: f64,
    dt: f32,
    events: &mut Vec<SimEvent>,
) -> Vec<AgentId> {
    let mut shots = Vec::new();

    for agent in pool.iter_mut().filter(|agent| agent.in_use()) {
        let patrol_target = agent
            .patrol_target()
            .and_then(|id| waypoint_position(world, waypoints, id));

        let ctx = agent.context(player_position, patrol_target, now_secs, dt);
        let update = evaluate(&ctx);

        // Compare with the last reported state so alert-driven changes
        // (Patrol -> Chase inside `on_alert`) are reported too.
        let from = agent.reported_state();
        if update.new_state != from {
            log::debug!("{} {:?} -> {:?}", agent.id(), from, update.new_state);
            events.push(SimEvent::StateChanged {
                agent: agent.id(),
                from,
                to: update.new_state,
            });
        }

        agent.apply(&update);

        if update.fire {
            shots.push(agent.id());
        }
    }

    shots
}
