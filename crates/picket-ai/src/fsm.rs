//! Enemy behaviour finite state machine.
//!
//! Pure function that computes the next state, movement, and fire decision
//! for one enemy from its situation. No ECS dependency: operates on plain
//! data.
//!
//! Rules, in priority order:
//! 1. Not alerted and has a patrol target: face it, state `Patrol`.
//! 2. Player within aggro distance: face the player.
//! 3. Alerted: `Chase` if the player is beyond aggro distance, `Attack`
//!    otherwise, and escalate.
//!
//! Escalation assigns the fixed escalated aggro distance and arms the
//! weapon. Nothing in here clears `alerted`, so an alerted enemy never
//! returns to `Patrol`.

use glam::Vec3;

use picket_core::constants::ESCALATED_AGGRO_DISTANCE;
use picket_core::enums::EnemyState;
use picket_core::types::move_towards;

/// Input to the enemy FSM for a single agent.
#[derive(Debug, Clone)]
pub struct EnemyContext {
    pub state: EnemyState,
    pub position: Vec3,
    pub player_position: Vec3,
    /// Position of the current patrol waypoint, if the route has one.
    pub patrol_target: Option<Vec3>,
    pub aggro_distance: f32,
    pub alerted: bool,
    /// Weapon armed by a previous escalation.
    pub shooting: bool,
    pub speed: f32,
    pub dt: f32,
    pub now_secs: f64,
    /// Earliest time the next shot may be fired.
    pub next_fire_secs: f64,
    pub fire_rate: f32,
}

/// Output from the enemy FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyUpdate {
    pub new_state: EnemyState,
    pub state_changed: bool,
    /// Position after this tick's movement.
    pub position: Vec3,
    /// Point to orient toward before acting, if any.
    pub facing: Option<Vec3>,
    /// Whether the enemy is focused on the player.
    pub looking: bool,
    pub aggro_distance: f32,
    pub shooting: bool,
    /// Launch a projectile along the enemy's forward direction.
    pub fire: bool,
    pub next_fire_secs: f64,
}

/// Evaluate the FSM for one enemy.
pub fn evaluate(ctx: &EnemyContext) -> EnemyUpdate {
    let mut update = EnemyUpdate {
        new_state: ctx.state,
        state_changed: false,
        position: ctx.position,
        facing: None,
        looking: false,
        aggro_distance: ctx.aggro_distance,
        shooting: ctx.shooting,
        fire: false,
        next_fire_secs: ctx.next_fire_secs,
    };

    if !ctx.alerted {
        if let Some(target) = ctx.patrol_target {
            update.facing = Some(target);
            update.new_state = EnemyState::Patrol;
        }
    }

    let distance = ctx.position.distance(ctx.player_position);

    if distance <= update.aggro_distance {
        update.facing = Some(ctx.player_position);
        update.looking = true;
    }

    if ctx.alerted {
        update.new_state = if distance > update.aggro_distance {
            EnemyState::Chase
        } else {
            EnemyState::Attack
        };
        escalate(ctx, &mut update);
    }

    act(ctx, &mut update);
    update.state_changed = update.new_state != ctx.state;
    update
}

/// Focus the player, arm the weapon, widen aggro to the fixed value.
fn escalate(ctx: &EnemyContext, update: &mut EnemyUpdate) {
    update.facing = Some(ctx.player_position);
    update.looking = true;
    update.shooting = true;
    update.aggro_distance = ESCALATED_AGGRO_DISTANCE;
}

fn act(ctx: &EnemyContext, update: &mut EnemyUpdate) {
    let step = ctx.speed * ctx.dt;
    match update.new_state {
        EnemyState::Patrol => {
            if let Some(target) = ctx.patrol_target {
                update.position = move_towards(ctx.position, target, step);
            }
        }
        EnemyState::Chase => {
            update.position = move_towards(ctx.position, ctx.player_position, step);
        }
        EnemyState::Attack => {
            if update.shooting && ctx.now_secs >= ctx.next_fire_secs {
                update.fire = true;
                update.next_fire_secs = ctx.now_secs + f64::from(ctx.fire_rate);
            }
        }
    }
}
