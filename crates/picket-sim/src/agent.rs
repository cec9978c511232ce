//! Enemy agent: one pooled enemy with its own patrol route and FSM state.
//!
//! Stored in the `EnemyPool`, NOT as ECS entities. The agent is both an
//! alert observer (it joins the alert bus) and a pool object.

use glam::Vec3;

use picket_ai::alert::{Alert, AlertError, AlertObserver};
use picket_ai::fsm::{EnemyContext, EnemyUpdate};
use picket_core::config::{EnemySettings, WeaponSettings};
use picket_core::enums::EnemyState;
use picket_core::state::EnemyView;
use picket_core::types::{AgentId, Transform, WaypointId};
use picket_patrol::{PatrolRoute, RouteError};

use crate::pool::PoolObject;

#[derive(Debug, Clone)]
pub struct EnemyAgent {
    id: AgentId,
    transform: Transform,
    state: EnemyState,
    /// Last state published in a `StateChanged` event. Alerts change
    /// `state` outside the FSM, so this can lag behind it.
    reported_state: EnemyState,
    route: PatrolRoute<WaypointId>,
    /// Sanitized settings; the baseline restored on re-init.
    settings: EnemySettings,
    aggro_distance: f32,
    alerted: bool,
    shooting: bool,
    looking: bool,
    next_fire_secs: f64,
    active: bool,
}

impl EnemyAgent {
    /// Create an active agent at `spawn` that owns `route`.
    pub fn new(
        id: AgentId,
        settings: EnemySettings,
        route: PatrolRoute<WaypointId>,
        spawn: Transform,
    ) -> Self {
        let settings = settings.sanitized();
        if settings.weapon.is_none() {
            log::warn!("missing projectile prefab or spawn point on {id}; it will not fire");
        }
        if route.is_empty() {
            log::warn!("{id} has no patrol waypoints");
        }
        Self {
            id,
            transform: spawn,
            state: EnemyState::Patrol,
            reported_state: EnemyState::Patrol,
            route,
            aggro_distance: settings.aggro_distance,
            settings,
            alerted: false,
            shooting: false,
            looking: false,
            next_fire_secs: 0.0,
            active: true,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn reported_state(&self) -> EnemyState {
        self.reported_state
    }

    pub fn alerted(&self) -> bool {
        self.alerted
    }

    pub fn shooting(&self) -> bool {
        self.shooting
    }

    pub fn looking(&self) -> bool {
        self.looking
    }

    pub fn aggro_distance(&self) -> f32 {
        self.aggro_distance
    }

    pub fn next_fire_secs(&self) -> f64 {
        self.next_fire_secs
    }

    pub fn settings(&self) -> &EnemySettings {
        &self.settings
    }

    pub fn weapon(&self) -> Option<&WeaponSettings> {
        self.settings.weapon.as_ref()
    }

    pub fn route(&self) -> &PatrolRoute<WaypointId> {
        &self.route
    }

    pub fn patrol_target(&self) -> Option<WaypointId> {
        self.route.target().copied()
    }

    /// Place the agent directly (host-side teleport).
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// This agent entered the zone of `waypoint`.
    pub fn reached_zone(&mut self, waypoint: WaypointId) -> Result<WaypointId, RouteError> {
        self.route.reached(&waypoint).copied()
    }

    /// Take the agent out of the world. It keeps its slot and subscription.
    pub fn release(&mut self) {
        self.active = false;
    }

    /// Situation handed to the FSM.
    pub fn context(
        &self,
        player_position: Vec3,
        patrol_target: Option<Vec3>,
        now_secs: f64,
        dt: f32,
    ) -> EnemyContext {
        EnemyContext {
            state: self.state,
            position: self.transform.position,
            player_position,
            patrol_target,
            aggro_distance: self.aggro_distance,
            alerted: self.alerted,
            shooting: self.shooting,
            speed: self.settings.speed,
            dt,
            now_secs,
            next_fire_secs: self.next_fire_secs,
            fire_rate: self.settings.fire_rate,
        }
    }

    /// Apply an FSM result: turn first, then move.
    pub fn apply(&mut self, update: &EnemyUpdate) {
        if let Some(point) = update.facing {
            self.transform.look_at(point);
        }
        self.transform.position = update.position;
        self.state = update.new_state;
        self.reported_state = update.new_state;
        self.looking = update.looking;
        self.aggro_distance = update.aggro_distance;
        self.shooting = update.shooting;
        self.next_fire_secs = update.next_fire_secs;
    }

    pub fn view(&self) -> EnemyView {
        EnemyView {
            agent: self.id,
            in_use: self.active,
            state: self.state,
            position: self.transform.position,
            alerted: self.alerted,
            aggro_distance: self.aggro_distance,
            patrol_target: self.patrol_target(),
        }
    }
}

impl AlertObserver for EnemyAgent {
    fn on_alert(&mut self, alert: &Alert) -> Result<(), AlertError> {
        if !self.active {
            return Err(AlertError::Inactive(self.id));
        }
        if !self.alerted {
            log::debug!("{} alerted by {}", self.id, alert.source);
        }
        self.alerted = true;
        self.state = EnemyState::Chase;
        Ok(())
    }
}

impl PoolObject for EnemyAgent {
    fn in_use(&self) -> bool {
        self.active
    }

    /// Start a fresh lifetime at `spawn`.
    fn init(&mut self, spawn: Transform) {
        self.transform = spawn;
        self.state = EnemyState::Patrol;
        self.reported_state = EnemyState::Patrol;
        self.route.reset();
        self.aggro_distance = self.settings.aggro_distance;
        self.alerted = false;
        self.shooting = false;
        self.looking = false;
        self.next_fire_secs = 0.0;
        self.active = true;
    }
}
