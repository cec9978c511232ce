//! Simulation engine: the driver loop for the enemy population.
//!
//! `SimulationEngine` owns the hecs world, the enemy pool, the alert bus and
//! the trigger queue. It processes host commands, runs all systems, and
//! produces `SimSnapshot`s. Completely headless.

use std::collections::{HashSet, VecDeque};
use std::path::Path;

use glam::Vec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use picket_ai::alert::{Alert, AlertBus, AlertObserver};
use picket_core::commands::SimCommand;
use picket_core::config::{EnemySettings, PlayerSettings, PoolSettings, WorldSettings};
use picket_core::constants::DT;
use picket_core::enums::SimPhase;
use picket_core::error::ConfigError;
use picket_core::events::{SimEvent, TriggerEvent};
use picket_core::state::SimSnapshot;
use picket_core::types::{AgentId, SimTime, Transform, WaypointId};

use crate::agent::EnemyAgent;
use crate::pool::{random_spawn, EnemyPool, PoolObject};
use crate::systems;
use crate::systems::triggers::ZoneContacts;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Seconds per `tick()`.
    pub dt: f64,
    pub enemy: EnemySettings,
    pub pool: PoolSettings,
    pub world: WorldSettings,
    pub player: PlayerSettings,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            dt: DT,
            enemy: EnemySettings::default(),
            pool: PoolSettings::default(),
            world: WorldSettings::default(),
            player: PlayerSettings::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Replace non-positive settings with defaults.
    pub fn sanitized(self) -> Self {
        let dt = if self.dt > 0.0 {
            self.dt
        } else {
            log::debug!("dt not set ({}), defaulting to {DT}", self.dt);
            DT
        };
        Self {
            seed: self.seed,
            dt,
            enemy: self.enemy.sanitized(),
            pool: self.pool.sanitized(),
            world: self.world.sanitized(),
            player: self.player.sanitized(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    phase: SimPhase,
    rng: ChaCha8Rng,
    player: Entity,
    /// Waypoint entities, indexed by `WaypointId`.
    waypoints: Vec<Entity>,
    pool: EnemyPool<EnemyAgent>,
    bus: AlertBus,
    command_queue: VecDeque<SimCommand>,
    trigger_queue: VecDeque<TriggerEvent>,
    zone_contacts: ZoneContacts,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new simulation: player, waypoint zones, a full pool of
    /// active enemies, and every enemy subscribed to the alert bus.
    pub fn new(config: SimConfig) -> Self {
        let config = config.sanitized();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();

        let player = world_setup::spawn_player(&mut world, config.world.player_start);
        let waypoints = world_setup::spawn_waypoints(&mut world, &config.world);
        let waypoint_ids: Vec<WaypointId> =
            (0..waypoints.len()).map(|i| WaypointId(i as u32)).collect();

        let pool = world_setup::build_pool(&mut rng, &config.pool, &config.enemy, &waypoint_ids);

        let mut bus = AlertBus::new();
        let mut events = Vec::with_capacity(pool.capacity());
        for agent in pool.iter() {
            bus.subscribe(agent.id());
            events.push(SimEvent::EnemySpawned {
                agent: agent.id(),
                position: agent.position(),
            });
        }

        log::info!(
            "simulation ready: {} enemies, {} waypoints, seed {}",
            pool.capacity(),
            waypoints.len(),
            config.seed
        );

        Self {
            config,
            world,
            time: SimTime::default(),
            phase: SimPhase::default(),
            rng,
            player,
            waypoints,
            pool,
            bus,
            command_queue: VecDeque::new(),
            trigger_queue: VecDeque::new(),
            zone_contacts: HashSet::new(),
            despawn_buffer: Vec::new(),
            events,
        }
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Deliver a trigger event from an external collaborator. Consumed on
    /// the next running tick, after the built-in trigger detection.
    pub fn queue_trigger(&mut self, event: TriggerEvent) {
        self.trigger_queue.push_back(event);
    }

    /// Advance by the configured time step.
    pub fn tick(&mut self) -> SimSnapshot {
        self.step(self.config.dt)
    }

    /// Advance by `dt` seconds and return the resulting snapshot.
    pub fn step(&mut self, dt: f64) -> SimSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Running {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.pool,
            self.time,
            self.phase,
            self.player_position(),
            events,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn pool(&self) -> &EnemyPool<EnemyAgent> {
        &self.pool
    }

    pub fn bus(&self) -> &AlertBus {
        &self.bus
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player_position(&self) -> Vec3 {
        self.world
            .get::<&Transform>(self.player)
            .map(|transform| transform.position)
            .unwrap_or(self.config.world.player_start)
    }

    pub fn waypoint_position(&self, id: WaypointId) -> Option<Vec3> {
        world_setup::waypoint_position(&self.world, &self.waypoints, id)
    }

    /// Teleport an enemy (for tests that need exact placement).
    #[cfg(test)]
    pub fn place_enemy(&mut self, agent: AgentId, position: Vec3) {
        if let Some(enemy) = self.pool.get_mut(agent.index()) {
            enemy.set_position(position);
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single host command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::MovePlayer { position } => {
                if let Ok(mut transform) = self.world.get::<&mut Transform>(self.player) {
                    transform.position = position;
                }
            }
            SimCommand::PlayerFire { direction } => {
                let origin = self.player_position();
                systems::weapons::fire_player(
                    &mut self.world,
                    origin,
                    direction,
                    &self.config.player,
                    self.time.elapsed_secs,
                    &mut self.events,
                );
            }
            SimCommand::CreateEnemy => {
                self.create_enemy();
            }
            SimCommand::ReplenishPool => {
                for _ in 0..self.pool.capacity() {
                    self.create_enemy();
                }
            }
            SimCommand::ReleaseEnemy { agent } => match self.pool.get_mut(agent.index()) {
                Some(enemy) if enemy.in_use() => {
                    enemy.release();
                    self.zone_contacts.retain(|(id, _)| *id != agent);
                    log::info!("{agent} returned to the pool");
                    self.events.push(SimEvent::EnemyReleased { agent });
                }
                Some(_) => log::debug!("{agent} already released"),
                None => log::warn!("release ignored: {agent} is not in the pool"),
            },
            SimCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
        }
    }

    /// Activate the first free slot at a random spawn.
    fn create_enemy(&mut self) -> Option<AgentId> {
        let extent = self.config.pool.extent();
        let rng = &mut self.rng;
        let slot = self.pool.create(|| random_spawn(rng, extent))?;
        let enemy = self.pool.get(slot)?;
        let agent = enemy.id();
        self.zone_contacts.retain(|(id, _)| *id != agent);
        log::info!("{agent} spawned at {}", enemy.position());
        self.events.push(SimEvent::EnemySpawned {
            agent,
            position: enemy.position(),
        });
        Some(agent)
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;

        // 1. Trigger detection (zone entries, projectile hits)
        systems::triggers::run(
            &mut self.world,
            &self.pool,
            &mut self.zone_contacts,
            &mut self.trigger_queue,
            &mut self.despawn_buffer,
        );
        // 2. Trigger consumption (patrol advance, alert broadcast)
        self.process_triggers();
        // 3. Enemy AI
        let player_position = self.player_position();
        let shooters = systems::enemy_ai::run(
            &mut self.pool,
            &self.world,
            &self.waypoints,
            player_position,
            now,
            dt as f32,
            &mut self.events,
        );
        // 4. Enemy weapons
        systems::weapons::fire_enemy_shots(
            &mut self.world,
            &self.pool,
            &shooters,
            now,
            &mut self.events,
        );
        // 5. Projectile movement
        systems::movement::run(&mut self.world, dt);
        // 6. Cleanup (expired projectiles)
        systems::cleanup::run(&mut self.world, now + dt, &mut self.despawn_buffer);
    }

    /// Consume every queued trigger event.
    fn process_triggers(&mut self) {
        while let Some(event) = self.trigger_queue.pop_front() {
            match event {
                TriggerEvent::PatrolZoneEntered { agent, waypoint } => {
                    self.advance_patrol(agent, waypoint);
                }
                TriggerEvent::PlayerProjectileHit { agent } => {
                    self.raise_alert(agent);
                }
            }
        }
    }

    fn advance_patrol(&mut self, agent: AgentId, waypoint: WaypointId) {
        let Some(enemy) = self.pool.get_mut(agent.index()) else {
            log::warn!("zone event for unknown {agent}");
            return;
        };
        if !enemy.in_use() {
            return;
        }
        match enemy.reached_zone(waypoint) {
            Ok(target) => {
                log::debug!("{agent} reached {waypoint}, next {target}");
                self.events.push(SimEvent::PatrolAdvanced { agent, target });
            }
            Err(err) => log::warn!("{agent} entered {waypoint}: {err}"),
        }
    }

    /// The hit agent broadcasts to every subscriber, then alerts itself.
    fn raise_alert(&mut self, source: AgentId) {
        match self.pool.get(source.index()) {
            Some(enemy) if enemy.in_use() => {}
            _ => {
                log::warn!("hit on {source} ignored: not an active enemy");
                return;
            }
        }

        let alert = Alert {
            source,
            tick: self.time.tick,
        };
        let report = self.bus.publish(&mut self.pool, &alert);
        if let Some(enemy) = self.pool.get_mut(source.index()) {
            if let Err(err) = enemy.on_alert(&alert) {
                log::warn!("{source} could not alert itself: {err}");
            }
        }

        self.events.push(SimEvent::AlertRaised {
            source,
            delivered: report.delivered.len(),
            rejected: report.rejected.len(),
        });
    }
}
