//! Tunable settings for enemies, the pool, the world, and the player.
//!
//! Every struct deserialises with `#[serde(default)]`, so a config file only
//! needs the fields it overrides. Non-positive numeric values are not
//! errors: `sanitized()` swaps them for the fixed defaults and logs it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Per-enemy behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemySettings {
    /// Radius within which the player is noticed/engaged.
    pub aggro_distance: f32,
    /// Movement speed (units/s).
    pub speed: f32,
    /// Seconds between shots while attacking.
    pub fire_rate: f32,
    /// Impulse applied to each projectile.
    pub projectile_force: f32,
    /// Radius of the enemy's own trigger volume.
    pub trigger_radius: f32,
    /// Projectile prefab and spawn point. `None` disables firing.
    pub weapon: Option<WeaponSettings>,
}

/// Projectile prefab and the spawn point it leaves from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponSettings {
    /// Spawn point in the enemy's local space.
    pub spawn_offset: Vec3,
    pub projectile_mass: f32,
    pub projectile_radius: f32,
}

/// Enemy pool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    /// Pool capacity. Non-positive means the default of 5.
    pub total_enemies: i64,
    /// Spawns are drawn from [-extent, extent) on x and z.
    pub spawn_extent: i32,
}

/// Static world layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Patrol waypoint positions. Ids are assigned in list order.
    pub waypoints: Vec<Vec3>,
    pub patrol_zone_radius: f32,
    pub player_start: Vec3,
}

/// Player weapon settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub projectile_force: f32,
    pub projectile_mass: f32,
    pub projectile_radius: f32,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self {
            aggro_distance: DEFAULT_AGGRO_DISTANCE,
            speed: DEFAULT_ENEMY_SPEED,
            fire_rate: DEFAULT_FIRE_RATE,
            projectile_force: DEFAULT_PROJECTILE_FORCE,
            trigger_radius: DEFAULT_ENEMY_TRIGGER_RADIUS,
            weapon: Some(WeaponSettings::default()),
        }
    }
}

impl Default for WeaponSettings {
    fn default() -> Self {
        Self {
            spawn_offset: Vec3::new(0.0, 1.0, 1.0),
            projectile_mass: DEFAULT_PROJECTILE_MASS,
            projectile_radius: DEFAULT_PROJECTILE_RADIUS,
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            total_enemies: DEFAULT_TOTAL_ENEMIES as i64,
            spawn_extent: DEFAULT_SPAWN_EXTENT,
        }
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            waypoints: vec![
                Vec3::new(-15.0, 0.0, -15.0),
                Vec3::new(15.0, 0.0, -15.0),
                Vec3::new(15.0, 0.0, 15.0),
                Vec3::new(-15.0, 0.0, 15.0),
            ],
            patrol_zone_radius: DEFAULT_PATROL_ZONE_RADIUS,
            player_start: Vec3::new(0.0, 0.0, 40.0),
        }
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            projectile_force: DEFAULT_PLAYER_PROJECTILE_FORCE,
            projectile_mass: DEFAULT_PROJECTILE_MASS,
            projectile_radius: DEFAULT_PROJECTILE_RADIUS,
        }
    }
}

impl EnemySettings {
    /// Replace non-positive values with defaults.
    pub fn sanitized(self) -> Self {
        Self {
            aggro_distance: positive_or(
                "enemy aggro_distance",
                self.aggro_distance,
                DEFAULT_AGGRO_DISTANCE,
            ),
            speed: positive_or("enemy speed", self.speed, DEFAULT_ENEMY_SPEED),
            fire_rate: positive_or("enemy fire_rate", self.fire_rate, DEFAULT_FIRE_RATE),
            projectile_force: positive_or(
                "enemy projectile_force",
                self.projectile_force,
                DEFAULT_PROJECTILE_FORCE,
            ),
            trigger_radius: positive_or(
                "enemy trigger_radius",
                self.trigger_radius,
                DEFAULT_ENEMY_TRIGGER_RADIUS,
            ),
            weapon: self.weapon.map(WeaponSettings::sanitized),
        }
    }
}

impl WeaponSettings {
    pub fn sanitized(self) -> Self {
        Self {
            spawn_offset: self.spawn_offset,
            projectile_mass: positive_or(
                "weapon projectile_mass",
                self.projectile_mass,
                DEFAULT_PROJECTILE_MASS,
            ),
            projectile_radius: positive_or(
                "weapon projectile_radius",
                self.projectile_radius,
                DEFAULT_PROJECTILE_RADIUS,
            ),
        }
    }
}

impl PoolSettings {
    pub fn sanitized(self) -> Self {
        let total_enemies = if self.total_enemies <= 0 {
            log::debug!(
                "pool total_enemies not set ({}), defaulting to {}",
                self.total_enemies,
                DEFAULT_TOTAL_ENEMIES
            );
            DEFAULT_TOTAL_ENEMIES as i64
        } else {
            self.total_enemies
        };
        let spawn_extent = if self.spawn_extent <= 0 {
            log::debug!(
                "pool spawn_extent not set ({}), defaulting to {}",
                self.spawn_extent,
                DEFAULT_SPAWN_EXTENT
            );
            DEFAULT_SPAWN_EXTENT
        } else {
            self.spawn_extent
        };
        Self {
            total_enemies,
            spawn_extent,
        }
    }

    /// Pool capacity, with the default applied for non-positive values.
    pub fn capacity(&self) -> usize {
        usize::try_from(self.total_enemies)
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_TOTAL_ENEMIES)
    }

    /// Spawn half-width, with the default applied for non-positive values.
    pub fn extent(&self) -> i32 {
        if self.spawn_extent > 0 {
            self.spawn_extent
        } else {
            DEFAULT_SPAWN_EXTENT
        }
    }
}

impl WorldSettings {
    pub fn sanitized(self) -> Self {
        Self {
            patrol_zone_radius: positive_or(
                "world patrol_zone_radius",
                self.patrol_zone_radius,
                DEFAULT_PATROL_ZONE_RADIUS,
            ),
            ..self
        }
    }
}

impl PlayerSettings {
    pub fn sanitized(self) -> Self {
        Self {
            projectile_force: positive_or(
                "player projectile_force",
                self.projectile_force,
                DEFAULT_PLAYER_PROJECTILE_FORCE,
            ),
            projectile_mass: positive_or(
                "player projectile_mass",
                self.projectile_mass,
                DEFAULT_PROJECTILE_MASS,
            ),
            projectile_radius: positive_or(
                "player projectile_radius",
                self.projectile_radius,
                DEFAULT_PROJECTILE_RADIUS,
            ),
        }
    }
}

/// `value` if strictly positive, otherwise `default`. NaN counts as unset.
fn positive_or(name: &str, value: f32, default: f32) -> f32 {
    if value > 0.0 {
        value
    } else {
        log::debug!("{name} not set ({value}), defaulting to {default}");
        default
    }
}
