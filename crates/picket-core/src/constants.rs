//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Enemy defaults (substituted for non-positive settings) ---

/// Radius within which an unalerted enemy notices the player.
pub const DEFAULT_AGGRO_DISTANCE: f32 = 10.0;

/// Enemy movement speed (units/s).
pub const DEFAULT_ENEMY_SPEED: f32 = 10.0;

/// Seconds between enemy shots.
pub const DEFAULT_FIRE_RATE: f32 = 3.0;

/// Impulse applied to an enemy projectile.
pub const DEFAULT_PROJECTILE_FORCE: f32 = 30.0;

/// Radius of the enemy's own trigger volume.
pub const DEFAULT_ENEMY_TRIGGER_RADIUS: f32 = 1.0;

/// Aggro radius once an enemy has been alerted. Assigned, never accumulated.
pub const ESCALATED_AGGRO_DISTANCE: f32 = 20.0;

// --- Projectiles ---

/// Projectile lifetime before it is despawned (seconds).
pub const PROJECTILE_LIFETIME_SECS: f64 = 2.0;

/// Mass of a projectile body; force / mass gives launch speed.
pub const DEFAULT_PROJECTILE_MASS: f32 = 1.0;

/// Collision radius of a projectile.
pub const DEFAULT_PROJECTILE_RADIUS: f32 = 0.25;

/// Impulse applied to a player projectile.
pub const DEFAULT_PLAYER_PROJECTILE_FORCE: f32 = 40.0;

// --- Pool ---

/// Pool capacity used when the configured total is non-positive.
pub const DEFAULT_TOTAL_ENEMIES: usize = 5;

/// Spawn positions are drawn from [-extent, extent) on x and z.
pub const DEFAULT_SPAWN_EXTENT: i32 = 25;

// --- Patrol ---

/// Radius of the trigger zone around each waypoint.
pub const DEFAULT_PATROL_ZONE_RADIUS: f32 = 1.0;
