//! Fixed-capacity enemy pool.
//!
//! Slots are reused, never added or removed. Whether a slot is live is
//! asked of the pooled object itself; the pool keeps no activity bitmap.

use glam::{Quat, Vec3};
use rand::Rng;

use picket_ai::alert::{AlertObserver, ObserverDirectory};
use picket_core::constants::DEFAULT_SPAWN_EXTENT;
use picket_core::types::{AgentId, Transform};

/// The contract between the pool and what it pools.
pub trait PoolObject {
    /// Whether the object is currently live in the world.
    fn in_use(&self) -> bool;
    /// (Re)activate the object at `spawn`.
    fn init(&mut self, spawn: Transform);
}

#[derive(Debug, Clone)]
pub struct EnemyPool<T> {
    slots: Vec<T>,
}

impl<T: PoolObject> EnemyPool<T> {
    /// Wrap `slots`. Capacity is fixed from here on.
    pub fn new(slots: Vec<T>) -> Self {
        Self { slots }
    }

    /// Activate the first slot that is not in use, at the transform produced
    /// by `spawn`. First fit in slot order. `spawn` is only called when a
    /// free slot exists. Returns the slot index, or `None` when the pool is
    /// full (no slot is touched).
    pub fn create<F>(&mut self, spawn: F) -> Option<usize>
    where
        F: FnOnce() -> Transform,
    {
        let Some(index) = self.slots.iter().position(|slot| !slot.in_use()) else {
            log::debug!("enemy pool full ({} slots); create ignored", self.slots.len());
            return None;
        };
        self.slots[index].init(spawn());
        Some(index)
    }

    /// Call `create` once per slot. Returns the slots that were activated.
    pub fn create_all<F>(&mut self, mut spawn: F) -> Vec<usize>
    where
        F: FnMut() -> Transform,
    {
        (0..self.slots.len())
            .filter_map(|_| self.create(&mut spawn))
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.in_use()).count()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.slots.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.slots.iter_mut()
    }
}

/// Alerts resolve agent ids to pool slots.
impl<T: PoolObject + AlertObserver> ObserverDirectory for EnemyPool<T> {
    fn observer_mut(&mut self, id: AgentId) -> Option<&mut dyn AlertObserver> {
        self.slots.as_mut_slice().observer_mut(id)
    }
}

/// Random spawn on the ground plane: integer x and z in [-extent, extent),
/// y = 0, random yaw. A non-positive `extent` uses `DEFAULT_SPAWN_EXTENT`.
pub fn random_spawn<R: Rng + ?Sized>(rng: &mut R, extent: i32) -> Transform {
    let extent = if extent > 0 {
        extent
    } else {
        log::debug!("spawn extent {extent} is empty, defaulting to {DEFAULT_SPAWN_EXTENT}");
        DEFAULT_SPAWN_EXTENT
    };
    let x = rng.gen_range(-extent..extent) as f32;
    let z = rng.gen_range(-extent..extent) as f32;
    let yaw_degrees: f32 = rng.gen_range(0.0..360.0);
    Transform::new(
        Vec3::new(x, 0.0, z),
        Quat::from_rotation_y(yaw_degrees.to_radians()),
    )
}
