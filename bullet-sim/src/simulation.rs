// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! The bullet simulation engine
//!
//! One fixed step of the host runs two passes:
//!
//! 1. [`BulletSimulation::tick`] integrates every active bullet, then retires
//!    the ones whose lifetime or range ran out.
//! 2. [`BulletSimulation::resolve_collisions`] tests the survivors against a
//!    target registry and resolves at most one hit per bullet.
//!
//! The first pass finishes for all slots before the second begins, so a
//! bullet retired this step is never hit-tested this step.
//!
//! # Parallelism
//!
//! With the `parallel` feature the integration pass runs on the Rayon
//! thread pool. Each slot is advanced independently and retirements are
//! applied afterwards in index order, so results and free-list order match
//! the sequential build exactly. Collision resolution is always sequential.

use std::fmt;

use glam::Vec3;
use log::{debug, trace, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bullet::{Advance, Bullet, BulletHandle, BulletKind, BulletParams, Faction};
use crate::collision::{contact_point, explosion_falloff, spheres_overlap};
use crate::config::SimulationConfig;
use crate::fx::{FxKind, FxSink};
use crate::pool::{BulletPool, PoolStats};
use crate::targets::TargetRegistry;

/// Particles requested for an explosion flash
const EXPLOSION_FLASH_COUNT: u32 = 5;

/// Why a spawn request produced no bullet
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnError {
    /// Every slot is in use; the request was dropped
    PoolExhausted {
        /// Pool capacity at the time of the request
        capacity: usize,
    },
    /// The parameter bundle failed validation
    InvalidParams(String),
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::PoolExhausted { capacity } => {
                write!(f, "bullet pool exhausted ({} slots in use)", capacity)
            }
            SpawnError::InvalidParams(reason) => write!(f, "invalid bullet parameters: {}", reason),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Retirements performed by one integration pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Bullets whose lifetime ran out
    pub expired: usize,
    /// Bullets that reached their maximum range
    pub out_of_range: usize,
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionSummary {
    /// Direct hits resolved
    pub hits: usize,
    /// Bullets retired by a hit (explosions included)
    pub consumed: usize,
    /// Piercing bullets that hit and stayed active
    pub pierced: usize,
    /// Explosions triggered
    pub explosions: usize,
}

/// Fixed-capacity bullet simulation
///
/// Owns the bullet pool and an effect sink. Targets are supplied per
/// collision pass because the host mutates them between steps.
///
/// # Examples
///
/// ```
/// use bullet_sim::{BulletSimulation, SimulationConfig};
/// use bullet_sim::bullet::{BulletKind, BulletParams, Faction};
/// use bullet_sim::fx::FxQueue;
/// use bullet_sim::targets::Dummy;
/// use glam::Vec3;
///
/// let mut sim = BulletSimulation::new(SimulationConfig::new(16), FxQueue::new()).unwrap();
/// let params = BulletParams {
///     speed: 10.0, damage: 10.0, lifetime: 5.0, max_range: 100.0,
///     size: 1.0, kind: BulletKind::Standard, color: [1.0; 4],
/// };
/// sim.spawn(Vec3::ZERO, Vec3::X, &params, Faction::Friendly).unwrap();
///
/// let mut enemies = vec![Dummy::new(Vec3::new(2.0, 0.0, 0.0), 1.0, 50.0)];
/// let (_, hits) = sim.step(0.3, &mut enemies);
/// assert_eq!(hits.hits, 1);
/// assert_eq!(enemies[0].health(), 40.0);
/// assert_eq!(sim.live_count(), 0);
/// ```
pub struct BulletSimulation<F: FxSink> {
    pool: BulletPool,
    config: SimulationConfig,
    fx: F,
    outcomes: Vec<Advance>,
}

impl<F: FxSink> BulletSimulation<F> {
    /// Create a simulation with every slot free
    ///
    /// # Errors
    ///
    /// Returns the validation message if the configuration is unusable.
    pub fn new(config: SimulationConfig, fx: F) -> Result<Self, String> {
        config.validate()?;
        Ok(BulletSimulation {
            pool: BulletPool::with_capacity(config.capacity),
            outcomes: vec![Advance::Idle; config.capacity],
            config,
            fx,
        })
    }

    /// Fire a bullet
    ///
    /// Parameters are validated first; an invalid bundle leaves the pool
    /// untouched. When the pool is full the request is dropped (the newest
    /// request loses) and reported as [`SpawnError::PoolExhausted`].
    pub fn spawn(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        params: &BulletParams,
        faction: Faction,
    ) -> Result<BulletHandle, SpawnError> {
        if let Err(reason) = params.validate() {
            warn!("Rejected bullet spawn: {}", reason);
            return Err(SpawnError::InvalidParams(reason));
        }

        match self.pool.acquire(origin, direction, params, faction) {
            Some(handle) => Ok(handle),
            None => {
                self.pool.stats_mut().dropped += 1;
                let capacity = self.pool.capacity();
                if self.config.log_exhaustion {
                    warn!("Bullet pool exhausted ({} slots); spawn dropped", capacity);
                }
                Err(SpawnError::PoolExhausted { capacity })
            }
        }
    }

    /// Retire a bullet early
    ///
    /// Returns false for a stale handle.
    pub fn despawn(&mut self, handle: BulletHandle) -> bool {
        self.pool.contains(handle) && self.pool.release(handle.slot())
    }

    /// Advance every active bullet by `dt` seconds and retire the spent ones
    pub fn tick(&mut self, dt: f32) -> TickSummary {
        let bullets = self.pool.bullets_mut();
        let outcomes = &mut self.outcomes;

        #[cfg(feature = "parallel")]
        bullets
            .par_iter_mut()
            .zip(outcomes.par_iter_mut())
            .for_each(|(bullet, outcome)| *outcome = bullet.advance(dt));

        #[cfg(not(feature = "parallel"))]
        for (bullet, outcome) in bullets.iter_mut().zip(outcomes.iter_mut()) {
            *outcome = bullet.advance(dt);
        }

        let mut summary = TickSummary::default();
        for slot in 0..self.outcomes.len() {
            let outcome = self.outcomes[slot];
            if !outcome.retires() {
                continue;
            }
            self.pool.release(slot);
            if outcome == Advance::Expired {
                summary.expired += 1;
            } else {
                summary.out_of_range += 1;
            }
        }

        let stats = self.pool.stats_mut();
        stats.expired += summary.expired as u64;
        stats.out_of_range += summary.out_of_range as u64;
        summary
    }

    /// Test non-hostile bullets against living targets and resolve hits
    ///
    /// Bullets are visited in slot order, targets in registry order. The
    /// first overlapping target wins; a bullet resolves at most one hit per
    /// call.
    pub fn resolve_collisions<R>(&mut self, targets: &mut R) -> CollisionSummary
    where
        R: TargetRegistry + ?Sized,
    {
        let mut summary = CollisionSummary::default();

        for slot in 0..self.pool.capacity() {
            let bullet = self.pool.bullets()[slot];
            if !bullet.is_active() || !bullet.faction().targets_hostiles() {
                continue;
            }

            let Some(index) = first_overlap(&bullet, targets) else {
                continue;
            };
            let Some(target) = targets.target_mut(index) else {
                continue;
            };

            let center = target.collision_center();
            let radius = target.collision_radius();
            target.take_damage(bullet.damage());

            let point = contact_point(bullet.position(), bullet.radius(), center, radius);
            self.fx.emit(FxKind::HitFlash, point, -bullet.direction(), 1);
            self.pool.stats_mut().hits += 1;
            summary.hits += 1;

            match bullet.kind() {
                BulletKind::Piercing => {
                    debug!("Piercing bullet {} passed through target {}", slot, index);
                    summary.pierced += 1;
                }
                BulletKind::Explosive => {
                    debug!("Explosive bullet {} detonated at {}", slot, bullet.position());
                    self.explode(bullet.position(), bullet.damage(), targets);
                    self.pool.release(slot);
                    summary.explosions += 1;
                    summary.consumed += 1;
                }
                BulletKind::Standard | BulletKind::Homing | BulletKind::Laser => {
                    if bullet.kind().is_reserved() {
                        debug!(
                            "Bullet {} has reserved kind {:?}; consumed as standard",
                            slot,
                            bullet.kind()
                        );
                    }
                    self.pool.release(slot);
                    summary.consumed += 1;
                }
            }
        }

        summary
    }

    /// One fixed step: integration, then collision resolution
    pub fn step<R>(&mut self, dt: f32, targets: &mut R) -> (TickSummary, CollisionSummary)
    where
        R: TargetRegistry + ?Sized,
    {
        let ticked = self.tick(dt);
        let collided = self.resolve_collisions(targets);
        (ticked, collided)
    }

    /// Retire every bullet and restore the free-list to index order
    ///
    /// The peak count is kept; see [`BulletSimulation::reset_peak`].
    pub fn clear_all(&mut self) {
        debug!("Clearing {} active bullets", self.pool.live_count());
        self.pool.clear_all();
    }

    /// Reset the peak count to the current live count
    pub fn reset_peak(&mut self) {
        self.pool.reset_peak();
    }

    /// Number of active bullets
    pub fn live_count(&self) -> usize {
        self.pool.live_count()
    }

    /// Largest live count observed since creation or the last peak reset
    pub fn peak_count(&self) -> usize {
        self.pool.peak_count()
    }

    /// Number of bullet slots
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Number of free slots
    pub fn free_count(&self) -> usize {
        self.pool.free_count()
    }

    /// Look up a live bullet
    pub fn get(&self, handle: BulletHandle) -> Option<&Bullet> {
        self.pool.get(handle)
    }

    /// Active bullets with their slot index, in index order
    pub fn active(&self) -> impl Iterator<Item = (usize, &Bullet)> + '_ {
        self.pool.active()
    }

    /// Read-only view of the pool
    pub fn pool(&self) -> &BulletPool {
        &self.pool
    }

    /// Session counters
    pub fn stats(&self) -> &PoolStats {
        self.pool.stats()
    }

    /// Active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The effect sink
    pub fn fx(&self) -> &F {
        &self.fx
    }

    /// Mutable access to the effect sink, e.g. to drain queued events
    pub fn fx_mut(&mut self) -> &mut F {
        &mut self.fx
    }

    /// Area damage with linear falloff around `center`
    ///
    /// Every living target whose collision center lies within the explosion
    /// radius (inclusive) takes `damage * falloff`, the directly hit target
    /// included.
    fn explode<R>(&mut self, center: Vec3, damage: f32, targets: &mut R)
    where
        R: TargetRegistry + ?Sized,
    {
        let radius = self.config.explosion_radius;

        for index in 0..targets.target_count() {
            let Some(target) = targets.target_mut(index) else {
                continue;
            };
            if !target.is_alive() {
                continue;
            }

            let victim = target.collision_center();
            let distance = center.distance(victim);
            if distance > radius {
                continue;
            }

            let amount = damage * explosion_falloff(distance, radius);
            target.take_damage(amount);
            self.fx
                .emit(FxKind::HitFlash, victim, (victim - center).normalize_or_zero(), 1);
            trace!("Explosion dealt {} to target {} at distance {}", amount, index, distance);
        }

        self.fx
            .emit(FxKind::ExplosionFlash, center, Vec3::Y, EXPLOSION_FLASH_COUNT);
        self.pool.stats_mut().explosions += 1;
    }
}

/// Index of the first living target overlapping the bullet
fn first_overlap<R>(bullet: &Bullet, targets: &R) -> Option<usize>
where
    R: TargetRegistry + ?Sized,
{
    (0..targets.target_count()).find(|&index| {
        targets.target(index).is_some_and(|target| {
            target.is_alive()
                && spheres_overlap(
                    bullet.position(),
                    bullet.radius(),
                    target.collision_center(),
                    target.collision_radius(),
                )
        })
    })
}
