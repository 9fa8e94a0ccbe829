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
//! Fixed-capacity bullet storage
//!
//! The pool owns one contiguous array of projectile records, allocated once,
//! and a FIFO queue of free slot indices. Every slot index is at all times
//! either active or queued as free, never both. The pool never grows; when
//! the free queue is empty, acquisition fails and the caller decides what to
//! do about it.

use std::collections::VecDeque;

use glam::Vec3;

use crate::bullet::{Bullet, BulletHandle, BulletParams, Faction};

/// Session counters for monitoring pool pressure and outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Bullets successfully spawned
    pub spawned: u64,
    /// Spawn requests dropped because the pool was full
    pub dropped: u64,
    /// Bullets retired by lifetime
    pub expired: u64,
    /// Bullets retired by range
    pub out_of_range: u64,
    /// Direct hits resolved
    pub hits: u64,
    /// Explosions triggered
    pub explosions: u64,
    /// Peak number of simultaneously active bullets
    pub peak: usize,
}

impl PoolStats {
    /// Fraction of spawn requests that were dropped, as a percentage
    pub fn drop_rate(&self) -> f64 {
        let total = self.spawned + self.dropped;
        if total == 0 {
            0.0
        } else {
            (self.dropped as f64 / total as f64) * 100.0
        }
    }
}

/// A fixed array of bullet slots with a FIFO free-list
///
/// # Examples
///
/// ```
/// use bullet_sim::pool::BulletPool;
/// use bullet_sim::bullet::{BulletKind, BulletParams, Faction};
/// use glam::Vec3;
///
/// let mut pool = BulletPool::with_capacity(2);
/// let params = BulletParams {
///     speed: 10.0, damage: 1.0, lifetime: 1.0, max_range: 10.0,
///     size: 0.5, kind: BulletKind::Standard, color: [1.0; 4],
/// };
/// let handle = pool.acquire(Vec3::ZERO, Vec3::X, &params, Faction::Friendly).unwrap();
/// assert_eq!(pool.live_count(), 1);
/// assert!(pool.release(handle.slot()));
/// assert_eq!(pool.free_count(), 2);
/// ```
pub struct BulletPool {
    bullets: Box<[Bullet]>,
    generations: Box<[u32]>,
    free: VecDeque<usize>,
    live: usize,
    stats: PoolStats,
}

impl BulletPool {
    /// Allocate a pool with every slot free, in index order
    pub fn with_capacity(capacity: usize) -> Self {
        BulletPool {
            bullets: vec![Bullet::inactive(); capacity].into_boxed_slice(),
            generations: vec![0; capacity].into_boxed_slice(),
            free: (0..capacity).collect(),
            live: 0,
            stats: PoolStats::default(),
        }
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.bullets.len()
    }

    /// Number of active bullets
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Largest live count observed
    pub fn peak_count(&self) -> usize {
        self.stats.peak
    }

    /// Number of queued free slots
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Whether the next acquisition would fail
    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    /// Claim the oldest free slot and initialize it
    ///
    /// Returns `None` when no slot is free; the pool is left untouched.
    pub fn acquire(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        params: &BulletParams,
        faction: Faction,
    ) -> Option<BulletHandle> {
        let slot = self.free.pop_front()?;
        self.bullets[slot].activate(origin, direction, params, faction);

        self.live += 1;
        self.stats.spawned += 1;
        if self.live > self.stats.peak {
            self.stats.peak = self.live;
        }

        Some(BulletHandle::new(slot, self.generations[slot]))
    }

    /// Return a slot to the free-list
    ///
    /// Releasing an out-of-range or already inactive slot is a no-op and
    /// returns false.
    pub fn release(&mut self, slot: usize) -> bool {
        match self.bullets.get_mut(slot).map(Bullet::deactivate) {
            Some(true) => {
                self.generations[slot] = self.generations[slot].wrapping_add(1);
                self.free.push_back(slot);
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    /// Release every slot and rebuild the free-list in index order
    ///
    /// The peak count is a session statistic and survives this call.
    pub fn clear_all(&mut self) {
        for slot in 0..self.bullets.len() {
            self.release(slot);
        }
        self.free.clear();
        self.free.extend(0..self.bullets.len());
        self.live = 0;
    }

    /// Reset the peak to the current live count
    pub fn reset_peak(&mut self) {
        self.stats.peak = self.live;
    }

    /// Look up a live bullet by handle
    ///
    /// Returns `None` if the slot has been released since the handle was
    /// issued.
    pub fn get(&self, handle: BulletHandle) -> Option<&Bullet> {
        let slot = handle.slot();
        if self.generations.get(slot).copied() != Some(handle.generation()) {
            return None;
        }
        self.bullets.get(slot).filter(|b| b.is_active())
    }

    /// Whether the handle still refers to a live bullet
    pub fn contains(&self, handle: BulletHandle) -> bool {
        self.get(handle).is_some()
    }

    /// The raw slot array, including inactive records
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Active bullets with their slot index, in index order
    pub fn active(&self) -> impl Iterator<Item = (usize, &Bullet)> + '_ {
        self.bullets
            .iter()
            .enumerate()
            .filter(|(_, bullet)| bullet.is_active())
    }

    /// Free slot indices in the order they will be handed out
    pub fn free_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.free.iter().copied()
    }

    /// Session counters
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    pub(crate) fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }

    pub(crate) fn stats_mut(&mut self) -> &mut PoolStats {
        &mut self.stats
    }
}
