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
//! Collision target contracts
//!
//! Targets are owned by the host (an enemy manager, a wave spawner). The
//! simulation only reads their collision sphere and liveness and calls
//! `take_damage`; it never adds or removes targets. A registry is queried
//! once per collision pass, in its own order, and that order decides which
//! target a bullet hits when several overlap.

use glam::Vec3;

/// Something bullets can hit
pub trait Target {
    /// World-space center of the collision sphere
    fn collision_center(&self) -> Vec3;

    /// Radius of the collision sphere
    fn collision_radius(&self) -> f32;

    /// Whether the target can still be hit
    fn is_alive(&self) -> bool;

    /// Apply damage; the target decides what that means
    fn take_damage(&mut self, amount: f32);
}

impl<T: Target + ?Sized> Target for Box<T> {
    fn collision_center(&self) -> Vec3 {
        (**self).collision_center()
    }

    fn collision_radius(&self) -> f32 {
        (**self).collision_radius()
    }

    fn is_alive(&self) -> bool {
        (**self).is_alive()
    }

    fn take_damage(&mut self, amount: f32) {
        (**self).take_damage(amount)
    }
}

/// Ordered, index-addressed set of targets
///
/// Indices are only stable for the duration of one collision pass.
pub trait TargetRegistry {
    /// Number of targets, alive or not
    fn target_count(&self) -> usize;

    /// Target at `index`
    fn target(&self, index: usize) -> Option<&dyn Target>;

    /// Mutable target at `index`
    fn target_mut(&mut self, index: usize) -> Option<&mut dyn Target>;
}

impl<T: Target> TargetRegistry for [T] {
    fn target_count(&self) -> usize {
        self.len()
    }

    fn target(&self, index: usize) -> Option<&dyn Target> {
        self.get(index).map(|t| t as &dyn Target)
    }

    fn target_mut(&mut self, index: usize) -> Option<&mut dyn Target> {
        self.get_mut(index).map(|t| t as &mut dyn Target)
    }
}

impl<T: Target> TargetRegistry for Vec<T> {
    fn target_count(&self) -> usize {
        self.as_slice().target_count()
    }

    fn target(&self, index: usize) -> Option<&dyn Target> {
        self.as_slice().target(index)
    }

    fn target_mut(&mut self, index: usize) -> Option<&mut dyn Target> {
        self.as_mut_slice().target_mut(index)
    }
}

/// A health-based target with a spherical collider
///
/// Alive while health is above zero. Damage to a dead dummy is ignored and
/// health never drops below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Dummy {
    position: Vec3,
    offset: Vec3,
    radius: f32,
    health: f32,
    max_health: f32,
    damage_events: u32,
}

impl Dummy {
    /// Create a dummy at `position` with the given collider radius and health
    pub fn new(position: Vec3, radius: f32, health: f32) -> Self {
        Dummy {
            position,
            offset: Vec3::ZERO,
            radius,
            health,
            max_health: health,
            damage_events: 0,
        }
    }

    /// Shift the collider relative to the position
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move the dummy
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Remaining health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Health at creation
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Total damage absorbed so far
    pub fn damage_taken(&self) -> f32 {
        self.max_health - self.health
    }

    /// Number of `take_damage` calls that landed while alive
    pub fn damage_events(&self) -> u32 {
        self.damage_events
    }
}

impl Target for Dummy {
    fn collision_center(&self) -> Vec3 {
        self.position + self.offset
    }

    fn collision_radius(&self) -> f32 {
        self.radius
    }

    fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    fn take_damage(&mut self, amount: f32) {
        if !self.is_alive() {
            return;
        }
        self.health = (self.health - amount).max(0.0);
        self.damage_events += 1;
    }
}
