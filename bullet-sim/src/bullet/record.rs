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
//! The projectile record
//!
//! A `Bullet` is plain data stored inline in the pool's slot array. Fields
//! of an inactive record are stale and only `is_active` is meaningful.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::params::{BulletKind, BulletParams, Faction};

/// Result of advancing one record by a timestep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Still in flight
    Flying,
    /// Remaining lifetime reached zero
    Expired,
    /// Distance from origin reached `max_range`
    OutOfRange,
    /// The record was not active; nothing moved
    Idle,
}

impl Advance {
    /// Whether the slot must be returned to the free-list
    pub fn retires(&self) -> bool {
        matches!(self, Advance::Expired | Advance::OutOfRange)
    }
}

/// A single projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    position: Vec3,
    origin: Vec3,
    direction: Vec3,
    velocity: Vec3,
    speed: f32,
    damage: f32,
    remaining_lifetime: f32,
    max_lifetime: f32,
    max_range: f32,
    size: f32,
    color: [f32; 4],
    kind: BulletKind,
    faction: Faction,
    active: bool,
}

impl Bullet {
    /// An unused record
    pub fn inactive() -> Self {
        Bullet {
            position: Vec3::ZERO,
            origin: Vec3::ZERO,
            direction: Vec3::Z,
            velocity: Vec3::ZERO,
            speed: 0.0,
            damage: 0.0,
            remaining_lifetime: 0.0,
            max_lifetime: 0.0,
            max_range: 0.0,
            size: 0.0,
            color: [0.0; 4],
            kind: BulletKind::Standard,
            faction: Faction::Neutral,
            active: false,
        }
    }

    /// Overwrite this record with a freshly fired bullet
    ///
    /// The direction is normalized here; a zero direction leaves the
    /// bullet stationary.
    pub fn activate(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        params: &BulletParams,
        faction: Faction,
    ) {
        let direction = direction.normalize_or_zero();
        *self = Bullet {
            position: origin,
            origin,
            direction,
            velocity: direction * params.speed,
            speed: params.speed,
            damage: params.damage,
            remaining_lifetime: params.lifetime,
            max_lifetime: params.lifetime,
            max_range: params.max_range,
            size: params.size,
            color: params.color,
            kind: params.kind,
            faction,
            active: true,
        };
    }

    /// Integrate motion and check expiry for one timestep
    ///
    /// Lifetime is checked before range; an expired bullet is not range
    /// checked. The record stays active, the caller retires it.
    pub fn advance(&mut self, dt: f32) -> Advance {
        if !self.active {
            return Advance::Idle;
        }

        self.position += self.velocity * dt;

        self.remaining_lifetime -= dt;
        if self.remaining_lifetime <= 0.0 {
            return Advance::Expired;
        }

        if self.distance_traveled() >= self.max_range {
            return Advance::OutOfRange;
        }

        Advance::Flying
    }

    /// Mark the record unused
    ///
    /// Returns false if it already was.
    pub fn deactivate(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        was_active
    }

    /// Whether the record is live
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Spawn position
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit travel direction (zero for a stationary bullet)
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// `direction * speed`
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Speed in units per second
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Damage applied on a direct hit
    pub fn damage(&self) -> f32 {
        self.damage
    }

    /// Seconds left before expiry
    pub fn remaining_lifetime(&self) -> f32 {
        self.remaining_lifetime
    }

    /// Lifetime the bullet was fired with
    pub fn max_lifetime(&self) -> f32 {
        self.max_lifetime
    }

    /// Distance from origin at which the bullet is retired
    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Diameter of the collision sphere
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Collision radius, always `size / 2`
    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }

    /// RGBA display color
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Hit behavior
    pub fn kind(&self) -> BulletKind {
        self.kind
    }

    /// Owner faction
    pub fn faction(&self) -> Faction {
        self.faction
    }

    /// Euclidean distance from the spawn point
    pub fn distance_traveled(&self) -> f32 {
        self.origin.distance(self.position)
    }
}

impl Default for Bullet {
    fn default() -> Self {
        Bullet::inactive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(speed: f32, lifetime: f32, max_range: f32) -> BulletParams {
        BulletParams {
            speed,
            damage: 1.0,
            lifetime,
            max_range,
            size: 1.0,
            kind: BulletKind::Standard,
            color: [1.0; 4],
        }
    }

    fn fired(speed: f32, lifetime: f32, max_range: f32) -> Bullet {
        let mut bullet = Bullet::inactive();
        bullet.activate(
            Vec3::ZERO,
            Vec3::new(3.0, 0.0, 4.0),
            &params(speed, lifetime, max_range),
            Faction::Friendly,
        );
        bullet
    }

    #[test]
    fn test_activate_normalizes_direction() {
        let bullet = fired(10.0, 1.0, 100.0);
        assert!(bullet.is_active());
        assert!((bullet.direction().length() - 1.0).abs() < 1e-6);
        assert!((bullet.velocity() - Vec3::new(6.0, 0.0, 8.0)).length() < 1e-5);
        assert_eq!(bullet.remaining_lifetime(), 1.0);
        assert_eq!(bullet.max_lifetime(), 1.0);
    }

    #[test]
    fn test_zero_direction_is_stationary() {
        let mut bullet = Bullet::inactive();
        bullet.activate(Vec3::ONE, Vec3::ZERO, &params(10.0, 1.0, 100.0), Faction::Friendly);
        assert_eq!(bullet.advance(0.1), Advance::Flying);
        assert_eq!(bullet.position(), Vec3::ONE);
    }

    #[test]
    fn test_radius_is_half_size() {
        let bullet = fired(1.0, 1.0, 1.0);
        assert_eq!(bullet.radius(), 0.5);
    }

    #[test]
    fn test_advance_moves_and_ages() {
        let mut bullet = fired(10.0, 1.0, 100.0);
        assert_eq!(bullet.advance(0.1), Advance::Flying);
        assert!((bullet.distance_traveled() - 1.0).abs() < 1e-5);
        assert!((bullet.remaining_lifetime() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_lifetime_checked_before_range() {
        let mut bullet = fired(10.0, 0.5, 1.0);
        assert_eq!(bullet.advance(0.5), Advance::Expired);
    }

    #[test]
    fn test_range_reached() {
        let mut bullet = fired(10.0, 5.0, 0.5);
        assert_eq!(bullet.advance(0.1), Advance::OutOfRange);
        assert!(Advance::OutOfRange.retires());
    }

    #[test]
    fn test_inactive_does_not_move() {
        let mut bullet = Bullet::inactive();
        assert_eq!(bullet.advance(1.0), Advance::Idle);
        assert_eq!(bullet.position(), Vec3::ZERO);
    }

    #[test]
    fn test_deactivate_is_idempotent() {
        let mut bullet = fired(1.0, 1.0, 1.0);
        assert!(bullet.deactivate());
        assert!(!bullet.deactivate());
        assert!(!bullet.is_active());
    }
}
