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
//! Bullet kinds, owner factions, and the spawn parameter bundle
//!
//! Parameter bundles are authored outside the engine (weapon data, turret
//! presets) and are deserializable so they can live in data files. The
//! engine supplies no defaults for them.

use serde::{Deserialize, Serialize};

/// Behavioral category deciding what happens after a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulletKind {
    /// Consumed on the first hit
    Standard,
    /// Survives hits and keeps flying
    Piercing,
    /// Deals falloff area damage around the impact, then is consumed
    Explosive,
    /// Reserved; resolves like `Standard`
    Homing,
    /// Reserved; resolves like `Standard`
    Laser,
}

impl BulletKind {
    /// Whether the kind has no hit behavior of its own yet
    pub fn is_reserved(&self) -> bool {
        matches!(self, BulletKind::Homing | BulletKind::Laser)
    }
}

/// Owner of a bullet, used to pick collision targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Player-owned
    Friendly,
    /// Enemy-owned; never tested against the target registry
    Hostile,
    /// Unowned; collides like `Friendly`
    Neutral,
}

impl Faction {
    /// Whether bullets of this faction are tested against hostile targets
    pub fn targets_hostiles(&self) -> bool {
        !matches!(self, Faction::Hostile)
    }
}

/// Parameters for a single spawned bullet
///
/// # Examples
///
/// ```
/// use bullet_sim::bullet::{BulletKind, BulletParams};
///
/// let params = BulletParams {
///     speed: 200.0,
///     damage: 10.0,
///     lifetime: 2.0,
///     max_range: 300.0,
///     size: 0.5,
///     kind: BulletKind::Standard,
///     color: [1.0, 0.8, 0.2, 1.0],
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletParams {
    /// Units per second along the spawn direction
    pub speed: f32,
    /// Damage applied on a direct hit
    pub damage: f32,
    /// Seconds until the bullet expires
    pub lifetime: f32,
    /// Distance from the spawn point at which the bullet is retired
    pub max_range: f32,
    /// Diameter of the collision sphere
    pub size: f32,
    /// Hit behavior
    pub kind: BulletKind,
    /// RGBA display color, opaque to the simulation
    pub color: [f32; 4],
}

impl BulletParams {
    /// Check that the bundle describes a physical bullet
    ///
    /// Rejects non-finite values, negative speed, damage, size or range,
    /// and a lifetime that would expire before the first tick.
    pub fn validate(&self) -> Result<(), String> {
        let scalars = [
            ("speed", self.speed),
            ("damage", self.damage),
            ("lifetime", self.lifetime),
            ("max_range", self.max_range),
            ("size", self.size),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", name, value));
            }
        }

        if self.speed < 0.0 {
            return Err(format!("speed must not be negative, got {}", self.speed));
        }
        if self.damage < 0.0 {
            return Err(format!("damage must not be negative, got {}", self.damage));
        }
        if self.max_range < 0.0 {
            return Err(format!("max_range must not be negative, got {}", self.max_range));
        }
        if self.size < 0.0 {
            return Err(format!("size must not be negative, got {}", self.size));
        }
        if self.lifetime <= 0.0 {
            return Err(format!("lifetime must be positive, got {}", self.lifetime));
        }

        Ok(())
    }
}
