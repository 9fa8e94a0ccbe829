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
//! # Bullet Sim
//!
//! A fixed-capacity projectile simulation for games with many bullets in
//! flight: turrets firing at waves of enemies, bullet-hell patterns, and
//! similar workloads.
//!
//! ## Features
//!
//! - **Fixed Pool**: One contiguous array of plain-data records, allocated
//!   once, recycled through a FIFO free-list
//! - **Deterministic Steps**: Integration and expiry for every slot, then
//!   collision resolution in slot order
//! - **Hit Resolution**: Standard, piercing, and explosive bullets against
//!   host-supplied sphere targets
//! - **Injected Collaborators**: Target registries and effect sinks are
//!   traits passed in, not globals
//! - **Parallelization**: Optional Rayon integration for the integration pass
//!
//! ## Example
//!
//! ```rust
//! use bullet_sim::{BulletSimulation, SimulationConfig};
//! use bullet_sim::bullet::{BulletKind, BulletParams, Faction};
//! use bullet_sim::fx::NullFx;
//! use bullet_sim::targets::Dummy;
//! use glam::Vec3;
//!
//! let mut sim = BulletSimulation::new(SimulationConfig::new(256), NullFx).unwrap();
//! let params = BulletParams {
//!     speed: 200.0, damage: 10.0, lifetime: 2.0, max_range: 300.0,
//!     size: 0.5, kind: BulletKind::Piercing, color: [1.0, 0.9, 0.3, 1.0],
//! };
//! sim.spawn(Vec3::ZERO, Vec3::Z, &params, Faction::Friendly).unwrap();
//!
//! let mut enemies = vec![Dummy::new(Vec3::new(0.0, 0.0, 20.0), 1.0, 30.0)];
//! for _ in 0..10 {
//!     sim.step(1.0 / 60.0, &mut enemies);
//! }
//! assert_eq!(sim.live_count(), 1);
//! ```

#![warn(missing_docs)]

/// Projectile records, parameters, and handles
pub mod bullet;

/// Fixed-capacity slot storage
pub mod pool;

/// Sphere overlap and falloff helpers
pub mod collision;

/// Target registry contracts
pub mod targets;

/// Effect notifications
pub mod fx;

/// Simulation configuration
pub mod config;

/// The simulation engine
pub mod simulation;

/// Instance packing for renderers
pub mod render;

pub use config::SimulationConfig;
pub use simulation::{BulletSimulation, CollisionSummary, SpawnError, TickSummary};
