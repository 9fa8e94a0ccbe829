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
//! Pool lifecycle invariants
//!
//! Randomized operation sequences from fixed seeds, plus the lifetime and
//! range cutoffs.

use std::collections::HashSet;

use bullet_sim::bullet::{BulletHandle, BulletKind, BulletParams, Faction};
use bullet_sim::fx::NullFx;
use bullet_sim::targets::Dummy;
use bullet_sim::{BulletSimulation, SimulationConfig, SpawnError};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

const KINDS: [BulletKind; 5] = [
    BulletKind::Standard,
    BulletKind::Piercing,
    BulletKind::Explosive,
    BulletKind::Homing,
    BulletKind::Laser,
];

const FACTIONS: [Faction; 3] = [Faction::Friendly, Faction::Hostile, Faction::Neutral];

fn random_params(rng: &mut Pcg32) -> BulletParams {
    BulletParams {
        speed: rng.random_range(0.0..50.0),
        damage: rng.random_range(0.0..20.0),
        lifetime: rng.random_range(0.05..2.0),
        max_range: rng.random_range(0.0..40.0),
        size: rng.random_range(0.0..2.0),
        kind: KINDS[rng.random_range(0..KINDS.len())],
        color: [1.0; 4],
    }
}

fn random_vec(rng: &mut Pcg32, extent: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
    )
}

fn random_targets(rng: &mut Pcg32, count: usize) -> Vec<Dummy> {
    (0..count)
        .map(|_| Dummy::new(random_vec(rng, 10.0), rng.random_range(0.1..2.0), 50.0))
        .collect()
}

fn assert_slot_accounting(sim: &BulletSimulation<NullFx>) {
    let capacity = sim.capacity();
    let active: Vec<usize> = sim.active().map(|(slot, _)| slot).collect();
    let free: Vec<usize> = sim.pool().free_slots().collect();

    assert_eq!(sim.live_count() + sim.free_count(), capacity);
    assert_eq!(active.len(), sim.live_count());
    assert_eq!(free.len(), sim.free_count());

    let free_set: HashSet<usize> = free.iter().copied().collect();
    assert_eq!(free_set.len(), free.len(), "slot queued twice");
    for slot in &active {
        assert!(!free_set.contains(slot), "slot {} both active and free", slot);
    }
    for slot in 0..capacity {
        assert!(active.contains(&slot) || free_set.contains(&slot), "slot {} lost", slot);
    }
    assert!(sim.peak_count() >= sim.live_count());
}

fn run_random_sequence(seed: u64, capacity: usize, operations: usize) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let config = SimulationConfig::new(capacity).without_exhaustion_logging();
    let mut sim = BulletSimulation::new(config, NullFx).unwrap();
    let mut targets = random_targets(&mut rng, 8);
    let mut handles: Vec<BulletHandle> = Vec::new();

    for _ in 0..operations {
        let peak_before = sim.peak_count();

        match rng.random_range(0..100) {
            0..=44 => {
                let params = random_params(&mut rng);
                let faction = FACTIONS[rng.random_range(0..FACTIONS.len())];
                let was_full = sim.free_count() == 0;
                let origin = random_vec(&mut rng, 5.0);
                let direction = random_vec(&mut rng, 1.0);
                match sim.spawn(origin, direction, &params, faction) {
                    Ok(handle) => {
                        assert!(!was_full);
                        // No live handle may already own the slot just handed out
                        assert!(handles
                            .iter()
                            .all(|h| sim.get(*h).is_none() || h.slot() != handle.slot()));
                        handles.push(handle);
                    }
                    Err(SpawnError::PoolExhausted { .. }) => assert!(was_full),
                    Err(SpawnError::InvalidParams(reason)) => {
                        panic!("unexpected rejection: {}", reason)
                    }
                }
            }
            45..=74 => {
                sim.tick(rng.random_range(0.0..0.2));
            }
            75..=89 => {
                sim.resolve_collisions(&mut targets);
            }
            90..=96 => {
                if !handles.is_empty() {
                    let handle = handles[rng.random_range(0..handles.len())];
                    let live = sim.get(handle).is_some();
                    assert_eq!(sim.despawn(handle), live);
                }
            }
            _ => {
                sim.clear_all();
                assert_eq!(sim.live_count(), 0);
                let free: Vec<usize> = sim.pool().free_slots().collect();
                assert_eq!(free, (0..capacity).collect::<Vec<_>>());
                targets = random_targets(&mut rng, 8);
            }
        }

        assert!(sim.peak_count() >= peak_before, "peak must not decrease");
        assert_slot_accounting(&sim);
    }
}

#[test]
fn test_random_sequences_keep_slot_accounting() {
    for seed in 0..16 {
        run_random_sequence(seed, 16, 500);
    }
}

#[test]
fn test_random_sequences_under_pressure() {
    // Tiny pool so exhaustion happens constantly
    for seed in 100..108 {
        run_random_sequence(seed, 2, 300);
    }
}

#[test]
fn test_exhaustion_with_single_slot() {
    let mut sim = BulletSimulation::new(SimulationConfig::new(1), NullFx).unwrap();
    let params = BulletParams {
        speed: 1.0,
        damage: 1.0,
        lifetime: 1.0,
        max_range: 10.0,
        size: 1.0,
        kind: BulletKind::Standard,
        color: [1.0; 4],
    };

    let first = sim.spawn(Vec3::ZERO, Vec3::X, &params, Faction::Friendly).unwrap();
    let err = sim.spawn(Vec3::ONE, Vec3::Y, &params, Faction::Friendly).unwrap_err();
    assert!(matches!(err, SpawnError::PoolExhausted { capacity: 1 }));

    assert_eq!(sim.live_count(), 1);
    assert_eq!(sim.free_count(), 0);
    assert_eq!(sim.active().count(), 1);
    assert_eq!(sim.get(first).map(|b| b.origin()), Some(Vec3::ZERO));
}

#[test]
fn test_lifetime_decreases_until_expiry() {
    let mut sim = BulletSimulation::new(SimulationConfig::new(1), NullFx).unwrap();
    let params = BulletParams {
        speed: 1.0,
        damage: 1.0,
        lifetime: 1.0,
        max_range: 1000.0,
        size: 1.0,
        kind: BulletKind::Standard,
        color: [1.0; 4],
    };
    let handle = sim.spawn(Vec3::ZERO, Vec3::X, &params, Faction::Friendly).unwrap();

    let dt = 0.1;
    let mut elapsed = 0.0;
    let mut previous = params.lifetime;
    while let Some(bullet) = sim.get(handle) {
        assert!(bullet.remaining_lifetime() <= previous);
        previous = bullet.remaining_lifetime();
        sim.tick(dt);
        elapsed += dt;
        if let Some(bullet) = sim.get(handle) {
            assert!(bullet.remaining_lifetime() < previous, "lifetime must strictly decrease");
        }
        // One step of slack for float accumulation
        assert!(elapsed <= params.lifetime + dt * 1.5, "bullet outlived its lifetime");
    }
    assert_eq!(sim.stats().expired, 1);
    assert_eq!(sim.stats().out_of_range, 0);
}

#[test]
fn test_range_cutoff_before_lifetime() {
    let mut sim = BulletSimulation::new(SimulationConfig::new(1), NullFx).unwrap();
    let params = BulletParams {
        speed: 10.0,
        damage: 1.0,
        lifetime: 100.0,
        max_range: 5.0,
        size: 1.0,
        kind: BulletKind::Standard,
        color: [1.0; 4],
    };
    let handle = sim
        .spawn(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), &params, Faction::Friendly)
        .unwrap();

    let mut last_distance = 0.0;
    let mut ticks = 0;
    while let Some(bullet) = sim.get(handle) {
        assert!(bullet.distance_traveled() < params.max_range);
        last_distance = bullet.distance_traveled();
        sim.tick(0.1);
        ticks += 1;
        assert!(ticks < 100, "range cutoff never triggered");
    }

    // Retired on the step that carried it to (or past) max range
    assert!(last_distance + 1.0 + 1e-3 >= params.max_range);
    assert_eq!(sim.stats().out_of_range, 1);
    assert_eq!(sim.stats().expired, 0);
}
