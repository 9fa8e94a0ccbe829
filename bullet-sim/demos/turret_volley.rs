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
//! Turret volley example
//!
//! A turret at the origin fires a mixed volley at a line of advancing
//! enemies. Shows spawning, stepping, explosion falloff, and the effect
//! queue a presentation layer would drain each frame.

use std::error::Error;

use bullet_sim::bullet::{BulletKind, BulletParams, Faction};
use bullet_sim::fx::{FxKind, FxQueue};
use bullet_sim::render::{write_instances, BulletInstance, InstanceStyle};
use bullet_sim::targets::{Dummy, Target};
use bullet_sim::{BulletSimulation, SimulationConfig};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;

fn turret_params(kind: BulletKind) -> BulletParams {
    BulletParams {
        speed: 40.0,
        damage: 12.0,
        lifetime: 2.0,
        max_range: 60.0,
        size: 0.4,
        kind,
        color: match kind {
            BulletKind::Explosive => [1.0, 0.4, 0.1, 1.0],
            BulletKind::Piercing => [0.3, 0.8, 1.0, 1.0],
            _ => [1.0, 0.9, 0.3, 1.0],
        },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Bullet Sim - Turret Volley Example");
    println!("==================================\n");

    let config = SimulationConfig::new(64);
    let mut sim = BulletSimulation::new(config, FxQueue::new())?;
    println!("Pool capacity: {}", sim.capacity());

    let mut enemies: Vec<Dummy> = (0..5)
        .map(|i| Dummy::new(Vec3::new(-4.0 + 2.0 * i as f32, 0.0, 25.0), 0.8, 60.0))
        .collect();
    println!("Spawned {} enemies at z = 25", enemies.len());

    let volley = [
        BulletKind::Standard,
        BulletKind::Piercing,
        BulletKind::Explosive,
        BulletKind::Standard,
        BulletKind::Explosive,
    ];

    let mut frame = 0;
    let mut instances = vec![BulletInstance::hidden(); sim.capacity()];

    while frame < 180 {
        // Fire once every 15 frames, aimed at the enemy in the same column
        if frame % 15 == 0 {
            let kind = volley[(frame / 15) % volley.len()];
            let aim = enemies[(frame / 15) % enemies.len()].collision_center();
            sim.spawn(Vec3::ZERO, aim, &turret_params(kind), Faction::Friendly)?;
        }

        // Enemies walk toward the turret
        for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
            let position = enemy.position() - Vec3::Z * 2.0 * DT;
            enemy.set_position(position);
        }

        let (ticked, collided) = sim.step(DT, &mut enemies);
        if collided.hits > 0 || ticked.expired + ticked.out_of_range > 0 {
            println!(
                "  frame {:3}: {} hit(s), {} explosion(s), {} retired, {} live",
                frame,
                collided.hits,
                collided.explosions,
                ticked.expired + ticked.out_of_range,
                sim.live_count()
            );
        }

        let visible = write_instances(sim.pool(), &InstanceStyle::default(), &mut instances);
        debug_assert_eq!(visible, sim.live_count());

        for event in sim.fx_mut().drain() {
            if event.kind == FxKind::ExplosionFlash {
                println!(
                    "             explosion at ({:.1}, {:.1}, {:.1})",
                    event.position.x, event.position.y, event.position.z
                );
            }
        }

        frame += 1;
    }

    println!("\nEnemy health:");
    for (i, enemy) in enemies.iter().enumerate() {
        println!(
            "  enemy {}: {:5.1} / {:.0} ({} hits)",
            i,
            enemy.health(),
            enemy.max_health(),
            enemy.damage_events()
        );
    }

    let stats = sim.stats();
    println!("\nPool statistics:");
    println!("  spawned:      {}", stats.spawned);
    println!("  hits:         {}", stats.hits);
    println!("  explosions:   {}", stats.explosions);
    println!("  expired:      {}", stats.expired);
    println!("  out of range: {}", stats.out_of_range);
    println!("  peak live:    {}", sim.peak_count());

    #[cfg(feature = "parallel")]
    println!("\n[Integration pass running on Rayon]");

    #[cfg(not(feature = "parallel"))]
    println!("\n[Running in sequential mode]");

    Ok(())
}
