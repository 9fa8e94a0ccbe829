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
//! Instance data for drawing bullets
//!
//! Packs the pool into one fixed-size instance per slot, ready for an
//! instanced draw. Slots flip between active and inactive from one step to
//! the next, so inactive slots are written as invisible instances instead
//! of being skipped. Uploading the buffer is the renderer's job.

use bytemuck::{Pod, Zeroable};

use crate::bullet::Bullet;
use crate::pool::BulletPool;

/// Per-instance GPU data for one bullet streak
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BulletInstance {
    /// World-space position
    pub position: [f32; 3],
    /// Streak length along `direction`
    pub length: f32,
    /// Unit travel direction
    pub direction: [f32; 3],
    /// Streak width
    pub width: f32,
    /// RGBA color
    pub color: [f32; 4],
}

impl BulletInstance {
    /// An instance that draws nothing
    pub fn hidden() -> Self {
        BulletInstance::zeroed()
    }

    /// Whether the instance produces any pixels
    pub fn is_visible(&self) -> bool {
        self.length > 0.0 && self.width > 0.0
    }
}

/// Mapping from bullet state to streak shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceStyle {
    /// Speed at which a streak has `reference_length`
    pub reference_speed: f32,
    /// Streak length at `reference_speed`; scales linearly with speed
    pub reference_length: f32,
    /// Streak width for every bullet
    pub width: f32,
}

impl Default for InstanceStyle {
    fn default() -> Self {
        InstanceStyle {
            reference_speed: 200.0,
            reference_length: 8.0,
            width: 0.33,
        }
    }
}

impl InstanceStyle {
    /// Instance for one record; inactive records are hidden
    ///
    /// Active records are never shorter than the streak width, so a
    /// stationary bullet still draws as a dot.
    pub fn instance(&self, bullet: &Bullet) -> BulletInstance {
        if !bullet.is_active() {
            return BulletInstance::hidden();
        }
        let length = if self.reference_speed > 0.0 {
            bullet.speed() / self.reference_speed * self.reference_length
        } else {
            0.0
        };
        let length = length.max(self.width);
        BulletInstance {
            position: bullet.position().to_array(),
            length,
            direction: bullet.direction().to_array(),
            width: self.width,
            color: bullet.color(),
        }
    }
}

/// Fill `out` with one instance per pool slot, in slot order
///
/// Slots beyond `out.len()` are not written; entries of `out` beyond the
/// pool capacity are hidden. Returns the number of visible instances.
pub fn write_instances(
    pool: &BulletPool,
    style: &InstanceStyle,
    out: &mut [BulletInstance],
) -> usize {
    let mut visible = 0;
    let mut slots = pool.bullets().iter();
    for instance in out.iter_mut() {
        *instance = match slots.next() {
            Some(bullet) => style.instance(bullet),
            None => BulletInstance::hidden(),
        };
        if instance.is_visible() {
            visible += 1;
        }
    }
    visible
}

/// View an instance buffer as raw bytes for upload
pub fn as_bytes(instances: &[BulletInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
