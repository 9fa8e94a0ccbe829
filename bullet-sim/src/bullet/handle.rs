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
//! Bullet handles
//!
//! A handle names one slot of the pool at one point in its life. Slots are
//! recycled, so every handle also carries the slot generation it was issued
//! for; a handle whose generation no longer matches is stale.

use std::fmt;

/// Generational reference to a pooled bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BulletHandle {
    slot: u32,
    generation: u32,
}

impl BulletHandle {
    /// Create a handle for the given slot and generation
    pub fn new(slot: usize, generation: u32) -> Self {
        BulletHandle {
            slot: slot as u32,
            generation,
        }
    }

    /// Slot index in `[0, capacity)`
    pub fn slot(&self) -> usize {
        self.slot as usize
    }

    /// Generation of the slot when this handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for BulletHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bullet({}, gen: {})", self.slot, self.generation)
    }
}
