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
//! Hit-effect notifications
//!
//! The simulation reports impacts to an effect sink and never looks at the
//! outcome. Hosts typically forward these to a particle system; `FxQueue`
//! buffers them so a host can drain once per frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Visual effect categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FxKind {
    /// Area flash at an explosion center
    ExplosionFlash,
    /// Flash at a barrel when firing
    MuzzleFlash,
    /// Flash at a point of impact
    HitFlash,
    /// Lingering smoke
    Smoke,
    /// Short-lived sparks
    Spark,
}

/// One emitted effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FxEvent {
    /// Effect category
    pub kind: FxKind,
    /// World-space position
    pub position: Vec3,
    /// Emission direction
    pub direction: Vec3,
    /// Number of particles requested
    pub count: u32,
}

/// Fire-and-forget receiver of effect notifications
pub trait FxSink {
    /// Emit `count` particles of `kind`
    fn emit(&mut self, kind: FxKind, position: Vec3, direction: Vec3, count: u32);
}

impl<S: FxSink + ?Sized> FxSink for &mut S {
    fn emit(&mut self, kind: FxKind, position: Vec3, direction: Vec3, count: u32) {
        (**self).emit(kind, position, direction, count)
    }
}

impl<S: FxSink + ?Sized> FxSink for Box<S> {
    fn emit(&mut self, kind: FxKind, position: Vec3, direction: Vec3, count: u32) {
        (**self).emit(kind, position, direction, count)
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFx;

impl FxSink for NullFx {
    fn emit(&mut self, _kind: FxKind, _position: Vec3, _direction: Vec3, _count: u32) {}
}

/// Sink that records events in emission order
#[derive(Debug, Clone, Default)]
pub struct FxQueue {
    events: Vec<FxEvent>,
}

impl FxQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        FxQueue { events: Vec::new() }
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[FxEvent] {
        &self.events
    }

    /// Number of recorded events of the given kind
    pub fn count_of(&self, kind: FxKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Take all recorded events, leaving the queue empty
    pub fn drain(&mut self) -> Vec<FxEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FxSink for FxQueue {
    fn emit(&mut self, kind: FxKind, position: Vec3, direction: Vec3, count: u32) {
        self.events.push(FxEvent {
            kind,
            position,
            direction,
            count,
        });
    }
}
