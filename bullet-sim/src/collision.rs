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
//! Sphere collision helpers
//!
//! All comparisons use true Euclidean distance in single precision.

use glam::Vec3;

/// Whether two spheres overlap
///
/// Touching spheres (distance exactly `r1 + r2`) do not overlap.
///
/// # Examples
///
/// ```
/// use bullet_sim::collision::spheres_overlap;
/// use glam::Vec3;
///
/// assert!(!spheres_overlap(Vec3::ZERO, 0.5, Vec3::new(1.5, 0.0, 0.0), 1.0));
/// assert!(spheres_overlap(Vec3::ZERO, 0.5, Vec3::new(1.4, 0.0, 0.0), 1.0));
/// ```
pub fn spheres_overlap(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32) -> bool {
    center_a.distance(center_b) < radius_a + radius_b
}

/// Point between two sphere centers where their surfaces meet
///
/// The point lies on the segment from `a` to `b`, offset from `a` by
/// `radius_a / (radius_a + radius_b)` of the center distance. With both
/// radii zero the centers coincide for any overlap, so `a` is returned.
pub fn contact_point(center_a: Vec3, radius_a: f32, center_b: Vec3, radius_b: f32) -> Vec3 {
    let radius_sum = radius_a + radius_b;
    if radius_sum <= 0.0 {
        return center_a;
    }
    center_a + (center_b - center_a) / radius_sum * radius_a
}

/// Linear damage falloff for an explosion
///
/// `1 - distance / radius`, clamped to `[0, 1]`. A non-positive radius
/// yields zero.
pub fn explosion_falloff(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).clamp(0.0, 1.0)
}
