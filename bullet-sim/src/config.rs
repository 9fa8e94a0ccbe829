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
//! Simulation configuration
//!
//! Capacity is decided by the deployment and fixed for the life of a
//! simulation. Every field has a default so partial JSON documents load.

use serde::{Deserialize, Serialize};

/// Default number of bullet slots
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default blast radius for explosive bullets, in world units
pub const DEFAULT_EXPLOSION_RADIUS: f32 = 3.0;

/// Configuration for a `BulletSimulation`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of bullet slots
    pub capacity: usize,
    /// Blast radius for explosive bullets
    pub explosion_radius: f32,
    /// Whether to log a warning when a spawn is dropped
    pub log_exhaustion: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            capacity: DEFAULT_CAPACITY,
            explosion_radius: DEFAULT_EXPLOSION_RADIUS,
            log_exhaustion: true,
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with the given capacity
    pub fn new(capacity: usize) -> Self {
        SimulationConfig {
            capacity,
            ..SimulationConfig::default()
        }
    }

    /// Set the explosion radius
    pub fn with_explosion_radius(mut self, radius: f32) -> Self {
        self.explosion_radius = radius;
        self
    }

    /// Stop logging dropped spawns
    pub fn without_exhaustion_logging(mut self) -> Self {
        self.log_exhaustion = false;
        self
    }

    /// Check the configuration for values the simulation cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity == 0 {
            return Err("Capacity must be at least 1".to_string());
        }
        if !self.explosion_radius.is_finite() || self.explosion_radius <= 0.0 {
            return Err(format!(
                "Explosion radius must be positive and finite, got {}",
                self.explosion_radius
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: SimulationConfig =
            serde_json::from_str(json).map_err(|e| format!("Invalid simulation config: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.explosion_radius, 3.0);
        assert!(config.log_exhaustion);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = SimulationConfig::new(64)
            .with_explosion_radius(5.0)
            .without_exhaustion_logging();
        assert_eq!(config.capacity, 64);
        assert_eq!(config.explosion_radius, 5.0);
        assert!(!config.log_exhaustion);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = SimulationConfig::new(0).validate();
        assert!(result.unwrap_err().contains("Capacity"));
    }

    #[test]
    fn test_bad_explosion_radius_rejected() {
        assert!(SimulationConfig::default().with_explosion_radius(0.0).validate().is_err());
        assert!(SimulationConfig::default().with_explosion_radius(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimulationConfig::from_json(r#"{ "capacity": 250 }"#).unwrap();
        assert_eq!(config.capacity, 250);
        assert_eq!(config.explosion_radius, DEFAULT_EXPLOSION_RADIUS);
    }

    #[test]
    fn test_invalid_json_reports_error() {
        let err = SimulationConfig::from_json("{ capacity: }").unwrap_err();
        assert!(err.starts_with("Invalid simulation config"));

        let err = SimulationConfig::from_json(r#"{ "capacity": 0 }"#).unwrap_err();
        assert!(err.contains("Capacity"));
    }
}
