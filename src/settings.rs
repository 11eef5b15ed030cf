//! Grid configuration
//!
//! Fixed at construction. Serialized as JSON so hosts can ship presets.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GridError;

/// Construction-time grid configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Display name (cosmetic only)
    pub name: String,
    /// Number of boxes along X
    pub x_size: u32,
    /// Number of boxes along Z
    pub z_size: u32,
    /// Seed for random pushes
    pub seed: u64,
    /// Initial impulse magnitude for pushes and patterns
    pub push_velocity: f32,
    /// Whether boxes start out bouncing on a floor
    pub floor_enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            x_size: DEFAULT_X_SIZE,
            z_size: DEFAULT_Z_SIZE,
            seed: 0,
            push_velocity: DEFAULT_PUSH_VELOCITY,
            floor_enabled: true,
        }
    }
}

impl GridConfig {
    /// Config with the given name and dimensions, defaults elsewhere
    pub fn new(name: impl Into<String>, x_size: u32, z_size: u32) -> Self {
        Self {
            name: name.into(),
            x_size,
            z_size,
            ..Self::default()
        }
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the dimensions describe at least one box
    pub fn validate(&self) -> Result<(), GridError> {
        if self.x_size == 0 || self.z_size == 0 {
            return Err(GridError::EmptyGrid {
                x_size: self.x_size,
                z_size: self.z_size,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, GridError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of boxes
    pub fn box_count(&self) -> usize {
        self.x_size as usize * self.z_size as usize
    }
}
