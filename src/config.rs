//! Configuration loading for MargaNav

use crate::error::{NavError, Result};
use serde::Deserialize;
use std::path::Path;

/// Engine configuration.
///
/// All fields have serde defaults, so a partial TOML file (or none at all)
/// yields a working configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct NavConfig {
    /// Grid cell size in world units (default: 0.5)
    ///
    /// One cell step represents this much real-world distance; positions
    /// within half a granularity of each other quantize to the same cell.
    #[serde(default = "default_granularity")]
    pub granularity: f32,

    /// Douglas-Peucker tolerance as a multiple of granularity (default: 1.5)
    ///
    /// The effective epsilon passed to the simplifier is
    /// `epsilon_scale * granularity` in world units.
    #[serde(default = "default_epsilon_scale")]
    pub epsilon_scale: f32,

    /// Heading calibration offset in degrees (default: 90.0)
    ///
    /// Added to the yaw extracted from the pose subsystem's quaternion so
    /// that heading 0 points along the grid's +X axis. Must match the
    /// bearing convention used for waypoint segments.
    #[serde(default = "default_heading_offset")]
    pub heading_offset_deg: f32,

    /// Maximum A* node expansions before giving up (default: 50000)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_granularity() -> f32 {
    0.5
}
fn default_epsilon_scale() -> f32 {
    1.5
}
fn default_heading_offset() -> f32 {
    90.0
}
fn default_max_iterations() -> usize {
    50_000
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            granularity: default_granularity(),
            epsilon_scale: default_epsilon_scale(),
            heading_offset_deg: default_heading_offset(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NavError::Config(format!("Failed to read config file: {}", e)))?;
        let config: NavConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Effective Douglas-Peucker epsilon in world units
    pub fn epsilon(&self) -> f32 {
        self.epsilon_scale * self.granularity
    }
}
