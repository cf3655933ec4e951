//! Pose-input types and bearing math.
//!
//! The pose subsystem (external to this crate) delivers position samples
//! with an orientation quaternion. This module extracts the planar heading
//! from that quaternion and provides the angular arithmetic the navigation
//! engine uses: bearings normalized into `[0, 360)` and minimal signed
//! rotation deltas in `(-180, 180]`.

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;

/// Orientation quaternion (x, y, z, w)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Create a new quaternion
    #[inline]
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Yaw (z-axis rotation) in degrees, in `(-180, 180]`
    pub fn yaw_degrees(&self) -> f32 {
        let t1 = 2.0 * (self.w * self.z + self.x * self.y);
        let t2 = 1.0 - 2.0 * (self.y * self.y + self.z * self.z);
        t1.atan2(t2).to_degrees()
    }
}

/// One sample from the pose stream.
///
/// The engine consumes only samples with `valid = true`; the pose
/// subsystem marks samples invalid while relocalization is lost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    /// Planar position in world units
    pub position: WorldPoint,
    /// Device orientation
    pub orientation: Quaternion,
    /// Sample timestamp in seconds
    pub timestamp: f64,
    /// Whether the pose subsystem considers this sample trustworthy
    pub valid: bool,
}

impl PoseSample {
    /// Create a valid sample
    pub fn new(position: WorldPoint, orientation: Quaternion, timestamp: f64) -> Self {
        Self {
            position,
            orientation,
            timestamp,
            valid: true,
        }
    }
}

/// Normalize a bearing into `[0, 360)` degrees
#[inline]
pub fn normalize_bearing(degrees: f32) -> f32 {
    degrees.rem_euclid(360.0)
}

/// Traveler heading in degrees, `[0, 360)`.
///
/// Applies the mounting-calibration offset so that heading 0 points along
/// the grid's +X axis. The offset must match the convention used for
/// waypoint segment bearings.
#[inline]
pub fn heading_degrees(orientation: &Quaternion, offset_deg: f32) -> f32 {
    normalize_bearing(orientation.yaw_degrees() + offset_deg)
}

/// Minimal signed rotation from `from` to `to`, both bearings in degrees.
///
/// Result is in `(-180, 180]`; positive means turn left (counter-clockwise).
#[inline]
pub fn rotation_delta(from: f32, to: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}
