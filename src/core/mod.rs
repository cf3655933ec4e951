//! Core types for the MargaNav engine.
//!
//! - [`GridCell`]: integer cell indices, occupancy keys and search vertices
//! - [`WorldPoint`]: continuous planar coordinates in world units
//! - [`Quaternion`] / [`PoseSample`]: pose-input interface types
//! - Bearing math: yaw extraction and signed rotation deltas

mod point;
mod pose;

pub use point::{GridCell, WorldPoint};
pub use pose::{PoseSample, Quaternion, heading_degrees, normalize_bearing, rotation_delta};
