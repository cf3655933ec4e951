//! Point and coordinate types for the occupancy grid.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Grid coordinates (integer cell indices)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCell {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCell {
    /// Create a new grid cell
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Quantize a world position to its cell at the given granularity.
    ///
    /// Rounds to the nearest multiple, so positions within half a
    /// granularity of each other map to the same cell.
    #[inline]
    pub fn from_world(position: WorldPoint, granularity: f32) -> Self {
        Self::new(
            (position.x / granularity).round() as i32,
            (position.y / granularity).round() as i32,
        )
    }

    /// Manhattan distance to another cell
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance (max of x and y distance)
    #[inline]
    pub fn chebyshev_distance(&self, other: &GridCell) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Get the 8 neighbors (including diagonals)
    #[inline]
    pub fn neighbors_8(&self) -> [GridCell; 8] {
        [
            GridCell::new(self.x, self.y + 1),     // N
            GridCell::new(self.x + 1, self.y + 1), // NE
            GridCell::new(self.x + 1, self.y),     // E
            GridCell::new(self.x + 1, self.y - 1), // SE
            GridCell::new(self.x, self.y - 1),     // S
            GridCell::new(self.x - 1, self.y - 1), // SW
            GridCell::new(self.x - 1, self.y),     // W
            GridCell::new(self.x - 1, self.y + 1), // NW
        ]
    }

    /// Unit step direction from this cell to an adjacent cell
    #[inline]
    pub fn step_to(&self, other: &GridCell) -> (i32, i32) {
        ((other.x - self.x).signum(), (other.y - self.y).signum())
    }
}

impl Add for GridCell {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        GridCell::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridCell {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        GridCell::new(self.x - other.x, self.y - other.y)
    }
}

/// World coordinates (continuous, f32)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in world units
    pub x: f32,
    /// Y coordinate in world units
    pub y: f32,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle from this point to another (radians, CCW from +X)
    #[inline]
    pub fn angle_to(&self, other: &WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dy.atan2(dx)
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_8() {
        let c = GridCell::new(0, 0);
        let n = c.neighbors_8();
        assert_eq!(n.len(), 8);
        for neighbor in n {
            assert_eq!(c.chebyshev_distance(&neighbor), 1);
        }
    }

    #[test]
    fn test_manhattan_distance() {
        let a = GridCell::new(0, 0);
        let b = GridCell::new(3, -4);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
    }

    #[test]
    fn test_step_to() {
        let a = GridCell::new(2, 2);
        assert_eq!(a.step_to(&GridCell::new(3, 2)), (1, 0));
        assert_eq!(a.step_to(&GridCell::new(1, 1)), (-1, -1));
    }

    #[test]
    fn test_world_point_distance() {
        let a = WorldPoint::new(0.0, 0.0);
        let b = WorldPoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_world_point_angle() {
        let origin = WorldPoint::ZERO;
        let north = WorldPoint::new(0.0, 1.0);
        assert!((origin.angle_to(&north) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
