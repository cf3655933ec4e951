//! Path simplification.
//!
//! Reduces a raw cell-by-cell A* path to the short waypoint list the
//! navigation engine steers through. Two interchangeable strategies:
//!
//! - [`compress_collinear`]: merges runs of identical step directions,
//!   keeping only direction-change vertices. Exact, for unit-step paths.
//! - [`douglas_peucker`]: classic recursive polyline simplification with
//!   a perpendicular-distance tolerance. Also drops staircase jitter
//!   along near-straight diagonals.
//!
//! Both are pure functions; both always preserve the first and last
//! vertex, and never grow the path.

use crate::core::{GridCell, WorldPoint, normalize_bearing};
use crate::grid::GridMapper;

/// A simplified path vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// Grid cell the traveler must reach
    pub cell: GridCell,
    /// Cell center in world coordinates
    pub position: WorldPoint,
    /// Direction of travel arriving at this waypoint, degrees in `[0, 360)`
    pub bearing_deg: f32,
}

/// Merge consecutive steps that share a direction into single segments.
///
/// Emits the start vertex, every vertex where the (dx, dy) step direction
/// changes, and the final vertex.
pub fn compress_collinear(path: &[GridCell]) -> Vec<GridCell> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let mut result = vec![path[0]];
    let mut direction = path[0].step_to(&path[1]);

    for i in 1..path.len() - 1 {
        let next_direction = path[i].step_to(&path[i + 1]);
        if next_direction != direction {
            result.push(path[i]);
            direction = next_direction;
        }
    }

    result.push(path[path.len() - 1]);
    result
}

/// Douglas-Peucker polyline simplification.
///
/// Splits recursively at the vertex of maximum perpendicular distance
/// from the endpoint chord while that distance exceeds `epsilon` (in cell
/// units); otherwise the whole segment collapses to its endpoints.
/// Recursion depth is bounded by the path length, which indoor-scale
/// paths keep small. Idempotent for a fixed `epsilon`.
pub fn douglas_peucker(path: &[GridCell], epsilon: f32) -> Vec<GridCell> {
    if path.len() <= 2 {
        return path.to_vec();
    }

    let last = path.len() - 1;
    let mut max_distance = 0.0f32;
    let mut split = 0;

    for i in 1..last {
        let d = perpendicular_distance(path[i], path[0], path[last]);
        if d > max_distance {
            max_distance = d;
            split = i;
        }
    }

    if max_distance > epsilon {
        let mut left = douglas_peucker(&path[..=split], epsilon);
        let right = douglas_peucker(&path[split..], epsilon);
        // The split vertex ends both halves; drop the duplicate
        left.pop();
        left.extend(right);
        left
    } else {
        vec![path[0], path[last]]
    }
}

/// Perpendicular distance from a cell to the line through two cells
fn perpendicular_distance(point: GridCell, line_start: GridCell, line_end: GridCell) -> f32 {
    let x1 = line_start.x as f32;
    let y1 = line_start.y as f32;
    let x2 = line_end.x as f32;
    let y2 = line_end.y as f32;
    let px = point.x as f32;
    let py = point.y as f32;

    let dx = x2 - x1;
    let dy = y2 - y1;
    let length = (dx * dx + dy * dy).sqrt();

    if length < f32::EPSILON {
        // Degenerate chord: fall back to point distance
        return ((px - x1).powi(2) + (py - y1).powi(2)).sqrt();
    }

    (dy * px - dx * py + x2 * y1 - y2 * x1).abs() / length
}

/// Route-level simplification policy.
///
/// Paths of two or fewer cells pass through unchanged; longer paths get
/// Douglas-Peucker with the given tolerance (cell units).
pub fn simplify_route(path: &[GridCell], epsilon: f32) -> Vec<GridCell> {
    if path.len() > 2 {
        douglas_peucker(path, epsilon)
    } else {
        path.to_vec()
    }
}

/// Convert simplified cells into waypoints with world positions and
/// arrival bearings.
///
/// `bearing_deg` of waypoint `i` is the direction of the segment arriving
/// at it; the first waypoint carries the outgoing segment's bearing (the
/// engine replaces it with the traveler's live heading at start).
pub fn waypoints_from_cells(cells: &[GridCell], grid: &GridMapper) -> Vec<Waypoint> {
    let mut waypoints: Vec<Waypoint> = cells
        .iter()
        .map(|&cell| Waypoint {
            cell,
            position: grid.cell_to_world(cell),
            bearing_deg: 0.0,
        })
        .collect();

    for i in 1..waypoints.len() {
        let prev = waypoints[i - 1].position;
        let curr = waypoints[i].position;
        waypoints[i].bearing_deg = normalize_bearing(prev.angle_to(&curr).to_degrees());
    }
    if waypoints.len() > 1 {
        waypoints[0].bearing_deg = waypoints[1].bearing_deg;
    }

    waypoints
}
