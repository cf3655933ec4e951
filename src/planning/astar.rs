//! A* shortest-path search over the occupancy grid.
//!
//! Classic A* on the 8-connected grid of learned cells. Per-search state
//! (g-scores, parents, closed set) lives in maps rebuilt for every call,
//! so repeated searches never observe each other's scores and the grid
//! itself stays immutable during planning.
//!
//! ## Edge-cost policy
//!
//! Both edge cost and heuristic are the Manhattan distance of the step
//! (orthogonal = 1, diagonal = 2). This matches the behavior the rest of
//! the system was tuned against; because the heuristic is the same metric
//! as the edge cost it is consistent, and the returned path is optimal
//! under it. Note that diagonal steps are *not* cheaper than the two
//! orthogonal steps they replace, so path cost ties between staircase and
//! diagonal routes are common; the insertion-sequence tie-break keeps the
//! expansion order, and therefore the returned path, deterministic.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::core::{GridCell, WorldPoint};
use crate::grid::GridMapper;

/// A* configuration
#[derive(Clone, Debug)]
pub struct AStarConfig {
    /// Maximum node expansions before giving up
    pub max_iterations: usize,
}

impl Default for AStarConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50_000,
        }
    }
}

/// A node in the open set.
///
/// Ephemeral per-search decoration of a cell; `seq` is the insertion
/// sequence number used as the tie-break between equal f-scores.
#[derive(Clone, Debug)]
struct SearchNode {
    cell: GridCell,
    f_score: f32,
    seq: u64,
}

impl Eq for SearchNode {}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score && self.seq == other.seq
    }
}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; earlier insertion wins ties
        other
            .f_score
            .partial_cmp(&self.f_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a path search
#[derive(Clone, Debug)]
pub struct PathResult {
    /// Cell sequence from start to goal inclusive (empty on failure)
    pub path: Vec<GridCell>,
    /// Accumulated edge cost of the path
    pub cost: f32,
    /// Number of nodes expanded during search
    pub nodes_expanded: usize,
    /// Whether a path was found
    pub success: bool,
    /// Reason for failure (if any)
    pub failure: Option<PathFailure>,
}

impl PathResult {
    fn failed(failure: PathFailure, nodes_expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            cost: f32::INFINITY,
            nodes_expanded,
            success: false,
            failure: Some(failure),
        }
    }
}

/// Reason a path search failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathFailure {
    /// Start cell is not in the learned space
    StartBlocked,
    /// Goal cell is not in the learned space
    GoalBlocked,
    /// No connecting path through the learned space
    NoPath,
    /// Expansion budget exhausted
    MaxIterationsExceeded,
}

/// A* pathfinder over a frozen occupancy grid
pub struct AStarPlanner<'a> {
    grid: &'a GridMapper,
    config: AStarConfig,
}

impl<'a> AStarPlanner<'a> {
    /// Create a new planner
    pub fn new(grid: &'a GridMapper, config: AStarConfig) -> Self {
        Self { grid, config }
    }

    /// Create with default configuration
    pub fn with_defaults(grid: &'a GridMapper) -> Self {
        Self::new(grid, AStarConfig::default())
    }

    /// Find a shortest path between two cells.
    ///
    /// Returns a typed failure rather than an error when no path exists;
    /// a start or goal outside the learned space is a failure, not a
    /// crash. For a fixed grid, start, and goal the returned path is
    /// reproducible across runs.
    pub fn find_path(&self, start: GridCell, goal: GridCell) -> PathResult {
        trace!(
            "find_path: start=({},{}) goal=({},{})",
            start.x, start.y, goal.x, goal.y
        );

        if !self.grid.is_occupied(&start) {
            debug!("path failed: start ({},{}) not in learned space", start.x, start.y);
            return PathResult::failed(PathFailure::StartBlocked, 0);
        }
        if !self.grid.is_occupied(&goal) {
            debug!("path failed: goal ({},{}) not in learned space", goal.x, goal.y);
            return PathResult::failed(PathFailure::GoalBlocked, 0);
        }

        let mut open_set = BinaryHeap::new();
        let mut closed_set: HashSet<GridCell> = HashSet::new();
        let mut came_from: HashMap<GridCell, GridCell> = HashMap::new();
        let mut g_scores: HashMap<GridCell, f32> = HashMap::new();

        let mut seq: u64 = 0;
        open_set.push(SearchNode {
            cell: start,
            f_score: Self::distance_between(start, goal),
            seq,
        });
        g_scores.insert(start, 0.0);

        let mut nodes_expanded = 0;

        while let Some(current) = open_set.pop() {
            nodes_expanded += 1;
            if nodes_expanded > self.config.max_iterations {
                debug!("path failed: expansion budget exhausted ({} nodes)", nodes_expanded);
                return PathResult::failed(PathFailure::MaxIterationsExceeded, nodes_expanded);
            }

            if current.cell == goal {
                let path = Self::reconstruct_path(&came_from, goal);
                let cost = g_scores[&goal];
                trace!(
                    "path found: {} cells, cost={:.1}, {} nodes expanded",
                    path.len(),
                    cost,
                    nodes_expanded
                );
                return PathResult {
                    path,
                    cost,
                    nodes_expanded,
                    success: true,
                    failure: None,
                };
            }

            // Stale heap entries for already-expanded cells are skipped;
            // closed cells are never re-opened.
            if !closed_set.insert(current.cell) {
                continue;
            }

            let current_g = g_scores[&current.cell];

            for neighbor in current.cell.neighbors_8() {
                if closed_set.contains(&neighbor) {
                    continue;
                }

                // Cells never walked through are treated as "no neighbor"
                if !self.grid.is_occupied(&neighbor) {
                    continue;
                }

                let tentative_g = current_g + Self::distance_between(current.cell, neighbor);
                let existing_g = g_scores.get(&neighbor).copied().unwrap_or(f32::INFINITY);

                if tentative_g < existing_g {
                    came_from.insert(neighbor, current.cell);
                    g_scores.insert(neighbor, tentative_g);

                    seq += 1;
                    open_set.push(SearchNode {
                        cell: neighbor,
                        f_score: tentative_g + Self::distance_between(neighbor, goal),
                        seq,
                    });
                }
            }
        }

        debug!("path failed: no route after expanding {} nodes", nodes_expanded);
        PathResult::failed(PathFailure::NoPath, nodes_expanded)
    }

    /// Find a path between two continuous positions, quantized with the
    /// grid's granularity
    pub fn find_path_world(&self, start: WorldPoint, goal: WorldPoint) -> PathResult {
        self.find_path(self.grid.quantize(start), self.grid.quantize(goal))
    }

    /// Edge cost and heuristic: Manhattan distance between cells
    #[inline]
    fn distance_between(a: GridCell, b: GridCell) -> f32 {
        a.manhattan_distance(&b) as f32
    }

    /// Follow back-pointers from goal to start, then reverse
    fn reconstruct_path(came_from: &HashMap<GridCell, GridCell>, goal: GridCell) -> Vec<GridCell> {
        let mut path = vec![goal];
        let mut current = goal;

        while let Some(&prev) = came_from.get(&current) {
            path.push(prev);
            current = prev;
        }

        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Grid with every cell of a w x h block recorded
    fn open_grid(width: i32, height: i32) -> GridMapper {
        let mut mapper = GridMapper::new(0.5);
        for x in 0..width {
            for y in 0..height {
                mapper.record(GridCell::new(x, y));
            }
        }
        mapper
    }

    #[test]
    fn test_corridor_path() {
        let grid = open_grid(5, 1);
        let planner = AStarPlanner::with_defaults(&grid);

        let result = planner.find_path(GridCell::new(0, 0), GridCell::new(4, 0));

        assert!(result.success);
        assert_eq!(
            result.path,
            vec![
                GridCell::new(0, 0),
                GridCell::new(1, 0),
                GridCell::new(2, 0),
                GridCell::new(3, 0),
                GridCell::new(4, 0),
            ]
        );
        assert_eq!(result.cost, 4.0);
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = open_grid(3, 3);
        let planner = AStarPlanner::with_defaults(&grid);

        let result = planner.find_path(GridCell::new(1, 1), GridCell::new(1, 1));

        assert!(result.success);
        assert_eq!(result.path, vec![GridCell::new(1, 1)]);
        assert_eq!(result.cost, 0.0);
    }

    #[test]
    fn test_path_around_gap() {
        // 3x3 block with the center missing; routes from (0,1) to (2,1)
        // must detour through the top or bottom row
        let mut grid = GridMapper::new(0.5);
        for x in 0..3 {
            for y in 0..3 {
                if x == 1 && y == 1 {
                    continue;
                }
                grid.record(GridCell::new(x, y));
            }
        }

        let planner = AStarPlanner::with_defaults(&grid);
        let result = planner.find_path(GridCell::new(0, 1), GridCell::new(2, 1));

        assert!(result.success);
        assert!(!result.path.contains(&GridCell::new(1, 1)));
        assert_eq!(result.path.first(), Some(&GridCell::new(0, 1)));
        assert_eq!(result.path.last(), Some(&GridCell::new(2, 1)));
    }

    #[test]
    fn test_goal_outside_learned_space() {
        let grid = open_grid(3, 3);
        let planner = AStarPlanner::with_defaults(&grid);

        let result = planner.find_path(GridCell::new(0, 0), GridCell::new(10, 10));

        assert!(!result.success);
        assert_eq!(result.failure, Some(PathFailure::GoalBlocked));
    }

    #[test]
    fn test_start_outside_learned_space() {
        let grid = open_grid(3, 3);
        let planner = AStarPlanner::with_defaults(&grid);

        let result = planner.find_path(GridCell::new(-5, 0), GridCell::new(1, 1));

        assert!(!result.success);
        assert_eq!(result.failure, Some(PathFailure::StartBlocked));
    }

    #[test]
    fn test_disconnected_regions() {
        // Two cells with no connection between them
        let mut grid = GridMapper::new(0.5);
        grid.record(GridCell::new(0, 0));
        grid.record(GridCell::new(5, 5));

        let planner = AStarPlanner::with_defaults(&grid);
        let result = planner.find_path(GridCell::new(0, 0), GridCell::new(5, 5));

        assert!(!result.success);
        assert_eq!(result.failure, Some(PathFailure::NoPath));
    }

    #[test]
    fn test_adjacent_steps_only() {
        let grid = open_grid(8, 8);
        let planner = AStarPlanner::with_defaults(&grid);

        let result = planner.find_path(GridCell::new(0, 0), GridCell::new(7, 3));

        assert!(result.success);
        for pair in result.path.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(&pair[1]), 1);
        }
    }

    #[test]
    fn test_cost_matches_manhattan_metric() {
        // In open space the cheapest cost under the Manhattan policy is
        // exactly the Manhattan distance between start and goal
        let grid = open_grid(10, 10);
        let planner = AStarPlanner::with_defaults(&grid);

        let start = GridCell::new(1, 2);
        let goal = GridCell::new(8, 6);
        let result = planner.find_path(start, goal);

        assert!(result.success);
        assert_eq!(result.cost, start.manhattan_distance(&goal) as f32);
    }

    #[test]
    fn test_deterministic_path() {
        let grid = open_grid(10, 10);
        let planner = AStarPlanner::with_defaults(&grid);

        let first = planner.find_path(GridCell::new(0, 0), GridCell::new(9, 9));
        let second = planner.find_path(GridCell::new(0, 0), GridCell::new(9, 9));

        assert!(first.success);
        assert_eq!(first.path, second.path);
    }

    #[test]
    fn test_iteration_budget() {
        let grid = open_grid(20, 20);
        let planner = AStarPlanner::new(&grid, AStarConfig { max_iterations: 3 });

        let result = planner.find_path(GridCell::new(0, 0), GridCell::new(19, 19));

        assert!(!result.success);
        assert_eq!(result.failure, Some(PathFailure::MaxIterationsExceeded));
    }

    #[test]
    fn test_optimal_against_brute_force() {
        // Exhaustive Dijkstra reference on a small grid with obstacles
        let mut grid = GridMapper::new(0.5);
        for x in 0..5 {
            for y in 0..5 {
                // Carve an L-shaped wall
                if x == 2 && y < 4 {
                    continue;
                }
                grid.record(GridCell::new(x, y));
            }
        }

        let start = GridCell::new(0, 0);
        let goal = GridCell::new(4, 0);

        let planner = AStarPlanner::with_defaults(&grid);
        let result = planner.find_path(start, goal);
        assert!(result.success);

        // Bellman-Ford style relaxation over all learned cells
        let cells: Vec<GridCell> = grid.cells().copied().collect();
        let mut dist: HashMap<GridCell, f32> = HashMap::new();
        dist.insert(start, 0.0);
        for _ in 0..cells.len() {
            for &cell in &cells {
                let Some(&d) = dist.get(&cell) else { continue };
                for neighbor in cell.neighbors_8() {
                    if !grid.is_occupied(&neighbor) {
                        continue;
                    }
                    let nd = d + cell.manhattan_distance(&neighbor) as f32;
                    let entry = dist.entry(neighbor).or_insert(f32::INFINITY);
                    if nd < *entry {
                        *entry = nd;
                    }
                }
            }
        }

        assert_eq!(result.cost, dist[&goal]);
    }
}
