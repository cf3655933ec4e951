//! Path planning: A* search and path simplification.
//!
//! [`plan_route`] is the request/response façade the host calls once per
//! navigation request: quantize the continuous endpoints, search the
//! frozen grid, simplify the raw path, and hand back world-coordinate
//! waypoints.

mod astar;
mod simplify;

pub use astar::{AStarConfig, AStarPlanner, PathFailure, PathResult};
pub use simplify::{
    Waypoint, compress_collinear, douglas_peucker, simplify_route, waypoints_from_cells,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::NavConfig;
use crate::core::WorldPoint;
use crate::grid::GridMapper;

/// A planning request: continuous start and goal positions
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub start: WorldPoint,
    pub goal: WorldPoint,
}

/// A planning response.
///
/// `found = false` carries no waypoints; the caller may retry with a
/// different granularity or report failure upward.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub found: bool,
    pub waypoints: Vec<WorldPoint>,
}

/// Plan a simplified route through a frozen grid.
///
/// Quantizes the request endpoints with the grid's granularity, runs A*,
/// applies the route simplification policy, and returns waypoints as
/// world coordinates. All search state is local to this call.
pub fn plan_route(grid: &GridMapper, request: &PlanRequest, config: &NavConfig) -> PlanResponse {
    let planner = AStarPlanner::new(
        grid,
        AStarConfig {
            max_iterations: config.max_iterations,
        },
    );

    let result = planner.find_path_world(request.start, request.goal);
    if !result.success {
        debug!(
            "plan_route: no route from ({:.2},{:.2}) to ({:.2},{:.2}): {:?}",
            request.start.x, request.start.y, request.goal.x, request.goal.y, result.failure
        );
        return PlanResponse {
            found: false,
            waypoints: Vec::new(),
        };
    }

    let epsilon_cells = config.epsilon() / grid.granularity();
    let simplified = simplify_route(&result.path, epsilon_cells);
    info!(
        "plan_route: {} cells -> {} waypoints, cost {:.1}",
        result.path.len(),
        simplified.len(),
        result.cost
    );

    PlanResponse {
        found: true,
        waypoints: simplified
            .iter()
            .map(|&cell| grid.cell_to_world(cell))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridCell;

    #[test]
    fn test_plan_route_corridor() {
        let config = NavConfig::default();
        let mut grid = GridMapper::new(config.granularity);
        for x in 0..5 {
            grid.record(GridCell::new(x, 0));
        }

        let response = plan_route(
            &grid,
            &PlanRequest {
                start: WorldPoint::new(0.0, 0.0),
                goal: WorldPoint::new(2.0, 0.0),
            },
            &config,
        );

        assert!(response.found);
        assert_eq!(
            response.waypoints,
            vec![WorldPoint::new(0.0, 0.0), WorldPoint::new(2.0, 0.0)]
        );
    }

    #[test]
    fn test_plan_route_unreachable() {
        let config = NavConfig::default();
        let mut grid = GridMapper::new(config.granularity);
        grid.record(GridCell::new(0, 0));

        let response = plan_route(
            &grid,
            &PlanRequest {
                start: WorldPoint::new(0.0, 0.0),
                goal: WorldPoint::new(5.0, 5.0),
            },
            &config,
        );

        assert!(!response.found);
        assert!(response.waypoints.is_empty());
    }

    #[test]
    fn test_request_json_round_trip() {
        let request = PlanRequest {
            start: WorldPoint::new(0.5, 1.0),
            goal: WorldPoint::new(3.0, -2.0),
        };
        let json = serde_json::to_string(&request).unwrap();
        let parsed: PlanRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
    }
}
