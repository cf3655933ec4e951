//! # MargaNav
//!
//! Grid path-planning and turn-by-turn navigation engine for previously
//! mapped indoor spaces.
//!
//! MargaNav turns a stream of 2D positions into a quantized occupancy grid,
//! finds shortest paths between grid cells with A*, compresses raw paths
//! into minimal waypoint lists, and drives a waypoint-following state
//! machine that emits relative rotation commands as the traveler advances.
//!
//! ## Pipeline
//!
//! ```text
//! pose stream -> GridMapper -> AStarPlanner -> simplify -> NavigationEngine
//!                                                              |
//!                                                   rotation commands out
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use marga_nav::{GridMapper, NavConfig, PlanRequest, WorldPoint, plan_route};
//!
//! let config = NavConfig::default();
//! let mut mapper = GridMapper::new(config.granularity);
//!
//! // Learning phase: record positions while walking the space
//! for x in 0..10 {
//!     mapper.record_position(WorldPoint::new(x as f32 * 0.5, 0.0));
//! }
//!
//! // Planning phase: the grid is frozen, plan a route through it
//! let request = PlanRequest {
//!     start: WorldPoint::new(0.0, 0.0),
//!     goal: WorldPoint::new(4.5, 0.0),
//! };
//! let response = plan_route(&mapper, &request, &config);
//! assert!(response.found);
//! ```
//!
//! ## Coordinate System
//!
//! Positions are planar (x, y) in meters; bearings are degrees in
//! `[0, 360)` measured counter-clockwise from +X; rotation deltas are
//! signed degrees in `(-180, 180]` with positive meaning turn left.
//!
//! ## Concurrency
//!
//! The engine is single-threaded and synchronous. The occupancy grid is
//! mutable while learning and must be frozen before planning; all A*
//! search state is local to one `find_path` call, so repeated plans never
//! observe each other's scores.

pub mod config;
pub mod core;
pub mod error;
pub mod grid;
pub mod navigation;
pub mod planning;

pub use config::NavConfig;
pub use core::{GridCell, PoseSample, Quaternion, WorldPoint};
pub use error::{NavError, Result};
pub use grid::{GridMapper, GridMatrix, OccupancyBounds};
pub use navigation::{NavEvent, NavState, NavigationEngine, RotationCommand};
pub use planning::{
    AStarConfig, AStarPlanner, PathFailure, PathResult, PlanRequest, PlanResponse, Waypoint,
    plan_route,
};
