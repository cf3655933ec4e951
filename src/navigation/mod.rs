//! Waypoint-following state machine.
//!
//! Consumes the simplified waypoint list plus periodic position updates
//! from the pose stream, decides when each waypoint is reached, and emits
//! the minimal signed rotation the traveler must make at every transition.
//! Rotation commands go out to the (external) command transport; this
//! module only produces them.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::config::NavConfig;
use crate::core::{
    GridCell, PoseSample, WorldPoint, heading_degrees, normalize_bearing, rotation_delta,
};
use crate::planning::Waypoint;

/// State of a navigation session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavState {
    /// No active route
    Idle,
    /// Steering through the waypoint list
    Navigating,
    /// Final waypoint reached (terminal)
    Arrived,
}

/// Relative rotation command for the traveler.
///
/// Positive means turn left (counter-clockwise), negative turn right;
/// always in `(-180, 180]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotationCommand {
    pub delta_degrees: f32,
}

/// Event emitted by a position update
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NavEvent {
    /// A waypoint was reached; rotate by this much before walking on
    Rotate(RotationCommand),
    /// The final waypoint was reached
    Arrived,
}

/// Turn-by-turn navigation engine.
///
/// One session at a time: [`start`](Self::start) moves Idle to
/// Navigating, position updates advance through the waypoints, and the
/// session ends at Arrived or with [`cancel`](Self::cancel). Bearings
/// for every segment are computed up front at start.
pub struct NavigationEngine {
    granularity: f32,
    heading_offset_deg: f32,
    waypoints: Vec<Waypoint>,
    bearings: Vec<f32>,
    current_index: usize,
    state: NavState,
    last_rotation: Option<RotationCommand>,
}

impl NavigationEngine {
    /// Create an idle engine.
    ///
    /// The config's granularity must match the grid the waypoints were
    /// planned on, so that live positions quantize to the same cells.
    pub fn new(config: &NavConfig) -> Self {
        Self {
            granularity: config.granularity,
            heading_offset_deg: config.heading_offset_deg,
            waypoints: Vec::new(),
            bearings: Vec::new(),
            current_index: 0,
            state: NavState::Idle,
            last_rotation: None,
        }
    }

    /// Current session state
    pub fn state(&self) -> NavState {
        self.state
    }

    /// The waypoint currently steered toward, if navigating
    pub fn current_waypoint(&self) -> Option<&Waypoint> {
        match self.state {
            NavState::Navigating => self.waypoints.get(self.current_index),
            _ => None,
        }
    }

    /// The last emitted rotation command, for re-announcement
    pub fn last_rotation(&self) -> Option<RotationCommand> {
        self.last_rotation
    }

    /// Begin navigating a waypoint list.
    ///
    /// `initial_heading_deg` seeds the bearing array: it is the
    /// traveler's heading at the start position, in the same `[0, 360)`
    /// convention as the waypoint bearings. An empty list leaves the
    /// engine Idle.
    pub fn start(&mut self, waypoints: Vec<Waypoint>, initial_heading_deg: f32) {
        if waypoints.is_empty() {
            warn!("start: empty waypoint list, staying idle");
            self.reset();
            return;
        }

        let mut bearings: Vec<f32> = waypoints.iter().map(|w| w.bearing_deg).collect();
        bearings[0] = normalize_bearing(initial_heading_deg);

        info!(
            "start: {} waypoints, initial heading {:.1} degrees",
            waypoints.len(),
            bearings[0]
        );

        self.waypoints = waypoints;
        self.bearings = bearings;
        self.current_index = 0;
        self.state = NavState::Navigating;
        self.last_rotation = None;
    }

    /// Begin navigating, seeding the initial heading from a pose sample's
    /// orientation quaternion
    pub fn start_with_pose(&mut self, waypoints: Vec<Waypoint>, pose: &PoseSample) {
        let heading = heading_degrees(&pose.orientation, self.heading_offset_deg);
        self.start(waypoints, heading);
    }

    /// Feed one position from the pose stream.
    ///
    /// Quantizes the position with the planning granularity; when it
    /// lands on the current target waypoint's cell the session advances,
    /// emitting either the rotation for the next segment or the arrival
    /// signal. Returns `None` while between waypoints or when not
    /// navigating.
    pub fn on_position_update(&mut self, position: WorldPoint) -> Option<NavEvent> {
        if self.state != NavState::Navigating {
            return None;
        }

        let cell = GridCell::from_world(position, self.granularity);
        let target = self.waypoints[self.current_index].cell;
        if cell != target {
            return None;
        }

        self.advance()
    }

    /// Feed one pose sample, skipping samples the pose subsystem marked
    /// invalid (relocalization lost)
    pub fn on_pose_sample(&mut self, sample: &PoseSample) -> Option<NavEvent> {
        if !sample.valid {
            trace!("skipping invalid pose sample at t={:.3}", sample.timestamp);
            return None;
        }
        self.on_position_update(sample.position)
    }

    /// Abandon the session from any state
    pub fn cancel(&mut self) {
        if self.state != NavState::Idle {
            info!("navigation cancelled at waypoint {}", self.current_index);
        }
        self.reset();
    }

    fn advance(&mut self) -> Option<NavEvent> {
        self.current_index += 1;

        if self.current_index == self.waypoints.len() {
            info!("reached destination");
            self.state = NavState::Arrived;
            return Some(NavEvent::Arrived);
        }

        let delta = rotation_delta(
            self.bearings[self.current_index - 1],
            self.bearings[self.current_index],
        );
        let command = RotationCommand {
            delta_degrees: delta,
        };
        self.last_rotation = Some(command);

        let next = &self.waypoints[self.current_index];
        debug!(
            "waypoint {}/{}: next ({}, {}), rotate {:.1} degrees",
            self.current_index,
            self.waypoints.len(),
            next.cell.x,
            next.cell.y,
            delta
        );

        Some(NavEvent::Rotate(command))
    }

    fn reset(&mut self) {
        self.waypoints.clear();
        self.bearings.clear();
        self.current_index = 0;
        self.state = NavState::Idle;
        self.last_rotation = None;
    }
}
