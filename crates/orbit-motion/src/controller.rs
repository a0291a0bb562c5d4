//! The orbit motion controller: one `advance` per display frame.

use glam::{DQuat, DVec3};
use orbit_config::OrbitConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::MotionError;
use crate::follower::{FollowerState, clamp_radius};
use crate::geo::CelestialBody;
use crate::orientation::is_unit;
use crate::seeker::SeekerState;

/// How far a restored direction or quaternion may stray from unit length.
const UNIT_TOLERANCE: f64 = 1e-6;

/// Position and orientation handed to the renderer for one body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyTransform {
    /// World-space position.
    pub position: DVec3,
    /// World-space orientation (unit quaternion).
    pub orientation: DQuat,
}

/// Transforms of both moving bodies after one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitFrame {
    /// Elapsed seconds this frame was computed for.
    pub elapsed: f64,
    /// Destination marker.
    pub seeker: BodyTransform,
    /// Plane.
    pub follower: BodyTransform,
}

/// Complete mutable state of the orbit sketch.
///
/// Restoring a saved `OrbitState` and continuing from the same elapsed time
/// reproduces the original trajectory exactly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    /// Accumulated seeker longitude in degrees. Grows by `speed` per frame,
    /// so it tracks the number of frames rather than wall-clock time.
    pub longitude: f64,
    /// Elapsed seconds of the most recent frame.
    pub elapsed: f64,
    /// Seeker state.
    pub seeker: SeekerState,
    /// Follower state.
    pub follower: FollowerState,
}

fn body_of(config: &OrbitConfig) -> CelestialBody {
    CelestialBody::new(DVec3::from_array(config.body_center), config.earth_radius)
}

impl OrbitState {
    /// State at construction time: longitude zero, follower on its shell.
    pub fn initial(config: &OrbitConfig) -> Self {
        let body = body_of(config);
        Self {
            longitude: 0.0,
            elapsed: 0.0,
            seeker: SeekerState::initial(config, &body, 0.0),
            follower: FollowerState::initial(config, &body),
        }
    }

    /// The state one frame later, at `elapsed` seconds.
    pub fn advanced(&self, config: &OrbitConfig, elapsed: f64) -> Self {
        let body = body_of(config);
        let mut next = *self;

        next.elapsed = elapsed;
        next.longitude += config.speed;
        next.seeker.place(config, &body, elapsed, next.longitude);
        if !next.seeker.turn(config, &body) {
            trace!("seeker turn degenerate, orientation held");
        }
        if next.follower.step(config, &body, next.seeker.position).is_none() {
            trace!("follower stationary, orientation held");
        }
        next
    }

    /// Transforms to hand to the renderer.
    pub fn frame(&self) -> OrbitFrame {
        OrbitFrame {
            elapsed: self.elapsed,
            seeker: BodyTransform {
                position: self.seeker.position,
                orientation: self.seeker.orientation,
            },
            follower: BodyTransform {
                position: self.follower.position,
                orientation: self.follower.orientation,
            },
        }
    }

    /// Serialize to a RON snapshot.
    pub fn to_ron(&self) -> Result<String, MotionError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(MotionError::SnapshotSerialize)
    }

    /// Parse a RON snapshot written by [`to_ron`](Self::to_ron).
    pub fn from_ron(s: &str) -> Result<Self, MotionError> {
        ron::from_str(s).map_err(MotionError::SnapshotParse)
    }

    fn validate(&self, config: &OrbitConfig) -> Result<(), MotionError> {
        let finite = self.longitude.is_finite()
            && self.elapsed.is_finite()
            && self.seeker.position.is_finite()
            && self.seeker.orientation.is_finite()
            && self.seeker.direction.is_finite()
            && self.follower.position.is_finite()
            && self.follower.orientation.is_finite();
        if !finite {
            return Err(MotionError::InvalidState("non-finite component"));
        }
        if self.elapsed < 0.0 {
            return Err(MotionError::InvalidState("negative elapsed"));
        }

        let body = body_of(config);
        if body.up_at(self.seeker.position).is_none() {
            return Err(MotionError::InvalidState("seeker at body center"));
        }
        if body.up_at(self.follower.position).is_none() {
            return Err(MotionError::InvalidState("follower at body center"));
        }
        if (self.seeker.direction.length() - 1.0).abs() > UNIT_TOLERANCE {
            return Err(MotionError::InvalidState("seeker direction is not a unit vector"));
        }
        if !is_unit(self.seeker.orientation, UNIT_TOLERANCE) {
            return Err(MotionError::InvalidState("seeker orientation is not a unit quaternion"));
        }
        if !is_unit(self.follower.orientation, UNIT_TOLERANCE) {
            return Err(MotionError::InvalidState("follower orientation is not a unit quaternion"));
        }
        Ok(())
    }
}

/// Check every invariant the per-frame math relies on.
fn validate_config(config: &OrbitConfig) -> Result<(), MotionError> {
    let finite = config.body_center.iter().all(|c| c.is_finite())
        && config.follower_start.iter().all(|c| c.is_finite())
        && [
            config.earth_radius,
            config.seeker_radius,
            config.follower_radius,
            config.frequency,
            config.amplitude,
            config.speed,
            config.pull_strength,
            config.damping_step,
            config.clamp_epsilon,
        ]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(MotionError::invalid("orbit", "all values must be finite"));
    }
    if config.earth_radius <= 0.0 {
        return Err(MotionError::invalid("earth_radius", "must be positive"));
    }
    if config.seeker_radius <= 0.0 {
        return Err(MotionError::invalid("seeker_radius", "must be positive"));
    }
    if clamp_radius(config) <= 0.0 {
        return Err(MotionError::invalid(
            "clamp_epsilon",
            format!(
                "must be smaller than follower_radius ({})",
                config.follower_radius
            ),
        ));
    }
    if !(0.0..=1.0).contains(&config.damping_step) {
        return Err(MotionError::invalid("damping_step", "must lie in [0, 1]"));
    }
    if config.pull_strength < 0.0 {
        return Err(MotionError::invalid("pull_strength", "must not be negative"));
    }
    if body_of(config)
        .up_at(DVec3::from_array(config.follower_start))
        .is_none()
    {
        return Err(MotionError::invalid(
            "follower_start",
            "must not coincide with body_center",
        ));
    }
    Ok(())
}

/// Drives the orbit sketch one display frame at a time.
///
/// The controller exclusively owns its state; the renderer only reads the
/// [`OrbitFrame`] returned by [`advance`](Self::advance).
#[derive(Debug, Clone)]
pub struct OrbitMotionController {
    config: OrbitConfig,
    state: OrbitState,
    frame_count: u64,
}

impl OrbitMotionController {
    /// Build a controller in its initial state.
    pub fn new(config: OrbitConfig) -> Result<Self, MotionError> {
        validate_config(&config)?;
        let state = OrbitState::initial(&config);
        debug!(
            seeker = ?state.seeker.position,
            follower = ?state.follower.position,
            mode = ?config.direction_mode,
            "orbit controller created"
        );
        Ok(Self {
            config,
            state,
            frame_count: 0,
        })
    }

    /// Build a controller that continues from a saved state.
    pub fn with_state(config: OrbitConfig, state: OrbitState) -> Result<Self, MotionError> {
        let mut controller = Self::new(config)?;
        controller.restore(state)?;
        Ok(controller)
    }

    /// Advance by one display frame and return the new transforms.
    ///
    /// `elapsed` is seconds since the controller started and should never
    /// decrease. Longitude advances by a fixed step per call, so uneven call
    /// rates change the perceived seeker speed.
    pub fn advance(&mut self, elapsed: f64) -> OrbitFrame {
        if elapsed < self.state.elapsed {
            warn!(
                elapsed,
                previous = self.state.elapsed,
                "elapsed time went backwards"
            );
        }

        self.state = self.state.advanced(&self.config, elapsed);
        self.frame_count += 1;

        let frame = self.state.frame();
        trace!(
            frame = self.frame_count,
            elapsed,
            longitude = self.state.longitude,
            seeker = ?frame.seeker.position,
            follower = ?frame.follower.position,
            "orbit advanced"
        );
        frame
    }

    /// Replace the state, e.g. from a snapshot.
    pub fn restore(&mut self, state: OrbitState) -> Result<(), MotionError> {
        state.validate(&self.config)?;
        self.state = state;
        debug!(
            longitude = state.longitude,
            elapsed = state.elapsed,
            "orbit state restored"
        );
        Ok(())
    }

    /// Current state.
    pub fn state(&self) -> &OrbitState {
        &self.state
    }

    /// Transforms as of the last frame (or the initial pose).
    pub fn frame(&self) -> OrbitFrame {
        self.state.frame()
    }

    /// Configuration the controller was built with.
    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// The body everything orbits.
    pub fn body(&self) -> CelestialBody {
        body_of(&self.config)
    }

    /// Number of `advance` calls since construction.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
