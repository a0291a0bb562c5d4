//! The seeker: a destination marker walking a great circle around the body.

use glam::{DQuat, DVec3};
use orbit_config::{DirectionMode, OrbitConfig};
use serde::{Deserialize, Serialize};

use crate::geo::{CelestialBody, geo_to_cartesian, oscillating_latitude};
use crate::orientation::{MODEL_FORWARD, damped_blend, turn_toward};

/// Mutable seeker state carried across frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeekerState {
    /// Position on the seeker shell.
    pub position: DVec3,
    /// Damped orientation.
    pub orientation: DQuat,
    /// Reference heading the per-frame turn starts from.
    pub direction: DVec3,
}

impl SeekerState {
    /// Seeker at `(latitude(0), longitude)` with identity orientation,
    /// heading along model forward.
    pub fn initial(config: &OrbitConfig, body: &CelestialBody, longitude: f64) -> Self {
        let latitude = oscillating_latitude(0.0, config.frequency, config.amplitude);
        Self {
            position: body.center + geo_to_cartesian(latitude, longitude, config.seeker_radius),
            orientation: DQuat::IDENTITY,
            direction: MODEL_FORWARD,
        }
    }

    /// Place the seeker for this frame. `longitude` is the already
    /// accumulated value.
    pub(crate) fn place(
        &mut self,
        config: &OrbitConfig,
        body: &CelestialBody,
        elapsed: f64,
        longitude: f64,
    ) {
        let latitude = oscillating_latitude(elapsed, config.frequency, config.amplitude);
        self.position = body.center + geo_to_cartesian(latitude, longitude, config.seeker_radius);
    }

    /// Turn toward the body center, closing `damping_step` of the gap.
    ///
    /// Returns `false` when the turn is undefined (seeker at the center, or
    /// heading parallel to the center direction) and the orientation was
    /// left untouched.
    pub(crate) fn turn(&mut self, config: &OrbitConfig, body: &CelestialBody) -> bool {
        let Some(to_center) = body.direction_to_center(self.position) else {
            return false;
        };
        let Some(delta) = turn_toward(self.direction, to_center) else {
            return false;
        };

        let target = match config.direction_mode {
            DirectionMode::Fixed => delta,
            DirectionMode::Accumulate => (delta * self.orientation).normalize(),
        };
        self.orientation = damped_blend(self.orientation, target, config.damping_step);

        if config.direction_mode == DirectionMode::Accumulate {
            self.direction = (self.orientation * MODEL_FORWARD).normalize();
        }
        true
    }
}
