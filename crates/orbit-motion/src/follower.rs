//! The follower: a plane pulled toward the seeker while pinned to a shell
//! just inside its nominal orbit radius.

use glam::{DQuat, DVec3};
use orbit_config::OrbitConfig;
use serde::{Deserialize, Serialize};

use crate::geo::{CelestialBody, try_normalize};
use crate::orientation::{MODEL_UP, look_rotation};

/// Mutable follower state carried across frames.
///
/// The orientation is rebuilt from scratch whenever the follower moves; it is
/// stored only so a stationary follower keeps its last pose.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FollowerState {
    /// Position on the clamp shell.
    pub position: DVec3,
    /// Look-at orientation from the last frame the follower moved.
    pub orientation: DQuat,
}

/// Distance from the body center the follower is pinned to.
#[inline]
pub fn clamp_radius(config: &OrbitConfig) -> f64 {
    config.follower_radius - config.clamp_epsilon
}

/// Project `point` onto the clamp shell around `body`.
///
/// When `point` coincides with the center, the radial direction of
/// `fallback` is used instead; if that is degenerate too, body "up" (+Y).
pub fn clamp_to_shell(
    point: DVec3,
    fallback: DVec3,
    body: &CelestialBody,
    config: &OrbitConfig,
) -> DVec3 {
    let radial = body
        .up_at(point)
        .or_else(|| body.up_at(fallback))
        .unwrap_or(MODEL_UP);
    body.center + radial * clamp_radius(config)
}

impl FollowerState {
    /// Follower at the configured start point, projected onto its shell.
    pub fn initial(config: &OrbitConfig, body: &CelestialBody) -> Self {
        let start = DVec3::from_array(config.follower_start);
        Self {
            position: clamp_to_shell(start, start, body, config),
            orientation: DQuat::IDENTITY,
        }
    }

    /// Pull toward the body center and the seeker, clamp to the shell, and
    /// face the realized direction of travel.
    ///
    /// Returns the heading for this frame, or `None` when the follower did not
    /// move (its orientation is then left untouched).
    pub(crate) fn step(
        &mut self,
        config: &OrbitConfig,
        body: &CelestialBody,
        seeker_position: DVec3,
    ) -> Option<DVec3> {
        let previous = self.position;

        let to_center = body.direction_to_center(previous).unwrap_or(DVec3::ZERO);
        // Deliberately not normalized: the pull grows with distance.
        let to_seeker = seeker_position - previous;
        let pulled = previous + to_center * config.pull_strength + to_seeker * config.pull_strength;

        self.position = clamp_to_shell(pulled, previous, body, config);

        let heading = try_normalize(self.position - previous)?;
        let anti_gravity = body.up_at(self.position).unwrap_or(MODEL_UP);
        let away_from_seeker = try_normalize(self.position - seeker_position).unwrap_or(heading);

        if let Some(orientation) = look_rotation(heading, anti_gravity, away_from_seeker) {
            self.orientation = orientation;
        }
        Some(heading)
    }
}
