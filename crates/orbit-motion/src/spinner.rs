//! The windmill sketch: a three-winged hub that spins, speeds up while the
//! pointer is held, and sways on its strut.

use std::f64::consts::TAU;

use glam::DQuat;
use orbit_config::SpinnerConfig;
use serde::Serialize;
use tracing::debug;

use crate::MotionError;

/// Hub and fan-group pose for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpinnerPose {
    /// Elapsed seconds this pose was computed for.
    pub elapsed: f64,
    /// Spin speed in effect this frame (rad/s).
    pub rotation_speed: f64,
    /// Hub angle about its Z axis: `elapsed * rotation_speed`.
    pub spinner_angle: f64,
    /// Fan-group yaw about Y.
    pub sway_yaw: f64,
    /// Hub rotation as a quaternion.
    pub hub_rotation: DQuat,
    /// Fan-group rotation as a quaternion.
    pub fan_rotation: DQuat,
}

/// Per-frame controller for the windmill sketch.
#[derive(Debug, Clone)]
pub struct SpinnerController {
    config: SpinnerConfig,
    rotation_speed: f64,
    boosting: bool,
}

impl SpinnerController {
    /// Build a controller spinning at the base speed.
    pub fn new(config: SpinnerConfig) -> Result<Self, MotionError> {
        if config.wing_count == 0 {
            return Err(MotionError::invalid("wing_count", "must be at least 1"));
        }
        let finite = [
            config.base_speed,
            config.boost_speed,
            config.sway_frequency,
            config.sway_amplitude,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(MotionError::invalid("spinner", "all values must be finite"));
        }

        Ok(Self {
            rotation_speed: config.base_speed,
            boosting: false,
            config,
        })
    }

    /// Static angular offset of each wing around the hub.
    pub fn wing_angles(&self) -> Vec<f64> {
        let n = self.config.wing_count;
        (0..n).map(|i| TAU / n as f64 * i as f64).collect()
    }

    /// Spin speed in effect after the last frame.
    pub fn rotation_speed(&self) -> f64 {
        self.rotation_speed
    }

    /// Compute the pose at `elapsed` seconds.
    ///
    /// While `pointer_active` the hub runs at the boost speed; on release it
    /// drops straight back to the base speed. The hub angle is always
    /// `elapsed * speed`, so switching speeds makes the hub jump.
    pub fn advance(&mut self, elapsed: f64, pointer_active: bool) -> SpinnerPose {
        if pointer_active != self.boosting {
            debug!(boost = pointer_active, elapsed, "spinner speed changed");
            self.boosting = pointer_active;
        }
        self.rotation_speed = if pointer_active {
            self.config.boost_speed
        } else {
            self.config.base_speed
        };

        let spinner_angle = elapsed * self.rotation_speed;
        let sway_yaw = (elapsed * self.config.sway_frequency).sin() * self.config.sway_amplitude;

        SpinnerPose {
            elapsed,
            rotation_speed: self.rotation_speed,
            spinner_angle,
            sway_yaw,
            hub_rotation: DQuat::from_rotation_z(spinner_angle),
            fan_rotation: DQuat::from_rotation_y(sway_yaw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_speed_spin() {
        let mut spinner = SpinnerController::new(SpinnerConfig::default()).unwrap();
        let pose = spinner.advance(4.0, false);
        assert_eq!(pose.rotation_speed, 0.25);
        assert!((pose.spinner_angle - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pointer_boost_and_snap_back() {
        let mut spinner = SpinnerController::new(SpinnerConfig::default()).unwrap();
        assert_eq!(spinner.advance(1.0, true).rotation_speed, 10.0);
        assert_eq!(spinner.rotation_speed(), 10.0);
        // Release: no easing back down.
        assert_eq!(spinner.advance(1.1, false).rotation_speed, 0.25);
    }

    #[test]
    fn test_sway_bounded() {
        let mut spinner = SpinnerController::new(SpinnerConfig::default()).unwrap();
        for i in 0..400 {
            let pose = spinner.advance(i as f64 * 0.05, i % 7 == 0);
            assert!(pose.sway_yaw.abs() <= 0.3 + 1e-12);
            assert!((pose.fan_rotation.length() - 1.0).abs() < 1e-9);
            assert!((pose.hub_rotation.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wing_angles_evenly_spaced() {
        let spinner = SpinnerController::new(SpinnerConfig::default()).unwrap();
        let angles = spinner.wing_angles();
        assert_eq!(angles.len(), 3);
        assert_eq!(angles[0], 0.0);
        assert!((angles[1] - TAU / 3.0).abs() < 1e-12);
        assert!((angles[2] - 2.0 * TAU / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_wings_rejected() {
        let config = SpinnerConfig {
            wing_count: 0,
            ..SpinnerConfig::default()
        };
        assert!(matches!(
            SpinnerController::new(config),
            Err(MotionError::InvalidConfig { field: "wing_count", .. })
        ));
    }
}
