//! Per-frame motion controllers for the orbit and fan sketches.
//!
//! [`OrbitMotionController`] walks a seeker along a great circle around a
//! fixed body and steers a follower after it just above the surface.
//! [`SpinnerController`] drives the fan hub and its sway. Both are pure
//! functions of elapsed time and their own state; rendering is left to the
//! host.

mod controller;
mod error;
mod follower;
pub mod geo;
pub mod orientation;
mod seeker;
mod spinner;

pub use controller::{BodyTransform, OrbitFrame, OrbitMotionController, OrbitState};
pub use error::MotionError;
pub use follower::FollowerState;
pub use geo::CelestialBody;
pub use seeker::SeekerState;
pub use spinner::{SpinnerController, SpinnerPose};
