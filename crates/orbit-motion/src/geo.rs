//! Sphere geometry: the celestial body, geographic-to-Cartesian conversion,
//! and guarded normalization.

use glam::DVec3;

/// Vectors shorter than this are treated as zero and never normalized.
pub const NORMALIZE_EPSILON: f64 = 1e-9;

/// The fixed sphere everything orbits. Immutable for the controller's purposes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CelestialBody {
    /// Center of the sphere.
    pub center: DVec3,
    /// Radius of the rendered sphere.
    pub radius: f64,
}

impl CelestialBody {
    /// Create a body at `center` with the given radius.
    pub fn new(center: DVec3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Unit vector from `point` toward the center, if `point` is off-center.
    pub fn direction_to_center(&self, point: DVec3) -> Option<DVec3> {
        try_normalize(self.center - point)
    }

    /// Unit vector from the center toward `point` ("up" at that point).
    pub fn up_at(&self, point: DVec3) -> Option<DVec3> {
        try_normalize(point - self.center)
    }

    /// Distance of `point` from the center.
    pub fn distance(&self, point: DVec3) -> f64 {
        (point - self.center).length()
    }
}

/// Normalize `v`, or `None` when it is too short to carry a direction.
#[inline]
pub fn try_normalize(v: DVec3) -> Option<DVec3> {
    let len = v.length();
    if len.is_finite() && len > NORMALIZE_EPSILON {
        Some(v / len)
    } else {
        None
    }
}

/// Normalize `v`, substituting `fallback` when it is degenerate.
#[inline]
pub fn normalize_or(v: DVec3, fallback: DVec3) -> DVec3 {
    try_normalize(v).unwrap_or(fallback)
}

/// Latitude in degrees at `elapsed` seconds: `sin(t * frequency) * amplitude`.
#[inline]
pub fn oscillating_latitude(elapsed: f64, frequency: f64, amplitude: f64) -> f64 {
    (elapsed * frequency).sin() * amplitude
}

/// Convert latitude/longitude (degrees) and radius to a body-relative point.
///
/// Longitude is shifted by 180 degrees and X is mirrored, so `(0, 0)` lands
/// on +X and longitude increases toward -Z.
pub fn geo_to_cartesian(latitude: f64, longitude: f64, radius: f64) -> DVec3 {
    let phi = latitude.to_radians();
    let theta = (longitude - 180.0).to_radians();

    DVec3::new(
        -radius * phi.cos() * theta.cos(),
        radius * phi.sin(),
        radius * phi.cos() * theta.sin(),
    )
}
