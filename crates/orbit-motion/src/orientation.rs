//! Orientation helpers: turn-toward rotations, damped blending, and look-at
//! bases for models that face local +Z with local +Y up.

use glam::{DMat3, DQuat, DVec3};

use crate::geo::try_normalize;

/// Model-space forward axis.
pub const MODEL_FORWARD: DVec3 = DVec3::Z;

/// Model-space up axis. The model's belly is `-MODEL_UP`.
pub const MODEL_UP: DVec3 = DVec3::Y;

/// Rotation carrying unit vector `from` onto unit vector `to`.
///
/// Returns `None` when the two are parallel or opposite, since the cross
/// product then gives no usable axis.
pub fn turn_toward(from: DVec3, to: DVec3) -> Option<DQuat> {
    let axis = try_normalize(from.cross(to))?;
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    Some(DQuat::from_axis_angle(axis, angle))
}

/// Close `step` of the angular gap from `current` to `target`.
///
/// The result is renormalized so repeated blending never drifts off unit length.
pub fn damped_blend(current: DQuat, target: DQuat, step: f64) -> DQuat {
    current.slerp(target, step).normalize()
}

/// Orientation whose forward axis is `forward` and whose up axis is as close
/// to `up_hint` as possible.
///
/// `alt_up` is tried when `up_hint` is parallel to `forward`. Returns `None`
/// when neither hint disambiguates roll or `forward` is degenerate.
pub fn look_rotation(forward: DVec3, up_hint: DVec3, alt_up: DVec3) -> Option<DQuat> {
    let forward = try_normalize(forward)?;
    let right = [up_hint, alt_up]
        .into_iter()
        .find_map(|up| try_normalize(up.cross(forward)))?;
    let up = forward.cross(right);

    let basis = DMat3::from_cols(right, up, forward);
    Some(DQuat::from_mat3(&basis).normalize())
}

/// Whether `q` is a unit quaternion within `tolerance`.
pub fn is_unit(q: DQuat, tolerance: f64) -> bool {
    (q.length() - 1.0).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_turn_toward_maps_from_onto_to() {
        let from = DVec3::Z;
        let to = DVec3::new(-1.0, 0.0, 0.2).normalize();
        let q = turn_toward(from, to).unwrap();
        assert!((q * from - to).length() < TOL);
        assert!(is_unit(q, 1e-12));
    }

    #[test]
    fn test_turn_toward_parallel_is_none() {
        assert!(turn_toward(DVec3::Z, DVec3::Z).is_none());
        assert!(turn_toward(DVec3::Z, DVec3::NEG_Z).is_none());
    }

    #[test]
    fn test_damped_blend_halves_angle() {
        let target = DQuat::from_axis_angle(DVec3::Y, 1.2);
        let blended = damped_blend(DQuat::IDENTITY, target, 0.5);
        let residual = blended.angle_between(target);
        assert!((residual - 0.6).abs() < 1e-9, "residual = {residual}");
        assert!(is_unit(blended, 1e-12));
    }

    #[test]
    fn test_look_rotation_axes() {
        let forward = DVec3::new(1.0, 0.0, 0.0);
        let up = DVec3::new(0.0, 1.0, 0.0);
        let q = look_rotation(forward, up, DVec3::Z).unwrap();
        assert!((q * MODEL_FORWARD - forward).length() < TOL);
        assert!((q * MODEL_UP - up).length() < TOL);
        assert!(is_unit(q, 1e-12));
    }

    #[test]
    fn test_look_rotation_orthogonalizes_up() {
        let forward = DVec3::new(0.0, 0.0, 1.0);
        let hint = DVec3::new(0.0, 1.0, 1.0);
        let q = look_rotation(forward, hint, DVec3::X).unwrap();
        assert!((q * MODEL_UP - DVec3::Y).length() < TOL);
    }

    #[test]
    fn test_look_rotation_uses_alternate_up() {
        let q = look_rotation(DVec3::Y, DVec3::Y, DVec3::X).unwrap();
        assert!((q * MODEL_FORWARD - DVec3::Y).length() < TOL);
        assert!((q * MODEL_UP - DVec3::X).length() < TOL);
    }

    #[test]
    fn test_look_rotation_degenerate() {
        assert!(look_rotation(DVec3::ZERO, DVec3::Y, DVec3::X).is_none());
        assert!(look_rotation(DVec3::Y, DVec3::Y, DVec3::NEG_Y).is_none());
    }
}
