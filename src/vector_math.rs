//! Vector helpers for curve frames.
//! Angles between directions, plane projections, and look rotations built on `glam`.
use glam::{Mat3, Quat, Vec3};

/// Unsigned angle between two directions in degrees.
///
/// Returns `0.0` when either vector is zero or non-finite.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use railwalk::vector_math::angle_between_degrees;
/// let angle = angle_between_degrees(Vec3::X, Vec3::Y);
/// assert!((angle - 90.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn angle_between_degrees(from: Vec3, to: Vec3) -> f32 {
    let denominator = (from.length_squared() * to.length_squared()).sqrt();
    if !denominator.is_finite() || denominator <= f32::EPSILON {
        return 0.0;
    }
    let cosine = (from.dot(to) / denominator).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Signed angle from `from` to `to` about `axis`, in degrees within `(-180, 180]`.
#[must_use]
pub fn signed_angle_degrees(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let unsigned = angle_between_degrees(from, to);
    let sign = axis.dot(from.cross(to));
    if sign < 0.0 {
        -unsigned
    } else {
        unsigned
    }
}

/// Remove the component of `vector` along `normal`.
#[must_use]
pub fn project_on_plane(vector: Vec3, normal: Vec3) -> Vec3 {
    let length_squared = normal.length_squared();
    if length_squared <= f32::EPSILON {
        return vector;
    }
    vector - normal * (vector.dot(normal) / length_squared)
}

/// Rotation mapping local `+Z` onto `forward` and local `+Y` towards `up`.
///
/// Falls back to the shortest arc from `+Z` when `up` is parallel to
/// `forward`, and to the identity when `forward` is zero.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use railwalk::vector_math::look_rotation;
/// let rotation = look_rotation(Vec3::X, Vec3::Y);
/// assert!((rotation * Vec3::Z - Vec3::X).length() < 1e-5);
/// assert!((rotation * Vec3::Y - Vec3::Y).length() < 1e-5);
/// ```
#[must_use]
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(unit_forward) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    let Some(right) = up.cross(unit_forward).try_normalize() else {
        return Quat::from_rotation_arc(Vec3::Z, unit_forward);
    };
    let orthogonal_up = unit_forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, orthogonal_up, unit_forward)).normalize()
}

/// Spherically interpolate between two directions by `t`.
///
/// Returns a unit vector; zero inputs yield the other direction.
#[must_use]
pub fn slerp_direction(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let (Some(start), Some(end)) = (from.try_normalize(), to.try_normalize()) else {
        return normalize_or_zero(to);
    };
    let arc = Quat::from_rotation_arc(start, end);
    (Quat::IDENTITY.slerp(arc, t.clamp(0.0, 1.0)) * start).normalize_or_zero()
}

/// Returns the unit vector in the direction of `vector`, or zero.
///
/// Non-finite input also yields the zero vector.
#[must_use]
pub fn normalize_or_zero(vector: Vec3) -> Vec3 {
    if !vector.is_finite() {
        return Vec3::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Sign of `value` as used by input mapping: zero stays zero.
#[must_use]
pub const fn sign_or_zero(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
