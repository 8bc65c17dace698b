//! Orbital movement around the curve.
//!
//! An actor on a path with orbital movement enabled can circle the curve at
//! `orbital_radius`. The angle is measured about the curve direction, starting
//! from the curve's up vector.

use glam::{Quat, Vec3};

use crate::numeric::wrap_degrees;
use crate::path::{Path, PathSettings};
use crate::vector_math::{project_on_plane, signed_angle_degrees};

/// Change in orbital angle for one tick of sideways input.
#[must_use]
pub const fn angle_delta(settings: &PathSettings, input_x: f32, dt: f32) -> f32 {
    settings.orbital_angular_speed * dt * input_x
}

/// Advance `angle` by one tick of input, wrapped into `[0, 360)`.
///
/// # Examples
/// ```
/// use railwalk::orbital::advance_angle;
/// use railwalk::path::PathSettings;
/// let settings = PathSettings { orbital_angular_speed: 20.0, ..PathSettings::default() };
/// assert!((advance_angle(350.0, &settings, 1.0, 1.0) - 10.0).abs() < 1e-4);
/// ```
#[must_use]
pub fn advance_angle(angle: f32, settings: &PathSettings, input_x: f32, dt: f32) -> f32 {
    wrap_degrees(angle + angle_delta(settings, input_x, dt))
}

/// Local-space offset from the curve at `t` for an orbital `angle` in degrees.
///
/// The curve's up vector is rotated about its direction and scaled by the
/// path's orbital radius.
#[must_use]
pub fn orbital_offset(path: &Path, t: f32, angle: f32) -> Vec3 {
    let curve = path.active_curve();
    let forward = curve.direction(t);
    let up = curve.evaluate_up(t);
    Quat::from_axis_angle(forward, angle.to_radians()) * (up * path.settings().orbital_radius)
}

/// Orbital angle of `world_point` around the curve at `t`, in `[0, 360)`.
///
/// The point is projected onto the plane normal to the world direction at
/// `t`; the angle is measured from the world up vector.
#[must_use]
pub fn orbital_angle_at(path: &Path, t: f32, world_point: Vec3) -> f32 {
    let transform = path.transform();
    let forward = transform
        .transform_direction(path.boundary_forward(t))
        .normalize_or_zero();
    let up = path.world_up(t);
    let to_point = world_point - path.evaluate_world_position(t);
    let projected = project_on_plane(to_point, forward);
    wrap_degrees(signed_angle_degrees(up, projected, forward))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::path::PathId;
    use crate::transform::WorldTransform;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn rail() -> Path {
        let curve = Curve::from_points([Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)], false)
            .expect("valid curve");
        Path::new(PathId(1), vec![curve], WorldTransform::IDENTITY)
            .expect("valid path")
            .with_settings(PathSettings {
                allow_orbital_movement: true,
                orbital_radius: 2.0,
                orbital_angular_speed: 20.0,
                ..PathSettings::default()
            })
    }

    #[rstest]
    #[case(350.0, 1.0, 10.0)]
    #[case(10.0, -1.0, 350.0)]
    #[case(90.0, 0.0, 90.0)]
    fn angle_wraps(#[case] start: f32, #[case] input: f32, #[case] expected: f32) {
        let settings = rail().settings().clone();
        assert_relative_eq!(advance_angle(start, &settings, input, 1.0), expected, epsilon = 1e-4);
    }

    #[test]
    fn zero_angle_offsets_along_up() {
        let offset = orbital_offset(&rail(), 0.5, 0.0);
        assert_relative_eq!(offset.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(offset.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn quarter_turn_offsets_sideways() {
        // Rotating +Y about +Z by 90 degrees lands on -X.
        let offset = orbital_offset(&rail(), 0.5, 90.0);
        assert_relative_eq!(offset.x, -2.0, epsilon = 1e-5);
        assert_relative_eq!(offset.y, 0.0, epsilon = 1e-5);
    }

    #[rstest]
    #[case(0.0)]
    #[case(45.0)]
    #[case(200.0)]
    #[case(315.0)]
    fn angle_at_inverts_offset(#[case] angle: f32) {
        let path = rail();
        for t in [0.0, 0.5, 1.0] {
            let point = path.evaluate_world_position(t) + orbital_offset(&path, t, angle);
            let recovered = orbital_angle_at(&path, t, point);
            let difference = wrap_degrees(recovered - angle + 180.0) - 180.0;
            assert!(difference.abs() < 1e-2, "t={t} angle={angle} got {recovered}");
        }
    }
}
