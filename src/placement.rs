//! Placement evaluation: where an actor at a given progress stands and how it
//! is rotated.
//!
//! Placement is a pure function of the path and `(eval, orbital_angle)`;
//! calling it twice with the same inputs yields identical results.

use glam::{Quat, Vec3};

use crate::data::TraversalData;
use crate::numeric::{precise_eval_clamp01, precise_eval_wrap01};
use crate::orbital::{orbital_angle_at, orbital_offset};
use crate::path::{AlignmentMode, Path};
use crate::vector_math::look_rotation;

/// Computed placement on a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Where the actor stands, offsets included.
    pub world_position: Vec3,
    /// How the actor is rotated.
    pub world_rotation: Quat,
    /// Bare curve position in the path's local space.
    pub curve_local_position: Vec3,
    /// Bare curve position in world space.
    pub curve_world_position: Vec3,
}

/// Placement at `eval` with the actor orbiting at `orbital_angle`.
///
/// Orbital movement only applies when the path enables it and aligns to the
/// curve or object. The local offset is rotated into the aligned frame and
/// added after the orbital offset; the sum is then carried to world space.
#[must_use]
pub fn evaluate_placement(path: &Path, eval: f32, orbital_angle: f32) -> Placement {
    let settings = path.settings();
    let transform = path.transform();
    let curve_local_position = path.active_curve().evaluate_position(eval);
    let curve_world_position = transform.transform_point(curve_local_position);

    let local_rotation = match settings.alignment {
        AlignmentMode::None => {
            return Placement {
                world_position: curve_world_position,
                world_rotation: path.world_rotation(),
                curve_local_position,
                curve_world_position,
            };
        }
        AlignmentMode::CurveElement => {
            let curve = path.active_curve();
            look_rotation(curve.direction(eval), curve.evaluate_up(eval))
                * settings.axis_remap_rotation()
        }
        AlignmentMode::CurveObject => settings.axis_remap_rotation(),
    };

    let mut local_position = curve_local_position;
    if settings.allow_orbital_movement {
        local_position += orbital_offset(path, eval, orbital_angle);
    }
    local_position += local_rotation * settings.offset;

    Placement {
        world_position: transform.transform_point(local_position),
        world_rotation: (path.world_rotation() * local_rotation).normalize(),
        curve_local_position,
        curve_world_position,
    }
}

/// Recompute the placement stored in `data` from its progress and angle.
pub fn place(path: &Path, data: &mut TraversalData) {
    let placement = evaluate_placement(path, data.eval, data.orbital_angle);
    data.apply_placement(&placement);
}

/// Snap `world_point` onto the active curve of `path`.
///
/// The nearest parameter is snapped onto the eval grid, the orbital angle is taken
/// from the point's position around the curve, and the placement follows.
#[must_use]
pub fn evaluate_at_point(path: &Path, world_point: Vec3) -> TraversalData {
    let local = path.transform().inverse_transform_point(world_point);
    let (_, t) = path.active_curve().nearest_point(local);
    let eval = if path.is_closed() {
        precise_eval_wrap01(t)
    } else {
        precise_eval_clamp01(t)
    };
    let mut data = TraversalData {
        eval,
        orbital_angle: orbital_angle_at(path, eval, world_point),
        ..TraversalData::default()
    };
    place(path, &mut data);
    data
}
