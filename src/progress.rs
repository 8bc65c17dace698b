//! Progress integration along the active curve.
//!
//! Linear speed is converted into a parameter delta using the cached world
//! length of the curve, and damped on bends: the sharper the angle between
//! the current tangent and the tangent one sample ahead, the closer the speed
//! gets to the path's `angular_speed_modifier`.

use crate::data::TraversalData;
use crate::numeric::{precise_eval_clamp01, precise_eval_wrap01};
use crate::orbital::advance_angle;
use crate::path::Path;
use crate::vector_math::angle_between_degrees;
use crate::SAMPLE_DELTA;

/// Speed factor for moving from `from` towards `to`.
///
/// Interpolates from `1.0` at a straight section down to the path's
/// `angular_speed_modifier` once the tangent angle reaches
/// `speed_modifier_max_angle`.
#[must_use]
pub fn damping_factor(path: &Path, from: f32, to: f32) -> f32 {
    let settings = path.settings();
    let angle = angle_between_degrees(path.forward(from), path.forward(to));
    let normalised = if settings.speed_modifier_max_angle > 0.0 {
        (angle / settings.speed_modifier_max_angle).clamp(0.0, 1.0)
    } else {
        1.0
    };
    1.0 + (settings.angular_speed_modifier - 1.0) * normalised
}

/// Parameter delta for one tick of `input` along the curve.
///
/// Zero at an open end when the input pushes outwards, and zero for zero
/// input.
///
/// [`advance_eval`] snaps the result onto the [`crate::EVAL_PRECISION`] grid,
/// so a delta below half a grid step is lost. On long paths a slow speed or
/// a high tick rate can therefore leave the actor standing still: a 400 unit
/// path at speed 10 ticked at 60 Hz moves 0.0004 per tick and never
/// advances.
#[must_use]
pub fn next_traversal_delta(path: &Path, t: f32, input: f32, dt: f32) -> f32 {
    if input == 0.0 {
        return 0.0;
    }
    if !path.is_closed() && ((t >= 1.0 && input >= 1.0) || (t <= 0.0 && input <= 0.0)) {
        return 0.0;
    }
    let world_length = path.world_length();
    if world_length <= f32::EPSILON {
        return 0.0;
    }
    let ahead = (t + SAMPLE_DELTA * input).clamp(0.0, 1.0);
    let damping = damping_factor(path, t, ahead);
    path.settings().speed * damping * dt * input / world_length
}

/// Advance `eval` by `delta`, wrapping on closed curves and snapping to the
/// precision grid.
#[must_use]
pub fn advance_eval(path: &Path, eval: f32, delta: f32) -> f32 {
    if path.is_closed() {
        precise_eval_wrap01(eval + delta)
    } else {
        precise_eval_clamp01(eval + delta)
    }
}

/// Integrate one tick: progress from `input.z`, orbital angle from `input.x`.
///
/// Only `eval` and `orbital_angle` change; placement is left for the caller.
#[must_use]
pub fn integrate(path: &Path, data: &TraversalData, dt: f32) -> TraversalData {
    let mut next = *data;
    let delta = next_traversal_delta(path, data.eval, data.input.z, dt);
    next.eval = advance_eval(path, data.eval, delta);
    if path.settings().allow_orbital_movement {
        next.orbital_angle = advance_angle(data.orbital_angle, path.settings(), data.input.x, dt);
    }
    next
}
