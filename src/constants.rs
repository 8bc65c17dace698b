//! Traversal tuning constants shared across systems.
//!
//! Per-path values live in [`crate::path::PathSettings`]; these are the
//! defaults and the fixed numeric policies every path shares.

/// Grid that `eval` is snapped onto so boundary checks stay exact.
pub const EVAL_PRECISION: f32 = 0.001;
/// Parameter step used for secant directions and curvature sampling.
pub const SAMPLE_DELTA: f32 = 0.01;
/// Segments summed when measuring a curve's arc length.
pub const ARC_LENGTH_SAMPLES: usize = 100;
/// Tangents shorter than this fall back to a secant direction.
pub const TANGENT_EPSILON: f32 = 1e-6;
/// Samples per curve segment for the coarse nearest-point pass.
pub const NEAREST_POINT_SAMPLES_PER_SEGMENT: usize = 16;
/// Ternary search steps refining the nearest-point estimate.
pub const NEAREST_POINT_REFINE_ITERATIONS: usize = 24;

/// Seconds spent arcing onto a path after entering it.
pub const ANCHOR_DURATION: f32 = 0.75;
/// Height of the entry arc above the straight line.
pub const ANCHOR_PEAK_HEIGHT: f32 = 1.0;
/// Seconds spent on a built-in arc jump between paths.
pub const TRANSITION_DURATION: f32 = 0.6;
/// Height of the hand-off arc above the straight line.
pub const TRANSITION_PEAK_HEIGHT: f32 = 1.5;

/// World units per second.
pub const DEFAULT_TRAVERSAL_SPEED: f32 = 10.0;
/// Fraction of the linear speed kept at the sharpest sampled turn.
pub const DEFAULT_ANGULAR_SPEED_MODIFIER: f32 = 0.5;
/// Tangent angle (degrees) at which the speed modifier fully applies.
pub const DEFAULT_SPEED_MODIFIER_MAX_ANGLE: f32 = 30.0;
/// Distance kept from the curve while orbiting.
pub const DEFAULT_ORBITAL_RADIUS: f32 = 1.0;
/// Degrees per second.
pub const DEFAULT_ORBITAL_ANGULAR_SPEED: f32 = 30.0;
/// World distance within which a connection is taken.
pub const DEFAULT_CAPTURE_DISTANCE: f32 = 2.0;
/// Radius of the hand-off look-at sweep.
pub const DEFAULT_INTERACTION_RANGE: f32 = 5.0;
/// Upward speed when jumping off a path.
pub const DEFAULT_JUMP_SPEED: f32 = 10.0;

/// Reach of the camera look-at query used for hand-offs.
pub const LOOK_AT_DISTANCE: f32 = 30.0;
/// Reach and radius of the look-at query used to discover entry points.
pub const ENTRY_LOOK_AT_DISTANCE: f32 = 5.0;
/// Radius of the entry look-at sweep.
pub const ENTRY_LOOK_AT_RADIUS: f32 = 0.5;

/// Curve directions steeper than this treat input as climbing.
pub const VERTICAL_THRESHOLD: f32 = 0.7;
/// Minimum input alignment that counts as pushing along the curve.
pub const INPUT_ALIGNMENT_THRESHOLD: f32 = 0.7;
/// Default rate at which the character turns toward the camera direction.
pub const DEFAULT_ORIENTATION_SHARPNESS: f32 = 10.0;
/// Downward acceleration used by the headless motor's gravity correction.
pub const GRAVITY: f32 = -30.0;
