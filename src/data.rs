//! Per-actor traversal state.

use glam::{Quat, Vec3};

use crate::placement::Placement;

/// Progress and computed placement of one actor on one path.
///
/// `eval` always sits on the precision grid in `[0, 1]` (see
/// [`crate::numeric::precise_eval_clamp01`]) so boundary checks compare
/// exactly. The struct is `Copy`: tentative steps work on a scratch copy that
/// is committed only once validated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TraversalData {
    /// Normalised progress along the active curve.
    pub eval: f32,
    /// Orbital angle around the curve in degrees, `[0, 360)`.
    pub orbital_angle: f32,
    /// Computed world rotation.
    pub rotation: Quat,
    /// Computed world position including orbital and local offsets.
    pub position: Vec3,
    /// Mapped traversal input: `z` along the curve, `x` around it.
    pub input: Vec3,
    /// Bare curve position in the path's local space.
    pub curve_local_position: Vec3,
    /// Bare curve position in world space.
    pub curve_world_position: Vec3,
}

impl TraversalData {
    /// Fresh data at progress `eval` with no placement computed yet.
    #[must_use]
    pub fn at(eval: f32) -> Self {
        Self {
            eval,
            ..Self::default()
        }
    }

    /// Copy a computed placement into this data.
    pub fn apply_placement(&mut self, placement: &Placement) {
        self.position = placement.world_position;
        self.rotation = placement.world_rotation;
        self.curve_local_position = placement.curve_local_position;
        self.curve_world_position = placement.curve_world_position;
    }

    /// True when mapped input asks for any movement.
    #[must_use]
    pub fn has_input(&self) -> bool {
        self.input.length_squared() > 0.0
    }
}
