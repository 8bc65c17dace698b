//! Player input as seen by traversal, and its mapping onto a path.

use glam::{Quat, Vec3};

use crate::data::TraversalData;
use crate::path::Path;
use crate::vector_math::sign_or_zero;
use crate::{INPUT_ALIGNMENT_THRESHOLD, VERTICAL_THRESHOLD};

/// One tick of player input together with the camera state it was read in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    /// Raw stick input: `x` sideways, `z` forwards.
    pub move_input: Vec3,
    /// Camera forward flattened onto the ground plane.
    pub camera_planar_direction: Vec3,
    /// Rotation from `+Z` onto `camera_planar_direction`.
    pub camera_planar_rotation: Quat,
    /// `move_input` rotated into the camera's planar frame.
    pub world_planar_input: Vec3,
    /// Origin of look-at queries.
    pub camera_position: Vec3,
    /// Direction of look-at queries.
    pub camera_forward: Vec3,
    /// Jump was pressed this tick.
    pub jump_performed: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            move_input: Vec3::ZERO,
            camera_planar_direction: Vec3::Z,
            camera_planar_rotation: Quat::IDENTITY,
            world_planar_input: Vec3::ZERO,
            camera_position: Vec3::ZERO,
            camera_forward: Vec3::Z,
            jump_performed: false,
        }
    }
}

impl InputSnapshot {
    /// Snapshot for stick input `move_input` read through a camera facing
    /// `camera_planar_direction` on the ground plane.
    #[must_use]
    pub fn from_camera(move_input: Vec3, camera_planar_direction: Vec3) -> Self {
        let direction = camera_planar_direction.try_normalize().unwrap_or(Vec3::Z);
        let rotation = Quat::from_rotation_arc(Vec3::Z, direction);
        Self {
            move_input,
            camera_planar_direction: direction,
            camera_planar_rotation: rotation,
            world_planar_input: rotation * move_input,
            camera_forward: direction,
            ..Self::default()
        }
    }

    /// Set whether jump was pressed.
    #[must_use]
    pub const fn with_jump(mut self, jump_performed: bool) -> Self {
        self.jump_performed = jump_performed;
        self
    }

    /// Override where look-at queries start and point.
    #[must_use]
    pub const fn with_camera(mut self, position: Vec3, forward: Vec3) -> Self {
        self.camera_position = position;
        self.camera_forward = forward;
        self
    }
}

/// Map stick input onto the path at the actor's current progress.
///
/// `z` becomes `+1`, `-1` or `0` depending on how well the input lines up
/// with the path's world direction. On steep sections the forward stick
/// axis is used directly. With orbital movement enabled, `x` steers around
/// the curve.
#[must_use]
pub fn map_traversal_input(path: &Path, data: &TraversalData, input: &InputSnapshot) -> Vec3 {
    let forward = path
        .transform()
        .transform_direction(path.boundary_forward(data.eval))
        .normalize_or_zero();

    let alignment = if forward.y.abs() > VERTICAL_THRESHOLD {
        input.move_input.z * sign_or_zero(forward.y)
    } else {
        input.world_planar_input.dot(forward)
    };

    let z = if alignment > INPUT_ALIGNMENT_THRESHOLD {
        1.0
    } else if alignment < -INPUT_ALIGNMENT_THRESHOLD {
        -1.0
    } else {
        0.0
    };
    let x = if path.settings().allow_orbital_movement {
        -sign_or_zero(input.move_input.x)
    } else {
        0.0
    };
    Vec3::new(x, 0.0, z)
}
