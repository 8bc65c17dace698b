//! Facing of a traversing character.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::motor::LayerMask;
use crate::vector_math::{look_rotation, slerp_direction};
use crate::{DEFAULT_ORIENTATION_SHARPNESS, GRAVITY};

/// Runtime tuning of the traversal state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Exponential rate at which the character turns towards the camera.
    pub orientation_sharpness: f32,
    /// Keep the character's up opposite to gravity.
    pub orient_towards_gravity: bool,
    /// Gravity direction and strength.
    pub gravity: Vec3,
    /// Layers considered when looking for paths.
    pub traversable_layers: LayerMask,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            orientation_sharpness: DEFAULT_ORIENTATION_SHARPNESS,
            orient_towards_gravity: false,
            gravity: Vec3::new(0.0, GRAVITY, 0.0),
            traversable_layers: LayerMask::TRAVERSABLE,
        }
    }
}

/// Turn `current` towards `look` by `1 - exp(-sharpness * dt)`.
///
/// A zero look direction or zero sharpness leaves the facing untouched.
#[must_use]
pub fn smoothed_rotation(
    current: Quat,
    look: Vec3,
    up: Vec3,
    config: &MachineConfig,
    dt: f32,
) -> Quat {
    let mut rotation = current;
    if look != Vec3::ZERO && config.orientation_sharpness > 0.0 {
        let blend = 1.0 - (-config.orientation_sharpness * dt).exp();
        let facing = slerp_direction(current * Vec3::Z, look, blend);
        rotation = look_rotation(facing, up);
    }
    if config.orient_towards_gravity {
        if let Some(against_gravity) = (-config.gravity).try_normalize() {
            rotation = Quat::from_rotation_arc(rotation * Vec3::Y, against_gravity) * rotation;
        }
    }
    rotation
}
