//! Local-to-world transform of an authored path.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Translation, rotation and scale placing a path's curves in the world.
///
/// Directions are rotated only, matching how curve tangents and up vectors
/// are carried into world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTransform {
    /// World position of the local origin.
    pub translation: Vec3,
    /// World rotation of the local axes.
    pub rotation: Quat,
    /// Per-axis scale applied before rotating.
    pub scale: Vec3,
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl WorldTransform {
    /// Local space equals world space.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// A pure translation.
    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Builder-style rotation override.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder-style scale override.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Carry a local point into world space.
    #[must_use]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * (local * self.scale)
    }

    /// Rotate a local direction into world space.
    #[must_use]
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// Inverse of [`Self::transform_point`]. Zero scale axes map to zero.
    #[must_use]
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        let unrotated = self.rotation.inverse() * (world - self.translation);
        let inverse_scale = Vec3::new(
            safe_recip(self.scale.x),
            safe_recip(self.scale.y),
            safe_recip(self.scale.z),
        );
        unrotated * inverse_scale
    }
}

const fn safe_recip(value: f32) -> f32 {
    if value.abs() <= f32::EPSILON {
        0.0
    } else {
        value.recip()
    }
}
