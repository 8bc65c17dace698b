//! Per-path tuning and alignment policy.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::vector_math::look_rotation;
use crate::{
    DEFAULT_ANGULAR_SPEED_MODIFIER, DEFAULT_INTERACTION_RANGE, DEFAULT_JUMP_SPEED,
    DEFAULT_ORBITAL_ANGULAR_SPEED, DEFAULT_ORBITAL_RADIUS, DEFAULT_SPEED_MODIFIER_MAX_ANGLE,
    DEFAULT_TRAVERSAL_SPEED,
};

/// How a traversing actor is rotated relative to the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMode {
    /// Rotation is left to the path's own transform; no offset is applied.
    None,
    /// Forward and up follow the curve's direction and up vectors.
    #[default]
    CurveElement,
    /// Forward and up follow the path object's rotation.
    CurveObject,
}

/// Object axis treated as forward or up when aligning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignAxis {
    /// `+X`
    XAxis,
    /// `+Y`
    YAxis,
    /// `+Z`
    ZAxis,
    /// `-X`
    NegativeXAxis,
    /// `-Y`
    NegativeYAxis,
    /// `-Z`
    NegativeZAxis,
}

impl AlignAxis {
    /// Unit vector along the axis.
    #[must_use]
    pub const fn vector(self) -> Vec3 {
        match self {
            Self::XAxis => Vec3::X,
            Self::YAxis => Vec3::Y,
            Self::ZAxis => Vec3::Z,
            Self::NegativeXAxis => Vec3::NEG_X,
            Self::NegativeYAxis => Vec3::NEG_Y,
            Self::NegativeZAxis => Vec3::NEG_Z,
        }
    }
}

/// What a path does when progress reaches either end of an open curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryBehaviour {
    /// Remain pinned at the end.
    #[default]
    Stay,
    /// Leave traversal and hand control back to locomotion.
    Exit,
    /// Hop along the closest connection, if one is in range.
    FollowConnection,
}

/// Tuning values authored per path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Local offset applied in the aligned frame.
    pub offset: Vec3,
    /// Linear speed in world units per second.
    pub speed: f32,
    /// Speed fraction kept at the sharpest turn.
    pub angular_speed_modifier: f32,
    /// Tangent angle in degrees at which `angular_speed_modifier` fully applies.
    pub speed_modifier_max_angle: f32,
    /// Let sideways input swing the actor around the curve.
    pub allow_orbital_movement: bool,
    /// Distance from the curve while orbiting.
    pub orbital_radius: f32,
    /// Degrees per second.
    pub orbital_angular_speed: f32,
    /// How the actor is rotated relative to the path.
    pub alignment: AlignmentMode,
    /// Object axis treated as forward under [`AlignmentMode::CurveObject`].
    pub forward_axis: AlignAxis,
    /// Object axis treated as up under [`AlignmentMode::CurveObject`].
    pub up_axis: AlignAxis,
    /// Validate each step against environment overlaps.
    pub check_for_collisions: bool,
    /// Allow hand-offs to other paths looked at while traversing.
    pub allow_traversal_interaction: bool,
    /// Radius of the look-at sweep used to find hand-off targets.
    pub interaction_range: f32,
    /// Upward speed given to the actor when jumping off.
    pub jump_speed: f32,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            speed: DEFAULT_TRAVERSAL_SPEED,
            angular_speed_modifier: DEFAULT_ANGULAR_SPEED_MODIFIER,
            speed_modifier_max_angle: DEFAULT_SPEED_MODIFIER_MAX_ANGLE,
            allow_orbital_movement: false,
            orbital_radius: DEFAULT_ORBITAL_RADIUS,
            orbital_angular_speed: DEFAULT_ORBITAL_ANGULAR_SPEED,
            alignment: AlignmentMode::CurveElement,
            forward_axis: AlignAxis::ZAxis,
            up_axis: AlignAxis::YAxis,
            check_for_collisions: true,
            allow_traversal_interaction: true,
            interaction_range: DEFAULT_INTERACTION_RANGE,
            jump_speed: DEFAULT_JUMP_SPEED,
        }
    }
}

impl PathSettings {
    /// Rotation undoing the forward/up axis remap.
    ///
    /// Identity for the default `+Z` forward and `+Y` up assignment.
    #[must_use]
    pub fn axis_remap_rotation(&self) -> Quat {
        look_rotation(self.forward_axis.vector(), self.up_axis.vector()).inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_remap_is_identity() {
        let remap = PathSettings::default().axis_remap_rotation();
        assert_relative_eq!(remap.dot(Quat::IDENTITY).abs(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn remap_brings_chosen_forward_onto_z() {
        let settings = PathSettings {
            forward_axis: AlignAxis::XAxis,
            ..PathSettings::default()
        };
        let remapped = settings.axis_remap_rotation() * Vec3::X;
        assert_relative_eq!(remapped.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn settings_deserialise_with_defaults() {
        let settings: PathSettings =
            serde_json::from_str(r#"{ "speed": 4.0, "alignment": "curve_object" }"#)
                .expect("valid settings");
        assert_relative_eq!(settings.speed, 4.0);
        assert_eq!(settings.alignment, AlignmentMode::CurveObject);
        assert!(settings.check_for_collisions);
    }
}
