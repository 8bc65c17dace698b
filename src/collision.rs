//! Collision validation of tentative traversal steps.
//!
//! A step is computed on a scratch copy of the actor's data. The motor is
//! asked what the character would overlap at the resulting placement, and
//! the step is only committed when nothing but the path's own geometry is in
//! the way.

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::TraversalData;
use crate::motor::Motor;
use crate::path::Path;
use crate::placement::{evaluate_placement, place, Placement};
use crate::progress::integrate;

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Lowest corner.
    pub min: Vec3,
    /// Highest corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box around `center`; negative extents are mirrored.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Point inside or on the box closest to `point`.
    #[must_use]
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min, self.max)
    }

    /// Strict overlap with a sphere; touching surfaces do not count.
    #[must_use]
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) < radius * radius
    }
}

/// Result of a guarded traversal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step was written into the actor's data.
    Committed,
    /// The step would overlap foreign geometry; the data is unchanged.
    Blocked,
}

/// True when the character would overlap geometry not owned by `path` at
/// `placement`.
#[must_use]
pub fn collides_at<M: Motor + ?Sized>(motor: &M, path: &Path, placement: &Placement) -> bool {
    motor
        .collisions_overlap(placement.world_position, motor.transient_rotation())
        .iter()
        .any(|overlap| overlap.owner != Some(path.id()))
}

/// Advance `data` by one tick if the resulting placement is free.
///
/// Collision checks are skipped for paths that disable them.
pub fn guarded_step<M: Motor + ?Sized>(
    path: &Path,
    motor: &M,
    data: &mut TraversalData,
    dt: f32,
) -> StepOutcome {
    let mut scratch = integrate(path, data, dt);
    if path.settings().check_for_collisions {
        let placement = evaluate_placement(path, scratch.eval, scratch.orbital_angle);
        if collides_at(motor, path, &placement) {
            debug!("step on {} to eval {} blocked", path.id(), scratch.eval);
            return StepOutcome::Blocked;
        }
        scratch.apply_placement(&placement);
    } else {
        place(path, &mut scratch);
    }
    *data = scratch;
    StepOutcome::Committed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::motor::{ColliderId, KinematicMotor, StaticCollider};
    use crate::path::{PathId, PathSettings};
    use crate::transform::WorldTransform;
    use rstest::rstest;

    fn rail(check_for_collisions: bool) -> Path {
        let curve = Curve::from_points([Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)], false)
            .expect("valid curve");
        Path::new(PathId(7), vec![curve], WorldTransform::IDENTITY)
            .expect("valid path")
            .with_settings(PathSettings {
                check_for_collisions,
                ..PathSettings::default()
            })
    }

    fn wall(owner: Option<PathId>) -> StaticCollider {
        StaticCollider {
            id: ColliderId(1),
            bounds: Aabb::from_center_half_extents(Vec3::new(6.0, 0.0, 0.0), Vec3::splat(0.5)),
            owner,
        }
    }

    fn moving_at(eval: f32) -> TraversalData {
        let mut data = TraversalData::at(eval);
        data.input.z = 1.0;
        data
    }

    #[rstest]
    #[case(Vec3::new(0.0, 0.0, 0.0), 1.0, false)]
    #[case(Vec3::new(1.4, 0.0, 0.0), 1.0, true)]
    #[case(Vec3::new(1.5, 0.0, 0.0), 1.0, false)]
    #[case(Vec3::new(0.0, 0.0, 0.0), 0.1, true)]
    fn sphere_overlap(#[case] center: Vec3, #[case] radius: f32, #[case] expected: bool) {
        let bounds = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        assert_eq!(bounds.intersects_sphere(center, radius), expected);
    }

    #[test]
    fn foreign_collider_blocks_step() {
        let path = rail(true);
        let motor = KinematicMotor::new(Vec3::ZERO, 0.5).with_colliders(vec![wall(None)]);
        let mut data = moving_at(0.55);
        let before = data;
        assert_eq!(guarded_step(&path, &motor, &mut data, 0.1), StepOutcome::Blocked);
        assert_eq!(data, before);
    }

    #[test]
    fn own_collider_does_not_block() {
        let path = rail(true);
        let motor = KinematicMotor::new(Vec3::ZERO, 0.5).with_colliders(vec![wall(Some(PathId(7)))]);
        let mut data = moving_at(0.55);
        assert_eq!(guarded_step(&path, &motor, &mut data, 0.1), StepOutcome::Committed);
        assert!(data.eval > 0.55);
    }

    #[test]
    fn disabled_checks_commit_through_walls() {
        let path = rail(false);
        let motor = KinematicMotor::new(Vec3::ZERO, 0.5).with_colliders(vec![wall(None)]);
        let mut data = moving_at(0.55);
        assert_eq!(guarded_step(&path, &motor, &mut data, 0.1), StepOutcome::Committed);
        assert!((data.position.x - 6.5).abs() < 1e-3);
    }
}
