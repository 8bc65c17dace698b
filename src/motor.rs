//! Motor collaborator interface and an in-memory kinematic implementation.
//!
//! Traversal never touches physics directly. It writes intended positions and
//! rotations through [`Motor`] and asks it for overlaps at candidate
//! placements. [`KinematicMotor`] keeps that state in memory for headless
//! simulation and tests.

use glam::{Quat, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::collision::Aabb;
use crate::path::PathId;

/// Identifier of an environment collider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColliderId(pub u64);

/// Bit set of interaction layers used to filter queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches nothing.
    pub const NONE: Self = Self(0);
    /// Layer paths live on by default.
    pub const TRAVERSABLE: Self = Self(1);
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// True when the masks share a layer.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::TRAVERSABLE
    }
}

/// A collider reported by an overlap query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    /// Collider that would be overlapped.
    pub collider: ColliderId,
    /// Path whose geometry the collider belongs to, if any.
    pub owner: Option<PathId>,
}

/// Character motor driven by the traversal state machine.
///
/// Implementations wrap whatever kinematic controller the host uses. All
/// methods are called from the single simulation thread.
pub trait Motor {
    /// Position being simulated this tick.
    fn transient_position(&self) -> Vec3;
    /// Rotation being simulated this tick.
    fn transient_rotation(&self) -> Quat;
    /// Position at the start of the current simulation step.
    fn initial_simulation_position(&self) -> Vec3;
    /// The character's current up direction.
    fn character_up(&self) -> Vec3;
    /// True while the character stands on walkable ground.
    fn is_stable_on_ground(&self) -> bool;
    /// Teleport the character.
    fn set_position(&mut self, position: Vec3);
    /// Move the character within the current step.
    fn set_transient_position(&mut self, position: Vec3);
    /// Rotate the character.
    fn set_rotation(&mut self, rotation: Quat);
    /// Colliders the character would overlap at `position` and `rotation`.
    fn collisions_overlap(&self, position: Vec3, rotation: Quat) -> Vec<Overlap>;
    /// Toggle collisions of the character capsule.
    fn set_capsule_collisions(&mut self, enabled: bool);
    /// Toggle depenetration of the character's own movement.
    fn set_movement_collision_solving(&mut self, enabled: bool);
    /// Toggle ground probing and snapping.
    fn set_ground_solving(&mut self, enabled: bool);
    /// False once the character has been destroyed.
    fn is_alive(&self) -> bool;
}

/// Static box collider owned by the environment or a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticCollider {
    /// Identifier reported in overlaps.
    pub id: ColliderId,
    /// World-space extent.
    pub bounds: Aabb,
    /// Path the collider belongs to; its own path never blocks on it.
    #[serde(default)]
    pub owner: Option<PathId>,
}

/// In-memory motor approximating the character as a sphere.
#[derive(Debug, Clone)]
pub struct KinematicMotor {
    position: Vec3,
    rotation: Quat,
    initial_position: Vec3,
    up: Vec3,
    radius: f32,
    grounded: bool,
    alive: bool,
    capsule_collisions: bool,
    movement_solving: bool,
    ground_solving: bool,
    colliders: Vec<StaticCollider>,
}

impl KinematicMotor {
    /// Motor at `position` with a collision sphere of `radius`.
    #[must_use]
    pub const fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            initial_position: position,
            up: Vec3::Y,
            radius,
            grounded: true,
            alive: true,
            capsule_collisions: true,
            movement_solving: true,
            ground_solving: true,
            colliders: Vec::new(),
        }
    }

    /// Replace the colliders overlap queries test against.
    #[must_use]
    pub fn with_colliders(mut self, colliders: Vec<StaticCollider>) -> Self {
        self.colliders = colliders;
        self
    }

    /// Latch the current position as the start of a new simulation step.
    pub const fn begin_tick(&mut self) {
        self.initial_position = self.position;
    }

    /// Report the character as standing on ground or not.
    pub const fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Mark the character as destroyed.
    pub const fn destroy(&mut self) {
        self.alive = false;
    }

    /// Add one collider to the overlap set.
    pub fn add_collider(&mut self, collider: StaticCollider) {
        self.colliders.push(collider);
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Current rotation.
    #[must_use]
    pub const fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Whether capsule, movement and ground solving are all enabled.
    #[must_use]
    pub const fn solving_enabled(&self) -> bool {
        self.capsule_collisions && self.movement_solving && self.ground_solving
    }

    /// Whether capsule, movement and ground solving are all disabled.
    #[must_use]
    pub const fn solving_disabled(&self) -> bool {
        !self.capsule_collisions && !self.movement_solving && !self.ground_solving
    }
}

impl Motor for KinematicMotor {
    fn transient_position(&self) -> Vec3 {
        self.position
    }

    fn transient_rotation(&self) -> Quat {
        self.rotation
    }

    fn initial_simulation_position(&self) -> Vec3 {
        self.initial_position
    }

    fn character_up(&self) -> Vec3 {
        self.up
    }

    fn is_stable_on_ground(&self) -> bool {
        self.grounded && self.ground_solving
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.initial_position = position;
    }

    fn set_transient_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn collisions_overlap(&self, position: Vec3, _rotation: Quat) -> Vec<Overlap> {
        self.colliders
            .iter()
            .filter(|c| c.bounds.intersects_sphere(position, self.radius))
            .map(|c| Overlap {
                collider: c.id,
                owner: c.owner,
            })
            .collect()
    }

    fn set_capsule_collisions(&mut self, enabled: bool) {
        debug!("capsule collisions {}", if enabled { "on" } else { "off" });
        self.capsule_collisions = enabled;
    }

    fn set_movement_collision_solving(&mut self, enabled: bool) {
        self.movement_solving = enabled;
    }

    fn set_ground_solving(&mut self, enabled: bool) {
        self.ground_solving = enabled;
    }

    fn is_alive(&self) -> bool {
        self.alive
    }
}
