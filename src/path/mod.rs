//! Authored traversal paths.
//!
//! A [`Path`] owns one or more curves (one active at a time), the transform
//! placing them in the world, its tuning, its outgoing connections, and the
//! policy objects deciding entry and hand-offs. Paths are built once at level
//! load; only the active curve index changes afterwards.

mod settings;

use std::fmt;
use std::sync::Arc;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

pub use settings::{AlignAxis, AlignmentMode, BoundaryBehaviour, PathSettings};

use crate::connection::Connection;
use crate::curve::Curve;
use crate::error::TraversalError;
use crate::motor::LayerMask;
use crate::scenario::ScenarioList;
use crate::transform::WorldTransform;
use crate::transition::{BuiltinTransition, TransitionFactory};
use crate::{ARC_LENGTH_SAMPLES, SAMPLE_DELTA};

/// Identifier of a path within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(pub u32);

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for PathId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Curves owned by a path; never empty.
#[derive(Debug, Clone)]
struct CurveSet {
    first: Curve,
    rest: Vec<Curve>,
}

impl CurveSet {
    fn new(curves: Vec<Curve>) -> Option<Self> {
        let mut owned = curves.into_iter();
        let first = owned.next()?;
        Some(Self {
            first,
            rest: owned.collect(),
        })
    }

    const fn len(&self) -> usize {
        self.rest.len() + 1
    }

    fn get(&self, index: usize) -> Option<&Curve> {
        match index.checked_sub(1) {
            None => Some(&self.first),
            Some(rest_index) => self.rest.get(rest_index),
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Curve> {
        std::iter::once(&self.first).chain(&self.rest)
    }
}

/// A traversable path and everything authored on it.
pub struct Path {
    id: PathId,
    name: String,
    curves: CurveSet,
    world_lengths: Vec<f32>,
    active_curve: usize,
    transform: WorldTransform,
    settings: PathSettings,
    layers: LayerMask,
    connections: Vec<Connection>,
    distance_scenarios: ScenarioList,
    collision_scenarios: ScenarioList,
    transition: Arc<dyn TransitionFactory>,
    boundary: BoundaryBehaviour,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("curves", &self.curves.len())
            .field("active_curve", &self.active_curve)
            .field("connections", &self.connections)
            .field("boundary", &self.boundary)
            .finish_non_exhaustive()
    }
}

impl Path {
    /// Build a path from its curves, placed at `transform`.
    ///
    /// # Errors
    /// [`TraversalError::MissingCurve`] when `authored` is empty.
    pub fn new(
        id: PathId,
        authored: Vec<Curve>,
        transform: WorldTransform,
    ) -> Result<Self, TraversalError> {
        let curves = CurveSet::new(authored).ok_or(TraversalError::MissingCurve(id))?;
        let world_lengths = curves
            .iter()
            .map(|curve| {
                curve.arc_length_with(ARC_LENGTH_SAMPLES, |p| transform.transform_point(p))
            })
            .collect();
        Ok(Self {
            id,
            name: format!("path-{}", id.0),
            curves,
            world_lengths,
            active_curve: 0,
            transform,
            settings: PathSettings::default(),
            layers: LayerMask::TRAVERSABLE,
            connections: Vec::new(),
            distance_scenarios: ScenarioList::default(),
            collision_scenarios: ScenarioList::default(),
            transition: Arc::new(BuiltinTransition::default()),
            boundary: BoundaryBehaviour::default(),
        })
    }

    /// Replace the display name used in logs.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the tuning values.
    #[must_use]
    pub const fn with_settings(mut self, settings: PathSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Layers the path is visible on to look-at queries.
    #[must_use]
    pub const fn with_layers(mut self, layers: LayerMask) -> Self {
        self.layers = layers;
        self
    }

    /// Outgoing connections in declaration order.
    #[must_use]
    pub fn with_connections(mut self, connections: Vec<Connection>) -> Self {
        self.connections = connections;
        self
    }

    /// Scenarios consulted when the actor is discovered by distance.
    #[must_use]
    pub fn with_distance_scenarios(mut self, scenarios: ScenarioList) -> Self {
        self.distance_scenarios = scenarios;
        self
    }

    /// Scenarios consulted when the actor touches the path.
    #[must_use]
    pub fn with_collision_scenarios(mut self, scenarios: ScenarioList) -> Self {
        self.collision_scenarios = scenarios;
        self
    }

    /// Factory binding hand-offs from this path.
    #[must_use]
    pub fn with_transition(mut self, factory: Arc<dyn TransitionFactory>) -> Self {
        self.transition = factory;
        self
    }

    /// What happens when progress reaches an open end.
    #[must_use]
    pub const fn with_boundary(mut self, boundary: BoundaryBehaviour) -> Self {
        self.boundary = boundary;
        self
    }

    /// Identifier within the level.
    #[must_use]
    pub const fn id(&self) -> PathId {
        self.id
    }

    /// Display name used in logs.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tuning values.
    #[must_use]
    pub const fn settings(&self) -> &PathSettings {
        &self.settings
    }

    /// Local-to-world placement of the curves.
    #[must_use]
    pub const fn transform(&self) -> &WorldTransform {
        &self.transform
    }

    /// Layers the path is visible on.
    #[must_use]
    pub const fn layers(&self) -> LayerMask {
        self.layers
    }

    /// Outgoing connections in declaration order.
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Entry checks for distance discovery.
    #[must_use]
    pub const fn distance_scenarios(&self) -> &ScenarioList {
        &self.distance_scenarios
    }

    /// Entry checks for collision discovery.
    #[must_use]
    pub const fn collision_scenarios(&self) -> &ScenarioList {
        &self.collision_scenarios
    }

    /// Factory binding hand-offs from this path.
    #[must_use]
    pub fn transition_factory(&self) -> &dyn TransitionFactory {
        self.transition.as_ref()
    }

    /// Behaviour at open ends.
    #[must_use]
    pub const fn boundary(&self) -> BoundaryBehaviour {
        self.boundary
    }

    /// Every curve of the path in authored order.
    pub fn curves(&self) -> impl Iterator<Item = &Curve> {
        self.curves.iter()
    }

    /// Number of curves the path owns; at least one.
    #[must_use]
    pub const fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Index of the curve traversal currently follows.
    #[must_use]
    pub const fn active_curve_index(&self) -> usize {
        self.active_curve
    }

    /// The curve traversal currently follows.
    #[must_use]
    pub fn active_curve(&self) -> &Curve {
        self.curves
            .get(self.active_curve)
            .unwrap_or(&self.curves.first)
    }

    /// Select which owned curve is active.
    ///
    /// # Errors
    /// [`TraversalError::CurveIndexOutOfRange`] for an index past the end.
    pub fn set_active_curve(&mut self, index: usize) -> Result<(), TraversalError> {
        if index >= self.curves.len() {
            return Err(TraversalError::CurveIndexOutOfRange {
                path: self.id,
                index,
                count: self.curves.len(),
            });
        }
        self.active_curve = index;
        Ok(())
    }

    /// Activate the curve passing closest to `world_point` and return its index.
    pub fn activate_closest_curve(&mut self, world_point: Vec3) -> usize {
        let local = self.transform.inverse_transform_point(world_point);
        let closest = self
            .curves
            .iter()
            .enumerate()
            .map(|(index, curve)| (index, curve.nearest_point(local).0.distance(local)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(0, |(index, _)| index);
        self.active_curve = closest;
        closest
    }

    /// Whether the active curve loops.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.active_curve().is_closed()
    }

    /// World-space length of the active curve, cached at construction.
    #[must_use]
    pub fn world_length(&self) -> f32 {
        self.world_lengths
            .get(self.active_curve)
            .copied()
            .unwrap_or_default()
    }

    /// World distance covered by a parameter span of `t`.
    #[must_use]
    pub fn delta_length(&self, t: f32) -> f32 {
        self.world_length() * t
    }

    /// World distance covered by one [`SAMPLE_DELTA`] step.
    #[must_use]
    pub fn sample_delta_length(&self) -> f32 {
        self.delta_length(SAMPLE_DELTA)
    }

    /// World position of the active curve at `t`.
    #[must_use]
    pub fn evaluate_world_position(&self, t: f32) -> Vec3 {
        self.transform
            .transform_point(self.active_curve().evaluate_position(t))
    }

    /// Unit local direction of the active curve at `t`.
    #[must_use]
    pub fn forward(&self, t: f32) -> Vec3 {
        self.active_curve().direction(t)
    }

    /// Unit world direction of the active curve at `t`.
    #[must_use]
    pub fn world_forward(&self, t: f32) -> Vec3 {
        self.transform.transform_direction(self.forward(t)).normalize_or_zero()
    }

    /// Unit world up of the active curve at `t`.
    #[must_use]
    pub fn world_up(&self, t: f32) -> Vec3 {
        self.transform
            .transform_direction(self.active_curve().evaluate_up(t))
            .normalize_or_zero()
    }

    /// Unit world right of the active curve at `t`.
    #[must_use]
    pub fn world_right(&self, t: f32) -> Vec3 {
        self.transform
            .transform_direction(self.active_curve().evaluate_right(t))
            .normalize_or_zero()
    }

    /// Unit world direction of the secant from `from` to `to`.
    #[must_use]
    pub fn world_forward_between(&self, from: f32, to: f32) -> Vec3 {
        let secant = self.active_curve().secant(from, to).normalize_or_zero();
        self.transform.transform_direction(secant)
    }

    /// Local direction at `t`, using a secant at the ends of open curves.
    #[must_use]
    pub fn boundary_forward(&self, t: f32) -> Vec3 {
        let curve = self.active_curve();
        if !curve.is_closed() {
            if t <= 0.0 {
                return curve.secant(0.0, SAMPLE_DELTA).normalize_or_zero();
            }
            if t >= 1.0 {
                return curve.secant(1.0 - SAMPLE_DELTA, 1.0).normalize_or_zero();
            }
        }
        curve.direction(t)
    }

    /// World rotation of the path itself.
    #[must_use]
    pub const fn world_rotation(&self) -> Quat {
        self.transform.rotation
    }
}
