//! Look-at queries used to discover paths from the camera.
//!
//! The host answers [`InteractionQuery::look_at`] however it likes; the
//! built-in [`PathRaycaster`] sphere-casts against sampled path geometry and
//! optional blocking boxes.

use glam::Vec3;
use ordered_float::OrderedFloat;

use crate::collision::Aabb;
use crate::graph::PathGraph;
use crate::motor::{ColliderId, LayerMask, StaticCollider};
use crate::numeric::index_fraction;
use crate::path::{Path, PathId};
use crate::ARC_LENGTH_SAMPLES;

/// A sphere cast from `origin` along `direction`.
#[derive(Debug, Clone, PartialEq)]
pub struct LookAtQuery {
    /// Start of the cast, usually the camera position.
    pub origin: Vec3,
    /// Cast direction; need not be normalised.
    pub direction: Vec3,
    /// Maximum cast distance.
    pub range: f32,
    /// Sphere radius.
    pub radius: f32,
    /// Only paths on these layers can be hit.
    pub layers: LayerMask,
    /// Paths ignored by the cast.
    pub exclude: Vec<PathId>,
}

/// First thing a look-at query hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookAtHit {
    /// A traversable path.
    Path(PathId),
    /// Blocking geometry in front of any path.
    Collider(ColliderId),
}

impl LookAtHit {
    /// The hit path, if the cast hit one.
    #[must_use]
    pub const fn path(self) -> Option<PathId> {
        match self {
            Self::Path(id) => Some(id),
            Self::Collider(_) => None,
        }
    }
}

/// Answers look-at queries against the scene.
#[cfg_attr(test, mockall::automock)]
pub trait InteractionQuery {
    /// First hit of the cast described by `query`, if any.
    fn look_at(&self, query: &LookAtQuery) -> Option<LookAtHit>;
}

/// Sampled polyline of one path.
#[derive(Debug, Clone)]
struct SampledPath {
    id: PathId,
    layers: LayerMask,
    samples: Vec<Vec3>,
}

impl SampledPath {
    fn new(path: &Path) -> Self {
        Self {
            id: path.id(),
            layers: path.layers(),
            samples: (0..=ARC_LENGTH_SAMPLES)
                .map(|i| path.evaluate_world_position(index_fraction(i, ARC_LENGTH_SAMPLES)))
                .collect(),
        }
    }

    fn hit_distance(&self, origin: Vec3, direction: Vec3, query: &LookAtQuery) -> Option<f32> {
        self.samples
            .iter()
            .filter_map(|sample| {
                let along = (*sample - origin).dot(direction).clamp(0.0, query.range);
                let closest = origin + direction * along;
                (closest.distance(*sample) <= query.radius).then_some(along)
            })
            .min_by_key(|along| OrderedFloat(*along))
    }
}

/// Sphere caster over a snapshot of the paths of a [`PathGraph`].
///
/// The snapshot samples each path's active curve when built, so rebuild it
/// after changing the active curves or transforms it should see.
#[derive(Debug, Clone, Default)]
pub struct PathRaycaster {
    paths: Vec<SampledPath>,
    blockers: Vec<StaticCollider>,
}

impl PathRaycaster {
    /// Sample every path of `graph` on its active curve.
    #[must_use]
    pub fn new(graph: &PathGraph) -> Self {
        Self {
            paths: graph.iter().map(SampledPath::new).collect(),
            blockers: Vec::new(),
        }
    }

    /// Boxes that stop the cast before it reaches a path.
    #[must_use]
    pub fn with_blockers(mut self, blockers: impl IntoIterator<Item = StaticCollider>) -> Self {
        self.blockers.extend(blockers);
        self
    }

    fn blocker_hit_distance(
        bounds: &Aabb,
        origin: Vec3,
        direction: Vec3,
        query: &LookAtQuery,
    ) -> Option<f32> {
        let inflated = Aabb {
            min: bounds.min - Vec3::splat(query.radius),
            max: bounds.max + Vec3::splat(query.radius),
        };
        let inverse = direction.recip();
        let near = (inflated.min - origin) * inverse;
        let far = (inflated.max - origin) * inverse;
        let entry = near.min(far).max_element().max(0.0);
        let exit = near.max(far).min_element().min(query.range);
        (entry <= exit).then_some(entry)
    }
}

impl InteractionQuery for PathRaycaster {
    fn look_at(&self, query: &LookAtQuery) -> Option<LookAtHit> {
        let direction = query.direction.try_normalize()?;
        let path_hit = self
            .paths
            .iter()
            .filter(|path| path.layers.intersects(query.layers))
            .filter(|path| !query.exclude.contains(&path.id))
            .filter_map(|path| {
                path.hit_distance(query.origin, direction, query)
                    .map(|distance| (LookAtHit::Path(path.id), distance))
            });
        let blocker_hit = self.blockers.iter().filter_map(|blocker| {
            Self::blocker_hit_distance(&blocker.bounds, query.origin, direction, query)
                .map(|distance| (LookAtHit::Collider(blocker.id), distance))
        });
        path_hit
            .chain(blocker_hit)
            .min_by_key(|(_, distance)| OrderedFloat(*distance))
            .map(|(hit, _)| hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::transform::WorldTransform;

    fn bar(id: u32, z: f32) -> Path {
        let curve = Curve::from_points([Vec3::new(-3.0, 0.0, z), Vec3::new(3.0, 0.0, z)], false)
            .expect("valid curve");
        Path::new(PathId(id), vec![curve], WorldTransform::IDENTITY).expect("valid path")
    }

    fn query(exclude: Vec<PathId>) -> LookAtQuery {
        LookAtQuery {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
            range: 30.0,
            radius: 0.5,
            layers: LayerMask::TRAVERSABLE,
            exclude,
        }
    }

    #[test]
    fn nearest_path_is_hit() {
        let graph = PathGraph::from_paths([bar(1, 10.0), bar(2, 5.0)]).expect("valid graph");
        let hit = PathRaycaster::new(&graph).look_at(&query(Vec::new()));
        assert_eq!(hit, Some(LookAtHit::Path(PathId(2))));
    }

    #[test]
    fn excluded_paths_are_skipped() {
        let graph = PathGraph::from_paths([bar(1, 10.0), bar(2, 5.0)]).expect("valid graph");
        let hit = PathRaycaster::new(&graph).look_at(&query(vec![PathId(2)]));
        assert_eq!(hit, Some(LookAtHit::Path(PathId(1))));
    }

    #[test]
    fn out_of_range_paths_are_missed() {
        let graph = PathGraph::from_paths([bar(1, 40.0)]).expect("valid graph");
        assert_eq!(PathRaycaster::new(&graph).look_at(&query(Vec::new())), None);
    }

    #[test]
    fn layer_filter_applies() {
        let graph = PathGraph::from_paths([bar(1, 5.0).with_layers(LayerMask(0b10))])
            .expect("valid graph");
        assert_eq!(PathRaycaster::new(&graph).look_at(&query(Vec::new())), None);
    }

    #[test]
    fn blockers_occlude_paths() {
        let graph = PathGraph::from_paths([bar(1, 10.0)]).expect("valid graph");
        let blockers = [StaticCollider {
            id: ColliderId(3),
            bounds: Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, 4.0), Vec3::splat(1.0)),
            owner: None,
        }];
        let hit = PathRaycaster::new(&graph)
            .with_blockers(blockers)
            .look_at(&query(Vec::new()));
        assert_eq!(hit, Some(LookAtHit::Collider(ColliderId(3))));
    }
}
