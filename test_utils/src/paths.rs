//! Path fixtures.

use glam::Vec3;
use railwalk::{Curve, Path, PathGraph, PathId, WorldTransform};

/// Open two-knot path from `from` to `to`.
///
/// # Panics
/// Panics if `from` or `to` is not finite.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use test_utils::straight_rail;
/// let rail = straight_rail(1, Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0));
/// assert!((rail.world_length() - 4.0).abs() < 1e-3);
/// ```
pub fn straight_rail(id: u32, from: Vec3, to: Vec3) -> Path {
    let curve = Curve::from_points([from, to], false).expect("finite rail knots");
    Path::new(PathId(id), vec![curve], WorldTransform::IDENTITY).expect("rail has a curve")
}

/// Rail of `length` running along +Z at height 0 and the given `x`.
pub fn rail_along_z(id: u32, x: f32, length: f32) -> Path {
    straight_rail(id, Vec3::new(x, 0.0, 0.0), Vec3::new(x, 0.0, length))
}

/// Closed loop through four points at `radius` around `center` on the XZ
/// plane.
///
/// # Panics
/// Panics if `center` or `radius` is not finite.
pub fn ring(id: u32, center: Vec3, radius: f32) -> Path {
    let points = [
        Vec3::new(radius, 0.0, 0.0),
        Vec3::new(0.0, 0.0, radius),
        Vec3::new(-radius, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -radius),
    ];
    let curve = Curve::from_points(points, true).expect("finite ring knots");
    Path::new(
        PathId(id),
        vec![curve],
        WorldTransform::from_translation(center),
    )
    .expect("ring has a curve")
}

/// Graph over `paths`.
///
/// # Panics
/// Panics on duplicate ids or dangling connections.
pub fn graph_of(paths: impl IntoIterator<Item = Path>) -> PathGraph {
    PathGraph::from_paths(paths).expect("valid fixture graph")
}
