//! Directed hand-off points between paths.

use serde::{Deserialize, Serialize};

use crate::path::{Path, PathId};
use crate::DEFAULT_CAPTURE_DISTANCE;

const fn default_capture_distance() -> f32 {
    DEFAULT_CAPTURE_DISTANCE
}

/// Edge from a point on one path to a point on another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    /// Path the actor is handed to.
    pub target: PathId,
    /// Progress on the owning path where the connection starts.
    pub from_position: f32,
    /// Progress on the target path where the actor lands.
    pub to_position: f32,
    /// World distance from `from_position` within which the connection is
    /// taken.
    #[serde(default = "default_capture_distance")]
    pub capture_distance: f32,
}

impl Connection {
    /// Connection with both positions clamped into `[0, 1]` and the default
    /// capture distance.
    #[must_use]
    pub fn new(target: PathId, from_position: f32, to_position: f32) -> Self {
        Self {
            target,
            from_position: from_position.clamp(0.0, 1.0),
            to_position: to_position.clamp(0.0, 1.0),
            capture_distance: DEFAULT_CAPTURE_DISTANCE,
        }
    }

    /// Replace the capture distance; negative distances become zero.
    #[must_use]
    pub const fn with_capture_distance(mut self, distance: f32) -> Self {
        self.capture_distance = distance.max(0.0);
        self
    }

    /// True when both positions lie in `[0, 1]` and the capture distance is
    /// a finite non-negative length.
    ///
    /// Deserialised connections skip the clamping done by [`Connection::new`],
    /// so graphs check this when they are built.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.from_position)
            && unit.contains(&self.to_position)
            && self.capture_distance.is_finite()
            && self.capture_distance >= 0.0
    }
}

/// World arc distance between two parameters on the active curve of `path`.
///
/// Closed curves measure the shorter way round.
#[must_use]
pub fn eval_distance(path: &Path, from: f32, to: f32) -> f32 {
    let mut span = (to - from).abs();
    if path.is_closed() {
        span = span.min(1.0 - span);
    }
    path.delta_length(span)
}

/// Connection of `path` nearest to `from_eval` within its capture distance.
///
/// The first declared connection wins ties.
#[must_use]
pub fn closest_connection(path: &Path, from_eval: f32) -> Option<&Connection> {
    let mut best: Option<(&Connection, f32)> = None;
    for connection in path.connections() {
        let distance = eval_distance(path, from_eval, connection.from_position);
        if distance > connection.capture_distance {
            continue;
        }
        if best.is_none_or(|(_, nearest)| distance < nearest) {
            best = Some((connection, distance));
        }
    }
    best.map(|(connection, _)| connection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::transform::WorldTransform;
    use glam::Vec3;
    use rstest::rstest;

    fn rail(length: f32, closed: bool, connections: Vec<Connection>) -> Path {
        let curve = if closed {
            let points = (0..16).map(|i| {
                let angle = i as f32 / 16.0 * std::f32::consts::TAU;
                let radius = length / std::f32::consts::TAU;
                Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
            });
            Curve::from_points(points, true)
        } else {
            Curve::from_points([Vec3::ZERO, Vec3::new(length, 0.0, 0.0)], false)
        }
        .expect("valid curve");
        Path::new(PathId(1), vec![curve], WorldTransform::IDENTITY)
            .expect("valid path")
            .with_connections(connections)
    }

    #[test]
    fn out_of_range_connection_is_ignored() {
        // 100 world units long: 0.025 of the curve is 2.5 units away.
        let path = rail(
            100.0,
            false,
            vec![Connection::new(PathId(2), 0.525, 0.0).with_capture_distance(2.0)],
        );
        assert!(closest_connection(&path, 0.5).is_none());
    }

    #[test]
    fn nearest_connection_wins() {
        let path = rail(
            100.0,
            false,
            vec![
                Connection::new(PathId(2), 0.51, 0.0),
                Connection::new(PathId(3), 0.505, 0.0),
            ],
        );
        let found = closest_connection(&path, 0.5).expect("connection in range");
        assert_eq!(found.target, PathId(3));
    }

    #[test]
    fn ties_keep_declaration_order() {
        let path = rail(
            16.0,
            false,
            vec![
                Connection::new(PathId(2), 0.625, 0.0).with_capture_distance(3.0),
                Connection::new(PathId(3), 0.375, 0.0).with_capture_distance(3.0),
            ],
        );
        let found = closest_connection(&path, 0.5).expect("connection in range");
        assert_eq!(found.target, PathId(2));
    }

    #[rstest]
    #[case(0.995, 0.005)]
    #[case(0.0, 0.99)]
    fn closed_curves_measure_short_way(#[case] from: f32, #[case] to: f32) {
        let path = rail(100.0, true, vec![Connection::new(PathId(2), to, 0.0)]);
        let distance = eval_distance(&path, from, to);
        assert!(distance < 1.5, "distance {distance}");
        assert!(closest_connection(&path, from).is_some());
    }

    #[rstest]
    #[case::to_past_end(0.5, 1.7, 1.0)]
    #[case::from_negative(-0.2, 0.0, 1.0)]
    #[case::negative_capture(1.0, 0.0, -1.0)]
    #[case::nan_capture(1.0, 0.0, f32::NAN)]
    fn malformed_connections_are_detected(
        #[case] from_position: f32,
        #[case] to_position: f32,
        #[case] capture_distance: f32,
    ) {
        let connection = Connection {
            target: PathId(2),
            from_position,
            to_position,
            capture_distance,
        };
        assert!(!connection.is_well_formed());
    }

    #[test]
    fn constructor_output_is_well_formed() {
        let connection = Connection::new(PathId(2), 1.4, -0.3).with_capture_distance(-2.0);
        assert!(connection.is_well_formed());
        assert_eq!(connection.to_position, 0.0);
    }

    #[test]
    fn capture_distance_defaults_when_missing() {
        let connection: Connection =
            serde_json::from_str(r#"{ "target": 4, "from_position": 1.0, "to_position": 0.0 }"#)
                .expect("valid connection");
        assert_eq!(connection.capture_distance, DEFAULT_CAPTURE_DISTANCE);
        assert_eq!(connection.target, PathId(4));
    }
}
