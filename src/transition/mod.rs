//! Hand-offs from one path to another.
//!
//! While traversing, a jump aimed at another path asks the current path's
//! [`TransitionFactory`] for a strategy. The state machine then steps that
//! strategy once per tick until it reports completion and rebinds the actor
//! to the target path.

mod builtin;

use std::fmt;

use glam::Vec3;
use log::debug;

pub use builtin::{ArcJumpStrategy, BuiltinTransition, SnapStrategy};

use crate::connection::Connection;
use crate::data::TraversalData;
use crate::graph::PathGraph;
use crate::input::InputSnapshot;
use crate::interaction::{InteractionQuery, LookAtQuery};
use crate::motor::{LayerMask, Motor};
use crate::numeric::{precise_eval_clamp01, precise_eval_wrap01};
use crate::path::{Path, PathId};
use crate::placement::place;
use crate::{LOOK_AT_DISTANCE, TRANSITION_DURATION, TRANSITION_PEAK_HEIGHT};

/// Resumable motion carrying the actor onto another path.
pub trait TransitionStrategy: fmt::Debug + Send + Sync {
    /// Advance one tick; true once the actor sits on the target placement.
    fn step(&mut self, motor: &mut dyn Motor, dt: f32) -> bool;
    /// Data the actor adopts on the target path when the step completes.
    fn target_data(&self) -> &TraversalData;
}

/// Binds a strategy to a concrete hand-off.
pub trait TransitionFactory: fmt::Debug + Send + Sync {
    /// Hand-off from `from` onto the placement of `to` nearest the actor.
    fn create(
        &self,
        from: &Path,
        to: &Path,
        from_data: &TraversalData,
        current_position: Vec3,
    ) -> InteractionResult;
}

/// A detected hand-off, consumed by the state machine straight away.
#[derive(Debug)]
pub struct InteractionResult {
    /// Path being left.
    pub from_path: PathId,
    /// Path being joined.
    pub to_path: PathId,
    /// Actor data on `from_path` when the hand-off began.
    pub from_data: TraversalData,
    /// Landing data on `to_path`.
    pub to_data: TraversalData,
    /// Motion carrying the actor across.
    pub strategy: Box<dyn TransitionStrategy>,
}

/// Look for a path to hand off to and bind a transition to it.
///
/// Fires only when the current path allows interaction, the jump was
/// pressed, and the camera looks at another path within the path's
/// interaction range.
pub fn has_traversal_interaction(
    graph: &mut PathGraph,
    from: PathId,
    from_data: &TraversalData,
    input: &InputSnapshot,
    query: &dyn InteractionQuery,
    motor: &dyn Motor,
    layers: LayerMask,
) -> Option<InteractionResult> {
    let path = graph.get(from)?;
    if !path.settings().allow_traversal_interaction || !input.jump_performed {
        return None;
    }
    let hit = query.look_at(&LookAtQuery {
        origin: input.camera_position,
        direction: input.camera_forward,
        range: LOOK_AT_DISTANCE,
        radius: path.settings().interaction_range,
        layers,
        exclude: vec![from],
    })?;
    let to = hit.path().filter(|id| *id != from)?;
    let current_position = motor.transient_position();
    graph.activate_closest_curve(to, current_position).ok()?;
    let (from_path, to_path) = (graph.get(from)?, graph.get(to)?);
    debug!("hand-off from {from} to {to}");
    Some(
        from_path
            .transition_factory()
            .create(from_path, to_path, from_data, current_position),
    )
}

/// Arc jump along `connection` onto its target's `to_position`.
///
/// The landing parameter is snapped onto the eval grid, wrapped on closed
/// targets and clamped on open ones.
#[must_use]
pub fn connection_hand_off(
    graph: &PathGraph,
    from: PathId,
    connection: &Connection,
    from_data: &TraversalData,
    current_position: Vec3,
) -> Option<InteractionResult> {
    let target = graph.get(connection.target)?;
    let landing = if target.is_closed() {
        precise_eval_wrap01(connection.to_position)
    } else {
        precise_eval_clamp01(connection.to_position)
    };
    let mut to_data = TraversalData::at(landing);
    place(target, &mut to_data);
    debug!(
        "following connection from {from} to {} at {}",
        connection.target, landing
    );
    Some(InteractionResult {
        from_path: from,
        to_path: connection.target,
        from_data: *from_data,
        to_data,
        strategy: Box::new(ArcJumpStrategy::new(
            current_position,
            to_data,
            TRANSITION_DURATION,
            TRANSITION_PEAK_HEIGHT,
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::interaction::{LookAtHit, MockInteractionQuery};
    use crate::motor::KinematicMotor;
    use crate::path::PathSettings;
    use crate::transform::WorldTransform;
    use rstest::rstest;

    fn graph(allow_interaction: bool) -> PathGraph {
        let rail = |id: u32, x: f32| {
            let curve = Curve::from_points([Vec3::new(x, 0.0, 0.0), Vec3::new(x, 0.0, 10.0)], false)
                .expect("valid curve");
            Path::new(PathId(id), vec![curve], WorldTransform::IDENTITY)
                .expect("valid path")
                .with_settings(PathSettings {
                    allow_traversal_interaction: allow_interaction,
                    ..PathSettings::default()
                })
        };
        PathGraph::from_paths([
            rail(1, 0.0).with_connections(vec![Connection::new(PathId(2), 1.0, 0.25)]),
            rail(2, 4.0),
        ])
        .expect("valid graph")
    }

    fn looking_at(hit: Option<LookAtHit>, times: usize) -> MockInteractionQuery {
        let mut query = MockInteractionQuery::new();
        query
            .expect_look_at()
            .withf(|q| q.exclude == vec![PathId(1)] && q.range == LOOK_AT_DISTANCE)
            .times(times)
            .return_const(hit);
        query
    }

    #[rstest]
    #[case::all_conditions(true, true, Some(LookAtHit::Path(PathId(2))), 1, true)]
    #[case::interaction_disabled(false, true, Some(LookAtHit::Path(PathId(2))), 0, false)]
    #[case::no_jump(true, false, Some(LookAtHit::Path(PathId(2))), 0, false)]
    #[case::nothing_looked_at(true, true, None, 1, false)]
    #[case::looking_at_self(true, true, Some(LookAtHit::Path(PathId(1))), 1, false)]
    fn dispatcher_conditions(
        #[case] allow: bool,
        #[case] jump: bool,
        #[case] hit: Option<LookAtHit>,
        #[case] queries: usize,
        #[case] fires: bool,
    ) {
        let mut graph = graph(allow);
        let query = looking_at(hit, queries);
        let motor = KinematicMotor::new(Vec3::new(0.0, 0.0, 5.0), 0.4);
        let input = InputSnapshot::default().with_jump(jump);
        let result = has_traversal_interaction(
            &mut graph,
            PathId(1),
            &TraversalData::at(0.5),
            &input,
            &query,
            &motor,
            LayerMask::TRAVERSABLE,
        );
        assert_eq!(result.is_some(), fires);
        if let Some(result) = result {
            assert_eq!(result.to_path, PathId(2));
            assert!((result.to_data.eval - 0.5).abs() < 1e-3);
        }
    }

    #[test]
    fn connection_hand_off_targets_to_position() {
        let graph = graph(true);
        let connection = graph.get(PathId(1)).expect("path").connections()[0];
        let result = connection_hand_off(
            &graph,
            PathId(1),
            &connection,
            &TraversalData::at(1.0),
            Vec3::new(0.0, 0.0, 10.0),
        )
        .expect("target exists");
        assert_eq!(result.to_path, PathId(2));
        assert_eq!(result.to_data.eval, 0.25);
        assert!((result.to_data.position.z - 2.5).abs() < 1e-3);
    }

    #[rstest]
    #[case::off_grid(0.2345)]
    #[case::past_end(1.7)]
    #[case::before_start(-0.4)]
    fn connection_hand_off_lands_on_eval_grid(#[case] to_position: f32) {
        let graph = graph(true);
        let connection = Connection {
            to_position,
            ..Connection::new(PathId(2), 1.0, 0.0)
        };
        let result = connection_hand_off(
            &graph,
            PathId(1),
            &connection,
            &TraversalData::at(1.0),
            Vec3::new(0.0, 0.0, 10.0),
        )
        .expect("target exists");
        let eval = result.to_data.eval;
        assert!((0.0..=1.0).contains(&eval), "eval {eval}");
        assert_eq!(eval, precise_eval_clamp01(eval));
        assert!((eval - to_position.clamp(0.0, 1.0)).abs() <= 6e-4, "eval {eval}");
    }
}
