//! Finding a path to enter from free locomotion.

use log::info;

use crate::data::TraversalData;
use crate::graph::PathGraph;
use crate::input::InputSnapshot;
use crate::interaction::{InteractionQuery, LookAtQuery};
use crate::motor::{LayerMask, Motor};
use crate::path::PathId;
use crate::placement::evaluate_at_point;
use crate::{ENTRY_LOOK_AT_DISTANCE, ENTRY_LOOK_AT_RADIUS};

/// How an entry was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceTrigger {
    /// The camera looked at the path; distance scenarios decided.
    LookAt,
    /// Locomotion collided with the path; collision scenarios decided.
    Collision,
}

/// A path the actor may enter, with the scenario that allowed it.
#[derive(Debug, Clone, PartialEq)]
pub struct EntranceDecision {
    /// Path to enter.
    pub path: PathId,
    /// Placement the actor would take on entry.
    pub data: TraversalData,
    /// Name of the scenario that passed.
    pub scenario: String,
    /// How the path was found.
    pub trigger: EntranceTrigger,
}

fn decide(
    graph: &mut PathGraph,
    id: PathId,
    motor: &dyn Motor,
    input: &InputSnapshot,
    trigger: EntranceTrigger,
) -> Option<EntranceDecision> {
    let position = motor.transient_position();
    graph.activate_closest_curve(id, position).ok()?;
    let path = graph.get(id)?;
    let data = evaluate_at_point(path, position);
    let scenarios = match trigger {
        EntranceTrigger::LookAt => path.distance_scenarios(),
        EntranceTrigger::Collision => path.collision_scenarios(),
    };
    let scenario = scenarios.evaluate(motor, path, &data, input)?;
    info!("entering {} using scenario '{}'", id, scenario.name());
    Some(EntranceDecision {
        path: id,
        data,
        scenario: scenario.name().to_owned(),
        trigger,
    })
}

/// Look from the camera for a nearby path and ask its distance scenarios.
pub fn discover_by_look_at(
    graph: &mut PathGraph,
    query: &dyn InteractionQuery,
    motor: &dyn Motor,
    input: &InputSnapshot,
    layers: LayerMask,
) -> Option<EntranceDecision> {
    let hit = query.look_at(&LookAtQuery {
        origin: input.camera_position,
        direction: input.camera_forward,
        range: ENTRY_LOOK_AT_DISTANCE,
        radius: ENTRY_LOOK_AT_RADIUS,
        layers,
        exclude: Vec::new(),
    })?;
    decide(graph, hit.path()?, motor, input, EntranceTrigger::LookAt)
}

/// Ask the collision scenarios of a path locomotion just bumped into.
pub fn discover_by_collision(
    graph: &mut PathGraph,
    hit: PathId,
    motor: &dyn Motor,
    input: &InputSnapshot,
) -> Option<EntranceDecision> {
    decide(graph, hit, motor, input, EntranceTrigger::Collision)
}
