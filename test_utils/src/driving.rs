//! Helpers that run a traversal for a number of ticks.

use glam::Vec3;
use railwalk::{
    InputSnapshot, InteractionQuery, KinematicMotor, LookAtHit, LookAtQuery, PathGraph,
    TraversalEvent, TraversalStateMachine,
};

/// Query that never hits anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentQuery;

impl InteractionQuery for SilentQuery {
    fn look_at(&self, _query: &LookAtQuery) -> Option<LookAtHit> {
        None
    }
}

/// Stick pushed forward with the camera looking down +Z.
pub fn forward_input() -> InputSnapshot {
    InputSnapshot::from_camera(Vec3::Z, Vec3::Z)
}

/// Feed `input` and tick `ticks` times, collecting every event.
pub fn drive(
    machine: &mut TraversalStateMachine,
    graph: &mut PathGraph,
    motor: &mut KinematicMotor,
    query: &dyn InteractionQuery,
    input: InputSnapshot,
    ticks: usize,
    dt: f32,
) -> Vec<TraversalEvent> {
    let mut events = Vec::new();
    for _ in 0..ticks {
        motor.begin_tick();
        machine.set_inputs(graph, input);
        events.extend(machine.tick(graph, motor, query, dt).events);
    }
    events
}
