//! The traversal state machine.
//!
//! One machine drives one actor. Entering a path anchors the character onto
//! it with a short arc, after which every tick maps input, advances progress
//! through the collision guard, fires boundary hooks and writes the
//! placement to the motor. A jump either hands off to another path through
//! the path's transition factory or drops back to free locomotion.
//!
//! Anchoring and transitions are step structs resumed once per tick, so
//! leaving mid-phase just drops them.

mod events;
mod rotation;

use glam::Vec3;
use log::{debug, info, warn};

pub use events::{AbortReason, Boundary, TickReport, TraversalEvent};
pub use rotation::{smoothed_rotation, MachineConfig};

use crate::collision::{guarded_step, StepOutcome};
use crate::connection::closest_connection;
use crate::data::TraversalData;
use crate::error::TraversalError;
use crate::graph::PathGraph;
use crate::input::{map_traversal_input, InputSnapshot};
use crate::interaction::InteractionQuery;
use crate::motion::ArcMotion;
use crate::motor::Motor;
use crate::path::{BoundaryBehaviour, Path, PathId};
use crate::placement::{evaluate_at_point, place};
use crate::transition::{connection_hand_off, has_traversal_interaction, InteractionResult};

/// Publicly observable phase of the machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TraversalPhase {
    /// Not on any path.
    #[default]
    None,
    /// Arcing onto the path after entering it.
    Anchoring,
    /// Moving along the path under player input.
    Traversing,
    /// Being carried onto another path.
    Transitioning,
}

#[derive(Debug)]
enum Phase {
    Anchoring(ArcMotion),
    Traversing,
    Transitioning(InteractionResult),
}

#[derive(Debug)]
struct Active {
    path: PathId,
    data: TraversalData,
    phase: Phase,
    /// Boundary the actor currently rests on; hooks fire when it changes.
    boundary: Option<Boundary>,
}

enum Flow {
    Continue,
    /// A transition finished and already wrote the landing rotation.
    Landed,
    Exit(Vec3),
    Abort(AbortReason),
}

fn resting_boundary(path: &Path, eval: f32) -> Option<Boundary> {
    if path.is_closed() {
        None
    } else {
        Boundary::at(eval)
    }
}

fn set_solving(motor: &mut dyn Motor, enabled: bool) {
    motor.set_capsule_collisions(enabled);
    motor.set_movement_collision_solving(enabled);
    motor.set_ground_solving(enabled);
}

/// Drives one actor along the paths of a [`PathGraph`].
#[derive(Debug, Default)]
pub struct TraversalStateMachine {
    config: MachineConfig,
    active: Option<Active>,
    input: InputSnapshot,
    jump_requested: bool,
    pending: Vec<TraversalEvent>,
}

impl TraversalStateMachine {
    /// Idle machine using `config`.
    #[must_use]
    pub fn new(config: MachineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Runtime tuning.
    #[must_use]
    pub const fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TraversalPhase {
        match &self.active {
            None => TraversalPhase::None,
            Some(Active { phase, .. }) => match phase {
                Phase::Anchoring(_) => TraversalPhase::Anchoring,
                Phase::Traversing => TraversalPhase::Traversing,
                Phase::Transitioning(_) => TraversalPhase::Transitioning,
            },
        }
    }

    /// Path being traversed, anchored onto or transitioned from.
    #[must_use]
    pub fn active_path(&self) -> Option<PathId> {
        self.active.as_ref().map(|active| active.path)
    }

    /// Progress and placement on the active path.
    #[must_use]
    pub fn data(&self) -> Option<&TraversalData> {
        self.active.as_ref().map(|active| &active.data)
    }

    /// Start traversing `path` from the character's current position.
    ///
    /// Disables motor collision and ground solving, activates the curve
    /// closest to the character and begins anchoring onto it.
    ///
    /// # Errors
    /// [`TraversalError::AlreadyTraversing`] while a traversal is active and
    /// [`TraversalError::UnknownPath`] for an unregistered path.
    pub fn enter(
        &mut self,
        graph: &mut PathGraph,
        motor: &mut dyn Motor,
        path: PathId,
    ) -> Result<(), TraversalError> {
        if let Some(active) = &self.active {
            return Err(TraversalError::AlreadyTraversing(active.path));
        }
        if !graph.contains(path) {
            return Err(TraversalError::UnknownPath(path));
        }
        set_solving(motor, false);
        self.bind(graph, motor, path)
    }

    /// Re-anchor onto `path`, entering it if nothing is active.
    ///
    /// # Errors
    /// [`TraversalError::UnknownPath`] for an unregistered path.
    pub fn change_path(
        &mut self,
        graph: &mut PathGraph,
        motor: &mut dyn Motor,
        path: PathId,
    ) -> Result<(), TraversalError> {
        let Some(previous) = self.active_path() else {
            return self.enter(graph, motor, path);
        };
        if !graph.contains(path) {
            return Err(TraversalError::UnknownPath(path));
        }
        debug!("changing traversal from {previous} to {path}");
        self.bind(graph, motor, path)
    }

    fn bind(
        &mut self,
        graph: &mut PathGraph,
        motor: &dyn Motor,
        id: PathId,
    ) -> Result<(), TraversalError> {
        let position = motor.transient_position();
        graph.activate_closest_curve(id, position)?;
        let path = graph.get(id).ok_or(TraversalError::UnknownPath(id))?;
        let data = evaluate_at_point(path, position);
        info!("entering {id} ({}) at eval {}", path.name(), data.eval);
        self.active = Some(Active {
            path: id,
            data,
            phase: Phase::Anchoring(ArcMotion::anchor(
                motor.initial_simulation_position(),
                data.position,
            )),
            boundary: resting_boundary(path, data.eval),
        });
        self.jump_requested = false;
        self.pending.push(TraversalEvent::Entered { path: id });
        Ok(())
    }

    /// Feed this tick's input.
    ///
    /// Maps movement onto the active path and latches a jump until the next
    /// traversing tick consumes it. Ignored while not traversing.
    pub fn set_inputs(&mut self, graph: &PathGraph, input: InputSnapshot) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        if let Some(path) = graph.get(active.path) {
            active.data.input = map_traversal_input(path, &active.data, &input);
        }
        if input.jump_performed {
            self.jump_requested = true;
        }
        self.input = input;
    }

    /// Leave traversal and hand the motor back to locomotion.
    ///
    /// Returns the path that was active, if any.
    pub fn exit(&mut self, motor: &mut dyn Motor) -> Option<PathId> {
        let active = self.active.take()?;
        set_solving(motor, true);
        self.jump_requested = false;
        info!("left {}", active.path);
        self.pending.push(TraversalEvent::Exited {
            path: active.path,
            velocity: Vec3::ZERO,
        });
        Some(active.path)
    }

    /// Advance the machine by `dt` seconds.
    ///
    /// Never fails: stale paths or a destroyed character abort the
    /// traversal and are reported as events.
    pub fn tick(
        &mut self,
        graph: &mut PathGraph,
        motor: &mut dyn Motor,
        query: &dyn InteractionQuery,
        dt: f32,
    ) -> TickReport {
        let mut report = TickReport::default();
        report.events.append(&mut self.pending);
        let Some(mut active) = self.active.take() else {
            return report;
        };

        let flow = if !motor.is_alive() {
            Flow::Abort(AbortReason::MotorGone)
        } else if !graph.contains(active.path) {
            Flow::Abort(AbortReason::PathGone(active.path))
        } else {
            match std::mem::replace(&mut active.phase, Phase::Traversing) {
                Phase::Anchoring(mut motion) => {
                    if motion.step(motor, dt) {
                        debug!("anchored onto {}", active.path);
                        report.push(TraversalEvent::AnchorComplete { path: active.path });
                    } else {
                        active.phase = Phase::Anchoring(motion);
                    }
                    Flow::Continue
                }
                Phase::Transitioning(result) => {
                    Self::transition(graph, motor, &mut active, result, dt, &mut report)
                }
                Phase::Traversing => {
                    self.traverse(graph, motor, query, &mut active, dt, &mut report)
                }
            }
        };

        match flow {
            Flow::Continue => {
                let rotation = smoothed_rotation(
                    motor.transient_rotation(),
                    self.input.camera_planar_direction,
                    motor.character_up(),
                    &self.config,
                    dt,
                );
                motor.set_rotation(rotation);
                self.active = Some(active);
            }
            Flow::Landed => self.active = Some(active),
            Flow::Exit(velocity) => {
                set_solving(motor, true);
                self.jump_requested = false;
                info!("left {} with velocity {velocity}", active.path);
                report.velocity = velocity;
                report.push(TraversalEvent::Exited {
                    path: active.path,
                    velocity,
                });
            }
            Flow::Abort(reason) => {
                if reason != AbortReason::MotorGone {
                    set_solving(motor, true);
                }
                self.jump_requested = false;
                warn!("traversal on {} aborted: {reason:?}", active.path);
                report.push(TraversalEvent::Aborted { reason });
            }
        }
        report
    }

    fn transition(
        graph: &PathGraph,
        motor: &mut dyn Motor,
        active: &mut Active,
        mut result: InteractionResult,
        dt: f32,
        report: &mut TickReport,
    ) -> Flow {
        if !result.strategy.step(motor, dt) {
            active.phase = Phase::Transitioning(result);
            return Flow::Continue;
        }
        let Some(target) = graph.get(result.to_path) else {
            return Flow::Abort(AbortReason::PathGone(result.to_path));
        };
        active.path = result.to_path;
        active.data = *result.strategy.target_data();
        active.boundary = resting_boundary(target, active.data.eval);
        debug!("transition onto {} finished", active.path);
        report.push(TraversalEvent::TransitionFinished { path: active.path });
        Flow::Landed
    }

    fn start_transition(active: &mut Active, result: InteractionResult, report: &mut TickReport) {
        info!("hand-off from {} to {}", result.from_path, result.to_path);
        report.push(TraversalEvent::TransitionStarted {
            from: result.from_path,
            to: result.to_path,
        });
        active.phase = Phase::Transitioning(result);
    }

    fn traverse(
        &mut self,
        graph: &mut PathGraph,
        motor: &mut dyn Motor,
        query: &dyn InteractionQuery,
        active: &mut Active,
        dt: f32,
        report: &mut TickReport,
    ) -> Flow {
        if std::mem::take(&mut self.jump_requested) {
            if let Some(result) = has_traversal_interaction(
                graph,
                active.path,
                &active.data,
                &self.input,
                query,
                motor,
                self.config.traversable_layers,
            ) {
                Self::start_transition(active, result, report);
                return Flow::Continue;
            }
            let Some(path) = graph.get(active.path) else {
                return Flow::Abort(AbortReason::PathGone(active.path));
            };
            return Flow::Exit(motor.character_up() * path.settings().jump_speed);
        }

        let Some(path) = graph.get(active.path) else {
            return Flow::Abort(AbortReason::PathGone(active.path));
        };
        if active.data.has_input()
            && guarded_step(path, &*motor, &mut active.data, dt) == StepOutcome::Blocked
        {
            debug!("progress on {} blocked at eval {}", active.path, active.data.eval);
        }

        let resting = resting_boundary(path, active.data.eval);
        if resting != active.boundary {
            active.boundary = resting;
            if let Some(boundary) = resting {
                debug!("{} reached {boundary:?}", active.path);
                report.push(TraversalEvent::BoundaryReached {
                    path: active.path,
                    boundary,
                });
                match path.boundary() {
                    BoundaryBehaviour::Stay => {}
                    BoundaryBehaviour::Exit => return Flow::Exit(Vec3::ZERO),
                    BoundaryBehaviour::FollowConnection => {
                        let hand_off =
                            closest_connection(path, active.data.eval).and_then(|connection| {
                                connection_hand_off(
                                    graph,
                                    active.path,
                                    connection,
                                    &active.data,
                                    motor.transient_position(),
                                )
                            });
                        if let Some(result) = hand_off {
                            Self::start_transition(active, result, report);
                            return Flow::Continue;
                        }
                    }
                }
            }
        }

        place(path, &mut active.data);
        motor.set_transient_position(active.data.position);
        Flow::Continue
    }
}
