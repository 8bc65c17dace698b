//! What the state machine reports back to its host each tick.

use glam::Vec3;

use crate::path::PathId;

/// End of an open curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// `eval == 0`.
    Start,
    /// `eval == 1`.
    End,
}

impl Boundary {
    /// Boundary at `eval`, if it sits exactly on one.
    #[must_use]
    pub const fn at(eval: f32) -> Option<Self> {
        if eval <= 0.0 {
            Some(Self::Start)
        } else if eval >= 1.0 {
            Some(Self::End)
        } else {
            None
        }
    }
}

/// Why a traversal was torn down without a regular exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The character was destroyed.
    MotorGone,
    /// The path was removed from the graph.
    PathGone(PathId),
}

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraversalEvent {
    /// Anchoring onto `path` began.
    Entered {
        /// Path entered.
        path: PathId,
    },
    /// The entry arc landed on the path.
    AnchorComplete {
        /// Path anchored onto.
        path: PathId,
    },
    /// Progress arrived at an open end.
    BoundaryReached {
        /// Path whose end was reached.
        path: PathId,
        /// Which end.
        boundary: Boundary,
    },
    /// A hand-off between paths began.
    TransitionStarted {
        /// Path being left.
        from: PathId,
        /// Path being joined.
        to: PathId,
    },
    /// A hand-off landed.
    TransitionFinished {
        /// Path now traversed.
        path: PathId,
    },
    /// Traversal ended; `velocity` is handed back to locomotion.
    Exited {
        /// Path that was left.
        path: PathId,
        /// Velocity for the character controller.
        velocity: Vec3,
    },
    /// Traversal was torn down without a regular exit.
    Aborted {
        /// What went away.
        reason: AbortReason,
    },
}

/// Events of one tick, oldest first, and the velocity requested from the
/// character controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Events in the order they happened.
    pub events: Vec<TraversalEvent>,
    /// Velocity to hand to locomotion; zero unless the traversal exited.
    pub velocity: Vec3,
}

impl TickReport {
    pub(crate) fn push(&mut self, event: TraversalEvent) {
        self.events.push(event);
    }

    /// Number of boundary events for `boundary` in this report.
    #[must_use]
    pub fn boundary_count(&self, boundary: Boundary) -> usize {
        self.events
            .iter()
            .filter(|event| {
                matches!(event, TraversalEvent::BoundaryReached { boundary: b, .. } if *b == boundary)
            })
            .count()
    }

    /// True when the traversal ended this tick.
    #[must_use]
    pub fn ended(&self) -> bool {
        self.events.iter().any(|event| {
            matches!(
                event,
                TraversalEvent::Exited { .. } | TraversalEvent::Aborted { .. }
            )
        })
    }
}
