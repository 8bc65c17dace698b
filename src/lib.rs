//! Spline traversal for kinematic character controllers.
//!
//! Paths are Catmull-Rom curves placed in the world. A
//! [`TraversalStateMachine`] anchors a character onto a path, moves it along
//! the curve from player input under a collision guard, fires boundary
//! hooks, and hands it off to other paths through connections or look-at
//! jumps. The character itself is reached only through the [`Motor`] trait;
//! [`KinematicMotor`] is a headless implementation and the Bevy
//! [`TraversalPlugin`] drives entity transforms.
pub mod collision;
pub mod config;
pub mod connection;
pub mod constants;
pub mod curve;
pub mod data;
pub mod error;
pub mod graph;
pub mod input;
pub mod interaction;
pub mod logging;
pub mod machine;
pub mod motion;
pub mod motor;
pub mod numeric;
pub mod orbital;
pub mod path;
pub mod placement;
pub mod plugin;
pub mod progress;
pub mod scenario;
pub mod transform;
pub mod transition;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use config::{Level, LevelConfig};
pub use connection::{closest_connection, Connection};
pub use curve::{Curve, Knot};
pub use data::TraversalData;
pub use error::TraversalError;
pub use graph::PathGraph;
pub use input::InputSnapshot;
pub use interaction::{InteractionQuery, LookAtHit, LookAtQuery, PathRaycaster};
pub use logging::init as init_logging;
pub use machine::{
    AbortReason, Boundary, MachineConfig, TickReport, TraversalEvent, TraversalPhase,
    TraversalStateMachine,
};
pub use motor::{ColliderId, KinematicMotor, LayerMask, Motor, Overlap, StaticCollider};
pub use path::{AlignmentMode, BoundaryBehaviour, Path, PathId, PathSettings};
pub use placement::Placement;
pub use plugin::{ColliderBox, PathRegistry, TraversalNotice, TraversalPlugin, Traverser};
pub use transform::WorldTransform;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use railwalk::prelude::*;
    //! ```

    pub use crate::InputSnapshot;
    pub use crate::KinematicMotor;
    pub use crate::LevelConfig;
    pub use crate::Motor;
    pub use crate::PathGraph;
    pub use crate::PathId;
    pub use crate::PathRaycaster;
    pub use crate::TraversalEvent;
    pub use crate::TraversalStateMachine;
    pub use glam::Vec3;
}
