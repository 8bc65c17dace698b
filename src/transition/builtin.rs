//! Transition factories shipped with the crate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{InteractionResult, TransitionFactory, TransitionStrategy};
use crate::data::TraversalData;
use crate::motion::ArcMotion;
use crate::motor::Motor;
use crate::path::Path;
use crate::placement::evaluate_at_point;
use crate::{TRANSITION_DURATION, TRANSITION_PEAK_HEIGHT};

/// Built-in transition factories, selectable from level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuiltinTransition {
    /// Half-sine arc onto the target placement nearest the actor.
    ArcJump {
        /// Seconds in the air.
        duration: f32,
        /// Height of the arc above the straight line.
        peak_height: f32,
    },
    /// Land on the target in a single tick.
    Snap,
}

impl Default for BuiltinTransition {
    fn default() -> Self {
        Self::ArcJump {
            duration: TRANSITION_DURATION,
            peak_height: TRANSITION_PEAK_HEIGHT,
        }
    }
}

impl TransitionFactory for BuiltinTransition {
    fn create(
        &self,
        from: &Path,
        to: &Path,
        from_data: &TraversalData,
        current_position: Vec3,
    ) -> InteractionResult {
        let to_data = evaluate_at_point(to, current_position);
        let strategy: Box<dyn TransitionStrategy> = match *self {
            Self::ArcJump {
                duration,
                peak_height,
            } => Box::new(ArcJumpStrategy::new(
                current_position,
                to_data,
                duration,
                peak_height,
            )),
            Self::Snap => Box::new(SnapStrategy::new(to_data)),
        };
        InteractionResult {
            from_path: from.id(),
            to_path: to.id(),
            from_data: *from_data,
            to_data,
            strategy,
        }
    }
}

/// Arc from the current position onto the target placement.
#[derive(Debug, Clone)]
pub struct ArcJumpStrategy {
    motion: ArcMotion,
    target: TraversalData,
}

impl ArcJumpStrategy {
    /// Arc from `from` onto `target` over `duration` seconds.
    #[must_use]
    pub const fn new(from: Vec3, target: TraversalData, duration: f32, peak_height: f32) -> Self {
        Self {
            motion: ArcMotion::new(from, target.position, duration, peak_height),
            target,
        }
    }
}

impl TransitionStrategy for ArcJumpStrategy {
    fn step(&mut self, motor: &mut dyn Motor, dt: f32) -> bool {
        let done = self.motion.step(motor, dt);
        if done {
            motor.set_rotation(self.target.rotation);
        }
        done
    }

    fn target_data(&self) -> &TraversalData {
        &self.target
    }
}

/// Immediate placement on the target.
#[derive(Debug, Clone)]
pub struct SnapStrategy {
    target: TraversalData,
}

impl SnapStrategy {
    /// Land on `target` on the next step.
    #[must_use]
    pub const fn new(target: TraversalData) -> Self {
        Self { target }
    }
}

impl TransitionStrategy for SnapStrategy {
    fn step(&mut self, motor: &mut dyn Motor, _dt: f32) -> bool {
        motor.set_position(self.target.position);
        motor.set_rotation(self.target.rotation);
        true
    }

    fn target_data(&self) -> &TraversalData {
        &self.target
    }
}
