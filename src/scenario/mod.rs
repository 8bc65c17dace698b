//! Entrance scenarios: predicates deciding whether free locomotion may enter
//! a path.
//!
//! Each path carries two ordered lists, one consulted when the camera looks
//! at the path and one when locomotion bumps into it. Lists short-circuit on
//! the first scenario that passes.

mod discovery;

use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};

pub use discovery::{discover_by_collision, discover_by_look_at, EntranceDecision, EntranceTrigger};

use crate::collision::collides_at;
use crate::data::TraversalData;
use crate::input::InputSnapshot;
use crate::motor::Motor;
use crate::path::Path;
use crate::placement::evaluate_placement;

/// Outcome of one scenario with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioVerdict {
    /// Whether entry is allowed.
    pub pass: bool,
    /// Why, for the logs.
    pub reason: String,
}

impl ScenarioVerdict {
    /// Allow entry.
    #[must_use]
    pub fn pass(reason: impl Into<String>) -> Self {
        Self {
            pass: true,
            reason: reason.into(),
        }
    }

    /// Refuse entry.
    #[must_use]
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            pass: false,
            reason: reason.into(),
        }
    }
}

/// Predicate over a prospective entry onto a path.
///
/// `data` is the placement the actor would take on `path`; implementations
/// must not mutate anything.
pub trait EntranceScenario: fmt::Debug + Send + Sync {
    /// Short identifier used in logs and entry decisions.
    fn name(&self) -> &str;
    /// Judge the prospective entry.
    fn evaluate(
        &self,
        motor: &dyn Motor,
        path: &Path,
        data: &TraversalData,
        input: &InputSnapshot,
    ) -> ScenarioVerdict;
}

/// Built-in scenarios, selectable from level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuiltinScenario {
    /// Always passes.
    Always,
    /// Passes while the character is off the ground.
    Airborne,
    /// Passes while airborne, or on the ground when jump is pressed and the
    /// entry placement is free.
    GroundedJump,
    /// Passes when the entry placement is within `max_distance` of the
    /// character.
    WithinDistance {
        /// Largest allowed distance in world units.
        max_distance: f32,
    },
}

impl BuiltinScenario {
    fn grounded_jump(
        motor: &dyn Motor,
        path: &Path,
        data: &TraversalData,
        input: &InputSnapshot,
    ) -> ScenarioVerdict {
        if !motor.is_stable_on_ground() {
            return ScenarioVerdict::pass("airborne");
        }
        if path.settings().check_for_collisions {
            let placement = evaluate_placement(path, data.eval, data.orbital_angle);
            if collides_at(motor, path, &placement) {
                return ScenarioVerdict::fail("entry placement is obstructed");
            }
        }
        if input.jump_performed {
            ScenarioVerdict::pass("jumped from the ground")
        } else {
            ScenarioVerdict::fail("grounded without jump")
        }
    }
}

impl EntranceScenario for BuiltinScenario {
    fn name(&self) -> &str {
        match self {
            Self::Always => "always",
            Self::Airborne => "airborne",
            Self::GroundedJump => "grounded_jump",
            Self::WithinDistance { .. } => "within_distance",
        }
    }

    fn evaluate(
        &self,
        motor: &dyn Motor,
        path: &Path,
        data: &TraversalData,
        input: &InputSnapshot,
    ) -> ScenarioVerdict {
        match *self {
            Self::Always => ScenarioVerdict::pass("unconditional"),
            Self::Airborne => {
                if motor.is_stable_on_ground() {
                    ScenarioVerdict::fail("grounded")
                } else {
                    ScenarioVerdict::pass("airborne")
                }
            }
            Self::GroundedJump => Self::grounded_jump(motor, path, data, input),
            Self::WithinDistance { max_distance } => {
                let distance = motor.transient_position().distance(data.position);
                if distance <= max_distance {
                    ScenarioVerdict::pass(format!("{distance:.2} within {max_distance:.2}"))
                } else {
                    ScenarioVerdict::fail(format!("{distance:.2} beyond {max_distance:.2}"))
                }
            }
        }
    }
}

/// Ordered list of shared scenarios.
#[derive(Clone, Default)]
pub struct ScenarioList(Vec<Arc<dyn EntranceScenario>>);

impl fmt::Debug for ScenarioList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter().map(|s| s.name())).finish()
    }
}

impl FromIterator<BuiltinScenario> for ScenarioList {
    fn from_iter<I: IntoIterator<Item = BuiltinScenario>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|scenario| Arc::new(scenario) as Arc<dyn EntranceScenario>)
                .collect(),
        )
    }
}

impl ScenarioList {
    /// Empty list; nothing passes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scenario; it is consulted after the existing ones.
    #[must_use]
    pub fn with(mut self, scenario: Arc<dyn EntranceScenario>) -> Self {
        self.0.push(scenario);
        self
    }

    /// Number of scenarios.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no scenario is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First scenario that passes, if any.
    #[must_use]
    pub fn evaluate(
        &self,
        motor: &dyn Motor,
        path: &Path,
        data: &TraversalData,
        input: &InputSnapshot,
    ) -> Option<&dyn EntranceScenario> {
        for scenario in &self.0 {
            let verdict = scenario.evaluate(motor, path, data, input);
            if verdict.pass {
                info!(
                    "scenario '{}' passed on {}: {}",
                    scenario.name(),
                    path.id(),
                    verdict.reason
                );
                return Some(scenario.as_ref());
            }
            debug!("scenario '{}' failed: {}", scenario.name(), verdict.reason);
        }
        None
    }
}
