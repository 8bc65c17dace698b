//! Level configuration loaded from JSON.
//!
//! A level lists its paths with their curves, transform, tuning, connections
//! and entry and transition policies, plus the static colliders used by the
//! headless motor. Every tuning value has a default, so a minimal path only
//! needs an id and its knots:
//!
//! ```
//! use railwalk::config::LevelConfig;
//! let level = LevelConfig::from_json_str(
//!     r#"{ "paths": [{ "id": 1, "curves": [{ "knots": [
//!         { "position": [0.0, 0.0, 0.0] },
//!         { "position": [0.0, 0.0, 8.0] }
//!     ] }] }] }"#,
//! )
//! .unwrap();
//! let graph = level.into_graph().unwrap();
//! assert_eq!(graph.len(), 1);
//! ```

use std::fs;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::curve::{Curve, Knot};
use crate::error::TraversalError;
use crate::graph::PathGraph;
use crate::machine::MachineConfig;
use crate::motor::{LayerMask, StaticCollider};
use crate::path::{BoundaryBehaviour, Path, PathId, PathSettings};
use crate::scenario::{BuiltinScenario, ScenarioList};
use crate::transform::WorldTransform;
use crate::transition::BuiltinTransition;

/// One authored curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// At least two knots.
    pub knots: Vec<Knot>,
    /// Connect the last knot back to the first.
    #[serde(default)]
    pub closed: bool,
}

/// One authored path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Unique within the level.
    pub id: PathId,
    /// Display name; defaults to `path-<id>`.
    #[serde(default)]
    pub name: Option<String>,
    /// The first curve starts active.
    pub curves: Vec<CurveConfig>,
    /// Placement of the curves in the world.
    #[serde(default)]
    pub transform: WorldTransform,
    /// Tuning values.
    #[serde(default)]
    pub settings: PathSettings,
    /// Layers visible to look-at queries.
    #[serde(default)]
    pub layers: LayerMask,
    /// Outgoing connections in declaration order.
    #[serde(default)]
    pub connections: Vec<Connection>,
    /// Entry checks for look-at discovery.
    #[serde(default)]
    pub distance_scenarios: Vec<BuiltinScenario>,
    /// Entry checks for collision discovery.
    #[serde(default)]
    pub collision_scenarios: Vec<BuiltinScenario>,
    /// Hand-off motion used when leaving this path.
    #[serde(default)]
    pub transition: BuiltinTransition,
    /// Behaviour at open ends.
    #[serde(default)]
    pub boundary: BoundaryBehaviour,
}

impl PathConfig {
    /// Build the runtime path.
    ///
    /// # Errors
    /// Curve and path construction errors.
    pub fn build(self) -> Result<Path, TraversalError> {
        let curves = self
            .curves
            .into_iter()
            .map(|curve| Curve::new(curve.knots, curve.closed))
            .collect::<Result<Vec<_>, _>>()?;
        let mut path = Path::new(self.id, curves, self.transform)?
            .with_settings(self.settings)
            .with_layers(self.layers)
            .with_connections(self.connections)
            .with_distance_scenarios(self.distance_scenarios.into_iter().collect::<ScenarioList>())
            .with_collision_scenarios(self.collision_scenarios.into_iter().collect::<ScenarioList>())
            .with_transition(Arc::new(self.transition))
            .with_boundary(self.boundary);
        if let Some(name) = self.name {
            path = path.with_name(name);
        }
        Ok(path)
    }
}

/// Built level: the path graph plus everything the host needs to drive it.
#[derive(Debug)]
pub struct Level {
    /// Validated paths.
    pub graph: PathGraph,
    /// Tuning for the machines driving actors in this level.
    pub machine: MachineConfig,
    /// Static environment boxes.
    pub colliders: Vec<StaticCollider>,
}

/// Top-level level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Machine tuning.
    #[serde(default)]
    pub machine: MachineConfig,
    /// Authored paths.
    pub paths: Vec<PathConfig>,
    /// Static environment boxes.
    #[serde(default)]
    pub colliders: Vec<StaticCollider>,
}

impl LevelConfig {
    /// Parse a level from JSON text.
    ///
    /// # Errors
    /// [`TraversalError::Parse`] for malformed JSON or missing fields.
    pub fn from_json_str(json: &str) -> Result<Self, TraversalError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a level file.
    ///
    /// # Errors
    /// [`TraversalError::Io`] when the file cannot be read, otherwise as
    /// [`LevelConfig::from_json_str`].
    pub fn load(file: impl AsRef<std::path::Path>) -> Result<Self, TraversalError> {
        let path = file.as_ref();
        let text = fs::read_to_string(path)?;
        let level = Self::from_json_str(&text)?;
        info!("loaded {} paths from {}", level.paths.len(), path.display());
        Ok(level)
    }

    /// Build every path and validate the connection graph.
    ///
    /// # Errors
    /// Any construction or validation error.
    pub fn into_level(self) -> Result<Level, TraversalError> {
        let paths = self
            .paths
            .into_iter()
            .map(PathConfig::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Level {
            graph: PathGraph::from_paths(paths)?,
            machine: self.machine,
            colliders: self.colliders,
        })
    }

    /// Build only the path graph.
    ///
    /// # Errors
    /// As [`LevelConfig::into_level`].
    pub fn into_graph(self) -> Result<PathGraph, TraversalError> {
        self.into_level().map(|level| level.graph)
    }
}
