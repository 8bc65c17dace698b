//! Registry of the paths in a level.

use glam::Vec3;
use hashbrown::HashMap;
use log::debug;

use crate::error::TraversalError;
use crate::path::{Path, PathId};

/// All paths of a level keyed by id, plus their declaration order.
#[derive(Debug, Default)]
pub struct PathGraph {
    paths: HashMap<PathId, Path>,
    order: Vec<PathId>,
}

impl PathGraph {
    /// Graph with no paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `paths` and check every connection resolves.
    ///
    /// # Errors
    /// [`TraversalError::DuplicatePath`] or
    /// [`TraversalError::DanglingConnection`].
    pub fn from_paths(paths: impl IntoIterator<Item = Path>) -> Result<Self, TraversalError> {
        let mut graph = Self::new();
        for path in paths {
            graph.insert(path)?;
        }
        graph.validate()?;
        Ok(graph)
    }

    /// Add a path.
    ///
    /// # Errors
    /// [`TraversalError::DuplicatePath`] if the id is already registered.
    pub fn insert(&mut self, path: Path) -> Result<(), TraversalError> {
        let id = path.id();
        if self.paths.contains_key(&id) {
            return Err(TraversalError::DuplicatePath(id));
        }
        debug!("registered path {id} ({})", path.name());
        self.paths.insert(id, path);
        self.order.push(id);
        Ok(())
    }

    /// Remove a path, returning it if it was registered.
    pub fn remove(&mut self, id: PathId) -> Option<Path> {
        self.order.retain(|existing| *existing != id);
        self.paths.remove(&id)
    }

    /// Check that every connection is in range and targets a registered path.
    ///
    /// # Errors
    /// [`TraversalError::DanglingConnection`] or
    /// [`TraversalError::InvalidConnection`] naming the first bad edge.
    pub fn validate(&self) -> Result<(), TraversalError> {
        for path in self.iter() {
            for connection in path.connections() {
                if !self.paths.contains_key(&connection.target) {
                    return Err(TraversalError::DanglingConnection {
                        from: path.id(),
                        to: connection.target,
                    });
                }
                if !connection.is_well_formed() {
                    return Err(TraversalError::InvalidConnection {
                        from: path.id(),
                        to: connection.target,
                    });
                }
            }
        }
        Ok(())
    }

    /// Path registered under `id`.
    #[must_use]
    pub fn get(&self, id: PathId) -> Option<&Path> {
        self.paths.get(&id)
    }

    /// Mutable path registered under `id`.
    #[must_use]
    pub fn get_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.get_mut(&id)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: PathId) -> bool {
        self.paths.contains_key(&id)
    }

    /// Number of registered paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when no path is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.order.iter().filter_map(|id| self.paths.get(id))
    }

    /// Activate the curve of `id` closest to `world_point`.
    ///
    /// # Errors
    /// [`TraversalError::UnknownPath`] if `id` is not registered.
    pub fn activate_closest_curve(
        &mut self,
        id: PathId,
        world_point: Vec3,
    ) -> Result<usize, TraversalError> {
        self.paths
            .get_mut(&id)
            .map(|path| path.activate_closest_curve(world_point))
            .ok_or(TraversalError::UnknownPath(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::Connection;
    use crate::curve::Curve;
    use crate::transform::WorldTransform;

    fn path(id: u32, connections: Vec<Connection>) -> Path {
        let curve = Curve::from_points([Vec3::ZERO, Vec3::X * 4.0], false).expect("valid curve");
        Path::new(PathId(id), vec![curve], WorldTransform::IDENTITY)
            .expect("valid path")
            .with_connections(connections)
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = PathGraph::from_paths([path(1, Vec::new()), path(1, Vec::new())]);
        assert!(matches!(result, Err(TraversalError::DuplicatePath(PathId(1)))));
    }

    #[test]
    fn dangling_connection_is_reported() {
        let result = PathGraph::from_paths([
            path(1, vec![Connection::new(PathId(2), 1.0, 0.0)]),
            path(3, Vec::new()),
        ]);
        assert!(matches!(
            result,
            Err(TraversalError::DanglingConnection {
                from: PathId(1),
                to: PathId(2)
            })
        ));
    }

    #[test]
    fn out_of_range_connection_is_reported() {
        let landing_past_end = Connection {
            to_position: 1.7,
            ..Connection::new(PathId(2), 1.0, 0.0)
        };
        let result = PathGraph::from_paths([path(1, vec![landing_past_end]), path(2, Vec::new())]);
        assert!(matches!(
            result,
            Err(TraversalError::InvalidConnection {
                from: PathId(1),
                to: PathId(2)
            })
        ));
    }

    #[test]
    fn iteration_keeps_declaration_order() {
        let graph = PathGraph::from_paths([path(5, Vec::new()), path(2, Vec::new()), path(9, Vec::new())])
            .expect("valid graph");
        let ids: Vec<_> = graph.iter().map(Path::id).collect();
        assert_eq!(ids, vec![PathId(5), PathId(2), PathId(9)]);
    }

    #[test]
    fn unknown_path_cannot_activate_curve() {
        let mut graph = PathGraph::new();
        let result = graph.activate_closest_curve(PathId(4), Vec3::ZERO);
        assert!(matches!(result, Err(TraversalError::UnknownPath(PathId(4)))));
    }

    #[test]
    fn removed_paths_disappear() {
        let mut graph = PathGraph::from_paths([path(1, Vec::new())]).expect("valid graph");
        assert!(graph.remove(PathId(1)).is_some());
        assert!(graph.is_empty());
        assert_eq!(graph.iter().count(), 0);
    }
}
