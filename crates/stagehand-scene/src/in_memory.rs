//! In-memory scene graph.

use std::collections::BTreeMap;

use stagehand_core::error::DomainError;

use crate::domain::connection::SceneConnection;
use crate::domain::ids::{ConnectionId, SceneId};
use crate::domain::scene::Scene;
use crate::store::SceneGraphStore;

/// A scene graph held entirely in memory.
///
/// Insertion enforces the graph invariants: unique ids, at most one default
/// scene, and connection endpoints that exist.
#[derive(Debug, Clone, Default)]
pub struct InMemorySceneGraph {
    scenes: BTreeMap<SceneId, Scene>,
    connections: Vec<SceneConnection>,
}

impl InMemorySceneGraph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scene.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is taken or a second
    /// default scene is added.
    pub fn add_scene(&mut self, scene: Scene) -> Result<(), DomainError> {
        if self.scenes.contains_key(&scene.id) {
            return Err(DomainError::Validation(format!(
                "duplicate scene id {}",
                scene.id
            )));
        }
        if scene.is_default {
            if let Some(existing) = self.scenes.values().find(|s| s.is_default) {
                return Err(DomainError::Validation(format!(
                    "scene {} cannot be default: scene {} already is",
                    scene.id, existing.id
                )));
            }
        }
        self.scenes.insert(scene.id, scene);
        Ok(())
    }

    /// Adds a connection between two existing scenes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id is taken or an endpoint
    /// does not exist.
    pub fn add_connection(&mut self, connection: SceneConnection) -> Result<(), DomainError> {
        if self.connections.iter().any(|c| c.id == connection.id) {
            return Err(DomainError::Validation(format!(
                "duplicate connection id {}",
                connection.id
            )));
        }
        for endpoint in [connection.source_scene, connection.target_scene] {
            if !self.scenes.contains_key(&endpoint) {
                return Err(DomainError::Validation(format!(
                    "connection {} references unknown scene {endpoint}",
                    connection.id
                )));
            }
        }
        self.connections.push(connection);
        Ok(())
    }

    /// Number of scenes.
    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Number of connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl SceneGraphStore for InMemorySceneGraph {
    fn find_by_id(&self, id: SceneId) -> Option<Scene> {
        self.scenes.get(&id).cloned()
    }

    fn default_scene(&self) -> Result<Scene, DomainError> {
        self.scenes
            .values()
            .find(|s| s.is_default)
            .cloned()
            .ok_or_else(|| DomainError::NotFound("no default scene configured".to_owned()))
    }

    fn connections(&self, scene: &Scene, visible_only: bool) -> Vec<SceneConnection> {
        self.connections
            .iter()
            .filter(|c| c.touches(scene.id))
            .filter(|c| !visible_only || c.is_traversable_from(scene.id))
            .cloned()
            .collect()
    }

    fn find_connection(&self, id: ConnectionId) -> Option<SceneConnection> {
        self.connections.iter().find(|c| c.id == id).cloned()
    }
}
