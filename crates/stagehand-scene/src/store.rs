//! Scene graph store port.

use stagehand_core::error::DomainError;

use crate::domain::connection::SceneConnection;
use crate::domain::ids::{ConnectionId, SceneId};
use crate::domain::scene::{Scene, SceneActionGroup};

/// Read access to the authored scene graph.
///
/// Lookups are synchronous: the graph is static content, loaded once.
pub trait SceneGraphStore: Send + Sync {
    /// Looks up a scene by id.
    fn find_by_id(&self, id: SceneId) -> Option<Scene>;

    /// The graph's start scene.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no default scene is configured.
    fn default_scene(&self) -> Result<Scene, DomainError>;

    /// Connections incident to `scene`, in stored order. With `visible_only`
    /// the list is restricted to connections whose direction allows leaving
    /// `scene`; gating expressions are not evaluated here.
    fn connections(&self, scene: &Scene, visible_only: bool) -> Vec<SceneConnection>;

    /// Looks up a connection by id.
    fn find_connection(&self, id: ConnectionId) -> Option<SceneConnection>;

    /// The scene's authored action groups in author sort order.
    fn action_groups(&self, scene: &Scene) -> Vec<SceneActionGroup> {
        scene.sorted_action_groups().into_iter().cloned().collect()
    }
}
