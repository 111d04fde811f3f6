//! Stagehand — Scene Graph.
//!
//! The static narrative graph authored by content writers: scenes, the
//! connections between them, and the action groups that arrange a scene's
//! connections. Read-only at play time.

pub mod domain;
pub mod in_memory;
pub mod query;
pub mod store;

pub use domain::connection::{ConnectionSide, ConnectionType, SceneConnection};
pub use domain::ids::{ConnectionId, SceneActionGroupId, SceneId};
pub use domain::scene::{Scene, SceneActionGroup, SceneAttachment};
pub use in_memory::InMemorySceneGraph;
pub use store::SceneGraphStore;
