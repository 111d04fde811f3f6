//! The on-disk shape of authored content.

use serde::Deserialize;
use stagehand_scene::{Scene, SceneConnection};

/// A whole authored scene graph.
///
/// ```yaml
/// scenes:
///   - id: 1
///     title: Village square
///     is_default: true
///     action_groups:
///       - id: 1
///         title: Shops
///         connections: [1]
/// connections:
///   - id: 1
///     source_scene: 1
///     target_scene: 2
///     forward: { label: Visit the smithy, expression: "gold > 0" }
///     reverse: { label: Back to the square }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentDocument {
    #[serde(default)]
    pub scenes: Vec<Scene>,
    #[serde(default)]
    pub connections: Vec<SceneConnection>,
}
