//! Scenes, their authored action groups and attachments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::{ConnectionId, SceneActionGroupId, SceneId};

/// An author-defined arrangement of some of a scene's connections under a
/// common heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneActionGroup {
    /// Group identifier.
    pub id: SceneActionGroupId,
    /// Heading shown above the group's actions.
    pub title: String,
    /// Sort weight; lower sorts first.
    #[serde(default)]
    pub sorting: i32,
    /// Connections in display order.
    #[serde(default)]
    pub connections: Vec<ConnectionId>,
}

/// A mini-component (shop, battle, form) an author binds to a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneAttachment {
    /// Which component renders it, e.g. `shop`.
    pub kind: String,
    /// Author-supplied configuration handed to the component.
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
}

/// A node of the narrative graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene identifier.
    pub id: SceneId,
    /// Title shown at the top of the stage.
    pub title: String,
    /// Narrative text.
    #[serde(default)]
    pub description: String,
    /// Whether this is the start scene. Exactly one scene per graph has it.
    #[serde(default)]
    pub is_default: bool,
    /// Authored groupings of this scene's connections, in stored order.
    #[serde(default)]
    pub action_groups: Vec<SceneActionGroup>,
    /// Components bound to this scene.
    #[serde(default)]
    pub attachments: Vec<SceneAttachment>,
}

impl Scene {
    /// A scene with no groups or attachments.
    #[must_use]
    pub fn new(id: SceneId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_default: false,
            action_groups: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Marks the scene as the graph's start scene.
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Appends an authored action group.
    #[must_use]
    pub fn with_action_group(mut self, group: SceneActionGroup) -> Self {
        self.action_groups.push(group);
        self
    }

    /// Appends an attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: SceneAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Action groups in author sort order. Equal weights keep stored order.
    #[must_use]
    pub fn sorted_action_groups(&self) -> Vec<&SceneActionGroup> {
        let mut groups: Vec<&SceneActionGroup> = self.action_groups.iter().collect();
        groups.sort_by_key(|g| g.sorting);
        groups
    }
}
