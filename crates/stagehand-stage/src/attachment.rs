//! Attachments bound to a stage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stagehand_scene::SceneAttachment;

/// A mini-component (shop, battle, form) rendered alongside the stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Component kind, e.g. `shop`.
    pub kind: String,
    /// Author configuration copied from the scene.
    pub config: BTreeMap<String, serde_json::Value>,
}

impl From<&SceneAttachment> for Attachment {
    fn from(authored: &SceneAttachment) -> Self {
        Self {
            kind: authored.kind.clone(),
            config: authored.config.clone(),
        }
    }
}
